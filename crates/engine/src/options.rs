use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two counts the limit applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountMode {
    /// One count per completed statement, however many physical lines it spans.
    #[default]
    Logical,
    /// Raw lines minus blank lines, comment-only lines and docstrings.
    Physical,
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical => write!(f, "logical"),
            Self::Physical => write!(f, "physical"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitPolicy {
    #[default]
    Enforce,
    /// Counts only, no limit checking.
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
