use serde::Serialize;
use std::path::PathBuf;

use crate::counter::LineCounts;
use crate::options::CountMode;

/// Result of counting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub logical_lines: usize,
    pub physical_lines: usize,
    /// First line at which the configured limit was exceeded, if it was.
    pub leak_line: Option<usize>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf, counts: LineCounts) -> Self {
        Self {
            path,
            logical_lines: counts.logical,
            physical_lines: counts.physical,
            leak_line: counts.leak_line,
        }
    }

    #[must_use]
    pub fn has_live_code(&self) -> bool {
        self.logical_lines > 0 || self.physical_lines > 0
    }

    #[must_use]
    pub fn limit_reached(&self) -> bool {
        self.leak_line.is_some()
    }

    /// The count the limit was checked against.
    #[must_use]
    pub fn count_for(&self, mode: CountMode) -> usize {
        match mode {
            CountMode::Logical => self.logical_lines,
            CountMode::Physical => self.physical_lines,
        }
    }
}
