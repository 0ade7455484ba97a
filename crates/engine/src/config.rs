use crate::options::{CountMode, LimitPolicy, OutputFormat};
use derive_builder::Builder;
use std::path::PathBuf;

/// Line limit applied when the caller does not override it.
pub const DEFAULT_LIMIT: usize = 500;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// The file to lint.
    pub path: PathBuf,
    #[builder(default = "DEFAULT_LIMIT")]
    pub limit: usize,
    #[builder(default)]
    pub mode: CountMode,
    #[builder(default)]
    pub limit_policy: LimitPolicy,
    #[builder(default)]
    pub format: OutputFormat,
}
