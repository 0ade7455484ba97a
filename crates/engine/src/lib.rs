// crates/engine/src/lib.rs

pub mod config;
pub mod counter;
pub mod error;
pub mod options;
pub mod stats;
pub mod token;
pub mod tokenizer;

use crate::config::Config;
use crate::error::Result;
use crate::options::LimitPolicy;
use crate::stats::FileReport;

/// Tokenize the configured file and count its lines in one pass.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if its
/// source cannot be tokenized. Counting itself is total over any
/// well-formed token stream.
pub fn run(config: &Config) -> Result<FileReport> {
    let tokens = tokenizer::tokenize_file(&config.path)?;
    let limit = match config.limit_policy {
        LimitPolicy::Enforce => Some(config.limit),
        LimitPolicy::Ignore => None,
    };
    let counts = counter::count(&tokens, config.mode, limit)?;
    Ok(FileReport::new(config.path.clone(), counts))
}
