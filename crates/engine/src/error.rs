use std::path::PathBuf;
use thiserror::Error;

use crate::tokenizer::TokenizeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },

    #[error("File '{path}' declares unsupported encoding '{encoding}'")]
    UnsupportedEncoding { path: PathBuf, encoding: String },

    #[error("Failed to tokenize '{path}': {source}")]
    Tokenize {
        path: PathBuf,
        #[source]
        source: TokenizeError,
    },

    #[error("Token stream was empty: no end marker to derive a line count from")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, EngineError>;
