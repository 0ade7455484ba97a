// crates/cli/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] lineleak_engine::error::EngineError),
}

pub type Result<T> = std::result::Result<T, AppError>;
