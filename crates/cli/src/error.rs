// crates/cli/src/error.rs
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] check_format_engine::error::EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logger setup failed: {0}")]
    Logger(String),
}

impl AppError {
    /// Fatal errors exit with 2; 1 is kept for runs that finished with
    /// per-file failures.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(2)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
