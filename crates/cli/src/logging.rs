// crates/cli/src/logging.rs
use crate::error::{AppError, Result};
use crate::options::LogLevel;
use tracing_subscriber::filter::LevelFilter;

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Warning => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
        }
    }
}

/// Install the stderr logger. `log` records from the engine are bridged in.
///
/// # Errors
/// Returns [`AppError::Logger`] if a global logger is already installed.
pub fn init(level: LogLevel) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))
}
