use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of a single external tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("exited with {}{}", display_code(*code), display_stderr(stderr))]
    Exit { code: Option<i32>, stderr: String },

    #[error("timed out after {}s", after.as_secs_f64())]
    Timeout { after: Duration },

    #[error("unreadable output: {reason}")]
    InvalidOutput { reason: String },
}

impl ToolError {
    /// Exit status of the child, when it exited on its own.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

fn display_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" ({trimmed})")
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot access directory '{path}': {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding detection failed for '{file}': {cause}")]
    Detection {
        file: String,
        #[source]
        cause: ToolError,
    },

    #[error("Encoding conversion failed for '{file}': {cause}")]
    Conversion {
        file: String,
        #[source]
        cause: ToolError,
    },

    #[error("Refusing to rename '{from}' to '{to}': target already exists")]
    RenameCollision { from: String, to: String },

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// The file a per-file error is attributed to.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Detection { file, .. } | Self::Conversion { file, .. } => Some(file),
            Self::RenameCollision { from, .. } | Self::Rename { from, .. } => Some(from),
            Self::DirectoryAccess { .. } | Self::InvalidConfig(_) => None,
        }
    }

    /// Exit status of the detector or converter, if the failure was a non-zero exit.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Detection { cause, .. } | Self::Conversion { cause, .. } => cause.exit_code(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_message_includes_stderr() {
        let err = ToolError::Exit {
            code: Some(2),
            stderr: "nkf: bad file\n".to_string(),
        };
        assert_eq!(err.to_string(), "exited with status 2 (nkf: bad file)");
        assert_eq!(err.exit_code(), Some(2));
    }

    #[test]
    fn test_conversion_error_exposes_exit_code() {
        let err = EngineError::Conversion {
            file: "report.csv".to_string(),
            cause: ToolError::Exit {
                code: Some(7),
                stderr: String::new(),
            },
        };
        assert_eq!(err.file(), Some("report.csv"));
        assert_eq!(err.exit_code(), Some(7));
        assert!(err.to_string().contains("report.csv"));
    }

    #[test]
    fn test_detection_error_exposes_exit_code() {
        let err = EngineError::Detection {
            file: "broken.bin".to_string(),
            cause: ToolError::Exit {
                code: Some(2),
                stderr: String::new(),
            },
        };
        assert_eq!(err.file(), Some("broken.bin"));
        assert_eq!(err.exit_code(), Some(2));
    }

    #[test]
    fn test_collision_is_attributed_to_source() {
        let err = EngineError::RenameCollision {
            from: "a.txt".into(),
            to: "a.csv".into(),
        };
        assert_eq!(err.file(), Some("a.txt"));
        assert_eq!(err.exit_code(), None);
    }
}
