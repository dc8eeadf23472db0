//! Path Security Utilities
//!
//! Keeps every rename inside the scanned directory.
//!
//! # Threats Addressed
//!
//! - **Path Traversal**: a suffix such as `/../x` turning a rename into a move
//! - **Null Bytes**: names the OS would truncate
//! - **Non-directories**: scanning a regular file or a missing path

use crate::error::{EngineError, Result};
use std::path::{Path, PathBuf};

fn has_separator(s: &str) -> bool {
    s.contains('/') || s.contains('\\') || s.contains(std::path::MAIN_SEPARATOR)
}

/// Check that a retag suffix can only ever change the tail of a file name.
///
/// # Errors
/// Returns [`EngineError::InvalidConfig`] if the suffix is empty, contains a
/// path separator or a null byte, or is a relative directory marker.
pub fn validate_suffix(suffix: &str) -> Result<()> {
    if suffix.is_empty() {
        return Err(EngineError::InvalidConfig("suffix must not be empty".into()));
    }
    if suffix.contains('\0') {
        return Err(EngineError::InvalidConfig(
            "suffix contains null bytes".into(),
        ));
    }
    if has_separator(suffix) {
        return Err(EngineError::InvalidConfig(format!(
            "suffix '{suffix}' contains a path separator"
        )));
    }
    if matches!(suffix, "." | "..") {
        return Err(EngineError::InvalidConfig(format!(
            "suffix '{suffix}' is not a file name suffix"
        )));
    }
    Ok(())
}

/// Resolve the directory to scan.
///
/// # Errors
/// Returns [`EngineError::DirectoryAccess`] if the path contains null bytes,
/// does not exist, cannot be read or is not a directory.
pub fn sanitize_directory(path: &Path) -> Result<PathBuf> {
    let access_error = |source: std::io::Error| EngineError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    };

    if path.to_string_lossy().contains('\0') {
        return Err(access_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path contains null bytes",
        )));
    }

    let meta = std::fs::metadata(path).map_err(access_error)?;
    if !meta.is_dir() {
        return Err(access_error(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    Ok(path.to_path_buf())
}
