//! Seams to the external encoding tool.
//!
//! The pipeline only talks to these traits, so tests can swap in fakes and
//! the production build can use [`crate::nkf`].

use crate::error::ToolError;
use std::path::Path;

/// Reports the character encoding of a file as a single label.
pub trait EncodingDetector {
    fn detect(&self, path: &Path) -> Result<String, ToolError>;
}

/// Rewrites a file in place to the target encoding.
pub trait EncodingConverter {
    fn convert(&self, path: &Path) -> Result<(), ToolError>;
}

impl<T: EncodingDetector + ?Sized> EncodingDetector for &T {
    fn detect(&self, path: &Path) -> Result<String, ToolError> {
        (**self).detect(path)
    }
}

impl<T: EncodingConverter + ?Sized> EncodingConverter for &T {
    fn convert(&self, path: &Path) -> Result<(), ToolError> {
        (**self).convert(path)
    }
}
