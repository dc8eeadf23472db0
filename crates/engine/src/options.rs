use serde::{Deserialize, Serialize};

/// Label `nkf -g` reports for Shift_JIS input, and the only target the
/// converter produces.
pub const TARGET_ENCODING: &str = "Shift_JIS";

/// What to do when a single file fails during rename, inspection or conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Record the failure and keep going with the remaining files.
    #[default]
    Continue,
    /// Abort the run on the first per-file failure.
    FailFast,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn is_fail_fast(self) -> bool {
        matches!(self, Self::FailFast)
    }
}
