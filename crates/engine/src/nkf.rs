// crates/engine/src/nkf.rs
//! `nkf` backed detector and converter.

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::ports::{EncodingConverter, EncodingDetector};
use crate::tool::ExternalTool;
use std::path::Path;

/// `nkf -g <path>`: prints the guessed encoding.
#[derive(Debug, Clone)]
pub struct NkfDetector {
    tool: ExternalTool,
}

impl NkfDetector {
    #[must_use]
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            tool: ExternalTool::new(&config.program)
                .arg("-g")
                .timeout(config.timeout),
        }
    }
}

impl EncodingDetector for NkfDetector {
    fn detect(&self, path: &Path) -> Result<String, ToolError> {
        let output = self.tool.run(path)?;
        parse_label(&output.stdout)
    }
}

/// `nkf -s --overwrite <path>`: rewrites the file as Shift_JIS.
#[derive(Debug, Clone)]
pub struct NkfConverter {
    tool: ExternalTool,
}

impl NkfConverter {
    #[must_use]
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            tool: ExternalTool::new(&config.program)
                .arg("-s")
                .arg("--overwrite")
                .timeout(config.timeout),
        }
    }
}

impl EncodingConverter for NkfConverter {
    fn convert(&self, path: &Path) -> Result<(), ToolError> {
        self.tool.run(path).map(|_| ())
    }
}

/// Extract the encoding label from detector output: the first line, trimmed.
///
/// # Errors
/// Returns [`ToolError::InvalidOutput`] if the output is not UTF-8 or holds
/// no label.
pub fn parse_label(stdout: &[u8]) -> Result<String, ToolError> {
    let text = std::str::from_utf8(stdout).map_err(|e| ToolError::InvalidOutput {
        reason: format!("not UTF-8: {e}"),
    })?;
    text.lines()
        .next()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidOutput {
            reason: "empty output".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_trims_newline() {
        assert_eq!(parse_label(b"Shift_JIS\n").unwrap(), "Shift_JIS");
        assert_eq!(parse_label(b"  UTF-8\r\n").unwrap(), "UTF-8");
    }

    #[test]
    fn test_parse_label_takes_first_line() {
        assert_eq!(parse_label(b"EUC-JP\nextra\n").unwrap(), "EUC-JP");
    }

    #[test]
    fn test_parse_label_keeps_case() {
        assert_eq!(parse_label(b"shift_jis").unwrap(), "shift_jis");
    }

    #[test]
    fn test_parse_label_rejects_empty_and_binary() {
        assert!(matches!(
            parse_label(b"\n"),
            Err(ToolError::InvalidOutput { .. })
        ));
        assert!(matches!(
            parse_label(b""),
            Err(ToolError::InvalidOutput { .. })
        ));
        assert!(matches!(
            parse_label(&[0xff, 0xfe, 0x00]),
            Err(ToolError::InvalidOutput { .. })
        ));
    }
}
