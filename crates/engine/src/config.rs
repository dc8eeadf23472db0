use crate::error::{EngineError, Result};
use crate::options::{ErrorPolicy, TARGET_ENCODING};
use crate::path_security::validate_suffix;
use derive_builder::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Rename rule for the extension pass.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct RetagRule {
    #[builder(default = "\".txt\".to_string()")]
    pub from: String,
    #[builder(default = "\".csv\".to_string()")]
    pub to: String,
}

impl Default for RetagRule {
    fn default() -> Self {
        Self {
            from: ".txt".to_string(),
            to: ".csv".to_string(),
        }
    }
}

/// How the external encoding tool is launched.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ToolConfig {
    #[builder(default = "PathBuf::from(\"nkf\")")]
    pub program: PathBuf,
    #[builder(default = "Some(Duration::from_secs(30))")]
    pub timeout: Option<Duration>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("nkf"),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default = "PathBuf::from(\"./\")")]
    pub directory: PathBuf,
    /// `None` disables the extension pass.
    #[builder(default = "Some(RetagRule::default())")]
    pub retag: Option<RetagRule>,
    #[builder(default = "TARGET_ENCODING.to_string()")]
    pub target_encoding: String,
    #[builder(default)]
    pub policy: ErrorPolicy,
    #[builder(default)]
    pub tool: ToolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./"),
            retag: Some(RetagRule::default()),
            target_encoding: TARGET_ENCODING.to_string(),
            policy: ErrorPolicy::default(),
            tool: ToolConfig::default(),
        }
    }
}

impl Config {
    /// Check the settings before any file is touched.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] for unusable suffixes, an empty
    /// target encoding or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if let Some(rule) = &self.retag {
            validate_suffix(&rule.from)?;
            validate_suffix(&rule.to)?;
            if rule.from == rule.to {
                return Err(EngineError::InvalidConfig(format!(
                    "source and target suffix are both '{}'",
                    rule.from
                )));
            }
        }
        if self.target_encoding.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "target encoding must not be empty".into(),
            ));
        }
        if self.tool.timeout.is_some_and(|t| t.is_zero()) {
            return Err(EngineError::InvalidConfig(
                "tool timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}
