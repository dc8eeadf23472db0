use crate::error::EngineError;
use crate::record::{FileRecord, RecordState};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pipeline pass a failure or skip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Enumerate,
    Retag,
    Inspect,
    Convert,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Enumerate => "enumerate",
            Self::Retag => "retag",
            Self::Inspect => "inspect",
            Self::Convert => "convert",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub file: String,
    pub stage: Stage,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl Failure {
    #[must_use]
    pub fn from_error(stage: Stage, err: &EngineError) -> Self {
        Self {
            file: err.file().unwrap_or_default().to_string(),
            stage,
            message: err.to_string(),
            exit_code: err.exit_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub file: String,
    pub stage: Stage,
    pub reason: String,
}

/// Per-pass outcomes collected while the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcomes {
    pub failures: Vec<Failure>,
    pub skipped: Vec<Skip>,
}

impl Outcomes {
    pub(crate) fn fail(&mut self, stage: Stage, err: &EngineError) {
        self.failures.push(Failure::from_error(stage, err));
    }

    pub(crate) fn skip(&mut self, stage: Stage, file: &str, reason: impl Into<String>) {
        self.skipped.push(Skip {
            file: file.to_string(),
            stage,
            reason: reason.into(),
        });
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.failures.extend(other.failures);
        self.skipped.extend(other.skipped);
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub directory: PathBuf,
    pub target_encoding: String,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub files: Vec<FileRecord>,
    pub failures: Vec<Failure>,
    pub skipped: Vec<Skip>,
}

impl RunReport {
    #[must_use]
    pub fn renamed(&self) -> usize {
        self.files.iter().filter(|f| f.renamed_from.is_some()).count()
    }

    #[must_use]
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.converted).count()
    }

    #[must_use]
    pub fn already_conforming(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.state == RecordState::ConversionNotNeeded)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
