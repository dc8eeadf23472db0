//! In-process fakes for the tool ports.

use crate::error::ToolError;
use crate::ports::{EncodingConverter, EncodingDetector};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Answers by file name; unknown names fail with exit status 1.
#[derive(Default)]
pub struct ScriptedDetector {
    labels: HashMap<String, String>,
    failures: Mutex<HashMap<String, ToolError>>,
    calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, name: &str, label: &str) -> Self {
        self.labels.insert(name.to_string(), label.to_string());
        self
    }

    pub fn failure(self, name: &str, err: ToolError) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(name.to_string(), err);
        }
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl EncodingDetector for ScriptedDetector {
    fn detect(&self, path: &Path) -> Result<String, ToolError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        let name = file_name(path);
        if let Some(err) = self.failures.lock().unwrap().remove(&name) {
            return Err(err);
        }
        self.labels.get(&name).cloned().ok_or(ToolError::Exit {
            code: Some(1),
            stderr: format!("no label scripted for {name}"),
        })
    }
}

/// Succeeds unless the file name was scripted to fail with an exit status.
#[derive(Default)]
pub struct ScriptedConverter {
    failing: HashMap<String, i32>,
    calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(mut self, name: &str, code: i32) -> Self {
        self.failing.insert(name.to_string(), code);
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn converted_names(&self) -> Vec<String> {
        self.calls().iter().map(|p| file_name(p)).collect()
    }
}

impl EncodingConverter for ScriptedConverter {
    fn convert(&self, path: &Path) -> Result<(), ToolError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        match self.failing.get(&file_name(path)) {
            Some(code) => Err(ToolError::Exit {
                code: Some(*code),
                stderr: String::new(),
            }),
            None => Ok(()),
        }
    }
}
