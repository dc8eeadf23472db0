use serde::{Deserialize, Serialize};

/// Where a file stands in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    #[default]
    Enumerated,
    Inspected,
    DetectionFailed,
    ConversionNotNeeded,
    Converted,
    ConversionFailed,
}

/// One regular file found at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Current file name, relative to the scanned directory.
    pub name: String,
    pub reported_encoding: Option<String>,
    pub converted: bool,
    /// Name before the extension pass, if it renamed this file.
    pub renamed_from: Option<String>,
    pub state: RecordState,
}

impl FileRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reported_encoding: None,
            converted: false,
            renamed_from: None,
            state: RecordState::Enumerated,
        }
    }

    pub(crate) fn rename(&mut self, new_name: String) {
        let old = std::mem::replace(&mut self.name, new_name);
        // Keep the enumeration-time name across repeated passes.
        if self.renamed_from.is_none() {
            self.renamed_from = Some(old);
        }
    }
}

/// Files of one run, in enumeration order.
///
/// Records are only ever mutated after construction; nothing is added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingSet {
    records: Vec<FileRecord>,
}

impl WorkingSet {
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: names.into_iter().map(FileRecord::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, FileRecord> {
        self.records.iter_mut()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
