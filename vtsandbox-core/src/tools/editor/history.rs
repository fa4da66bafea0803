use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    Create,
    StrReplace,
    Insert,
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditOperation::Create => "create",
            EditOperation::StrReplace => "str_replace",
            EditOperation::Insert => "insert",
        };
        f.write_str(name)
    }
}

/// The most recent mutation of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub operation: EditOperation,
    /// Copy of the pre-image in the backup store
    pub backup_path: Option<PathBuf>,
    pub old_content: Option<String>,
    pub new_content: String,
}

/// One undo slot per path; a new edit replaces the previous record
#[derive(Debug, Default)]
pub struct EditHistory {
    records: HashMap<PathBuf, EditRecord>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &Path, record: EditRecord) {
        self.records.insert(path.to_path_buf(), record);
    }

    pub fn get(&self, path: &Path) -> Option<&EditRecord> {
        self.records.get(path)
    }

    /// Remove and return the record so it cannot be undone twice
    pub fn take(&mut self, path: &Path) -> Option<EditRecord> {
        self.records.remove(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(new_content: &str) -> EditRecord {
        EditRecord {
            operation: EditOperation::StrReplace,
            backup_path: None,
            old_content: Some("old".to_string()),
            new_content: new_content.to_string(),
        }
    }

    #[test]
    fn later_edit_replaces_slot() {
        let mut history = EditHistory::new();
        let path = Path::new("/repo/a.txt");
        history.record(path, record("first"));
        history.record(path, record("second"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(path).unwrap().new_content, "second");
    }

    #[test]
    fn take_consumes_record() {
        let mut history = EditHistory::new();
        let path = Path::new("/repo/a.txt");
        history.record(path, record("first"));

        assert!(history.take(path).is_some());
        assert!(history.take(path).is_none());
        assert!(history.is_empty());
    }
}
