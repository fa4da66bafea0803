//! Text editing engine behind `str_replace_editor`
//!
//! Mutating commands are two-phase: [`TextEditor::propose`] computes the
//! change and a preview without touching disk, [`TextEditor::commit`] applies
//! it after re-checking that the file still matches what the preview showed.
//! Each path keeps only its most recent edit for undo.

mod backup;
mod diff;
mod history;
mod pending;
mod tool;

pub use backup::BackupStore;
pub use diff::unified_diff;
pub use history::{EditHistory, EditOperation, EditRecord};
pub use pending::{PendingChange, PreImage, Proposal};
pub use tool::TextEditorTool;

use super::output::OutputGovernor;
use super::path_guard::{PathError, PathGuard, ValidatedPath};
use crate::config::{EditorConfig, SandboxConfig};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("File '{path}' not found")]
    NotFound { path: String },

    #[error("The text to replace was not found in the file")]
    TextNotFound,

    #[error("File '{path}' is not valid UTF-8 text")]
    NotUtf8 { path: String },

    #[error("File '{path}' already exists")]
    AlreadyExists { path: String },

    #[error(
        "The text to replace was found multiple times ({count}). Please provide more context to make the replacement unique."
    )]
    AmbiguousMatch { count: usize },

    #[error("Invalid insert_line {line}. File has {line_count} lines.")]
    InvalidLine { line: i64, line_count: usize },

    #[error("Invalid view_range [{start}, {end}]. File has {line_count} lines.")]
    InvalidRange {
        start: i64,
        end: i64,
        line_count: usize,
    },

    #[error("No previous edits found for '{path}'")]
    NoHistory { path: String },

    #[error("Could not undo changes to '{path}'. No backup or stored content available.")]
    UndoUnavailable { path: String },

    #[error("No pending change with token '{token}'")]
    UnknownProposal { token: String },

    #[error("'{path}' changed after the edit was proposed; propose it again")]
    StaleProposal { path: String },

    #[error("{name} parameter is required")]
    MissingParameter { name: &'static str },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A decoded editor command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    View {
        path: String,
        view_range: Option<(i64, i64)>,
    },
    StrReplace {
        path: String,
        old_str: String,
        new_str: String,
    },
    Create {
        path: String,
        file_text: String,
    },
    Insert {
        path: String,
        insert_line: i64,
        new_str: String,
    },
    UndoEdit {
        path: String,
    },
}

#[derive(Debug)]
pub struct TextEditor {
    guard: Arc<PathGuard>,
    config: EditorConfig,
    backups: BackupStore,
    history: EditHistory,
    pending: HashMap<String, PendingChange>,
    next_token: u64,
}

impl TextEditor {
    pub fn new(guard: Arc<PathGuard>, config: EditorConfig) -> Self {
        let backup_dir = SandboxConfig::resolve_path(guard.repo_root(), &config.backup_dir);
        Self {
            guard,
            config,
            backups: BackupStore::new(backup_dir),
            history: EditHistory::new(),
            pending: HashMap::new(),
            next_token: 1,
        }
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    pub fn pending(&self, token: &str) -> Option<&PendingChange> {
        self.pending.get(token)
    }

    /// Run a read-only command or compute a mutation awaiting commit
    pub fn propose(&mut self, request: EditRequest) -> Result<Proposal, EditorError> {
        match request {
            EditRequest::View { path, view_range } => {
                let path = self.guard.validate(&path)?;
                self.view(&path, view_range).map(Proposal::Completed)
            }
            EditRequest::StrReplace {
                path,
                old_str,
                new_str,
            } => {
                let path = self.guard.validate(&path)?;
                self.propose_replace(path, &old_str, &new_str)
                    .map(Proposal::Pending)
            }
            EditRequest::Create { path, file_text } => {
                let path = self.guard.validate(&path)?;
                self.propose_create(path, file_text).map(Proposal::Pending)
            }
            EditRequest::Insert {
                path,
                insert_line,
                new_str,
            } => {
                let path = self.guard.validate(&path)?;
                self.propose_insert(path, insert_line, &new_str)
                    .map(Proposal::Pending)
            }
            EditRequest::UndoEdit { path } => {
                let path = self.guard.validate(&path)?;
                self.undo(&path).map(Proposal::Completed)
            }
        }
    }

    /// Apply a pending change if the file still matches its pre-image
    pub fn commit(&mut self, token: &str) -> Result<String, EditorError> {
        let change = self
            .pending
            .remove(token)
            .ok_or_else(|| EditorError::UnknownProposal {
                token: token.to_string(),
            })?;
        let display = self.guard.display_path(&change.path);

        match &change.expected {
            PreImage::Absent => {
                if change.path.exists() {
                    return Err(EditorError::StaleProposal { path: display });
                }
                self.create_parent_dirs(&change.path)?;
                write_file(&change.path, &change.new_content)?;
                self.history.record(
                    &change.path,
                    EditRecord {
                        operation: change.operation,
                        backup_path: None,
                        old_content: None,
                        new_content: change.new_content.clone(),
                    },
                );
            }
            PreImage::Content(expected) => {
                let current = match fs::read(change.path.as_path()) {
                    Ok(bytes) => bytes,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        return Err(EditorError::StaleProposal { path: display });
                    }
                    Err(source) => {
                        return Err(EditorError::Io {
                            path: display,
                            source,
                        });
                    }
                };
                if current != expected.as_bytes() {
                    return Err(EditorError::StaleProposal { path: display });
                }

                let backup_path =
                    self.backups
                        .save(&change.path, expected)
                        .map_err(|source| EditorError::Io {
                            path: self.backups.slot_for(&change.path).display().to_string(),
                            source,
                        })?;
                write_file(&change.path, &change.new_content)?;
                self.history.record(
                    &change.path,
                    EditRecord {
                        operation: change.operation,
                        backup_path: Some(backup_path),
                        old_content: Some(expected.clone()),
                        new_content: change.new_content.clone(),
                    },
                );
            }
        }

        info!(path = %change.path, operation = %change.operation, "edit committed");
        Ok(change.success_message)
    }

    /// Drop a pending change without writing anything
    pub fn reject(&mut self, token: &str) -> Result<(), EditorError> {
        match self.pending.remove(token) {
            Some(change) => {
                debug!(path = %change.path, operation = %change.operation, "edit rejected");
                Ok(())
            }
            None => Err(EditorError::UnknownProposal {
                token: token.to_string(),
            }),
        }
    }

    fn view(
        &self,
        path: &ValidatedPath,
        view_range: Option<(i64, i64)>,
    ) -> Result<String, EditorError> {
        if path.is_dir() {
            return self.list_directory(path);
        }

        let content = self.read_existing(path)?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let total = lines.len();
        let max_lines = self.config.max_view_lines.max(1);

        let mut output = String::new();
        match view_range {
            Some((start, end)) => {
                let start_line = start.max(1);
                let end_line = if end == -1 {
                    (total as i64).max(start_line)
                } else {
                    end
                };
                if end_line < start_line || start_line as usize > total.max(1) {
                    return Err(EditorError::InvalidRange {
                        start,
                        end,
                        line_count: total,
                    });
                }

                let start_line = start_line as usize;
                let requested_end = (end_line as usize).min(start_line + max_lines - 1);
                let end_line = requested_end.min(total);

                for (index, line) in lines
                    .iter()
                    .enumerate()
                    .take(end_line)
                    .skip(start_line - 1)
                {
                    output.push_str(&format!("{}: {}", index + 1, line));
                }

                if start_line > 1 || end_line < total {
                    output.push_str(&format!(
                        "\n(Showing lines {start_line} to {end_line} of {total} total lines)"
                    ));
                    output.push_str(&format!(
                        "\n(Maximum view limit is {max_lines} lines at a time)"
                    ));
                }
            }
            None => {
                for (index, line) in lines.iter().enumerate().take(max_lines) {
                    output.push_str(&format!("{}: {}", index + 1, line));
                }
                if total > max_lines {
                    output.push_str(&format!(
                        "\n(Showing first {max_lines} lines of {total} total lines)"
                    ));
                    output.push_str(&format!(
                        "\n(Maximum view limit is {max_lines} lines at a time)"
                    ));
                }
            }
        }

        Ok(output)
    }

    fn list_directory(&self, path: &ValidatedPath) -> Result<String, EditorError> {
        let display = self.guard.display_path(path);
        let io_error = |source: io::Error| EditorError::Io {
            path: display.clone(),
            source,
        };

        let mut directories = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(path).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let entry_path = entry.path();
            if self.guard.is_ignored(&entry_path) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry_path.is_dir() {
                directories.push(format!("{name}/"));
            } else {
                let size = entry.metadata().map(|meta| meta.len()).unwrap_or(0);
                files.push((name, size));
            }
        }
        directories.sort();
        files.sort();

        let mut listing = format!("Directory listing for: {display}\n\n");
        if !directories.is_empty() {
            listing.push_str("Directories:\n");
            for directory in &directories {
                listing.push_str(&format!("- {directory}\n"));
            }
            listing.push('\n');
        }
        if !files.is_empty() {
            listing.push_str("Files:\n");
            for (name, size) in &files {
                listing.push_str(&format!(
                    "- {} ({})\n",
                    name,
                    OutputGovernor::format_size(*size)
                ));
            }
        }
        if directories.is_empty() && files.is_empty() {
            listing.push_str("Directory is empty or all items are ignored by .toolignore");
        }

        Ok(OutputGovernor::truncate_text(
            &listing,
            self.config.listing_max_chars,
        ))
    }

    fn propose_replace(
        &mut self,
        path: ValidatedPath,
        old_str: &str,
        new_str: &str,
    ) -> Result<PendingChange, EditorError> {
        if old_str.is_empty() {
            return Err(EditorError::MissingParameter { name: "old_str" });
        }

        let content = self.read_existing(&path)?;
        let count = content.matches(old_str).count();
        match count {
            0 => return Err(EditorError::TextNotFound),
            1 => {}
            count => return Err(EditorError::AmbiguousMatch { count }),
        }

        let new_content = content.replacen(old_str, new_str, 1);
        let display = self.guard.display_path(&path);
        let diff = unified_diff(
            &content,
            &new_content,
            &display,
            self.config.diff_context_lines,
        );

        Ok(self.stage(PendingChange {
            token: String::new(),
            path,
            operation: EditOperation::StrReplace,
            preview: diff::change_preview(&diff),
            new_content,
            expected: PreImage::Content(content),
            success_message: "Successfully replaced text at exactly one location.".to_string(),
        }))
    }

    fn propose_create(
        &mut self,
        path: ValidatedPath,
        file_text: String,
    ) -> Result<PendingChange, EditorError> {
        let display = self.guard.display_path(&path);
        if path.exists() {
            return Err(EditorError::AlreadyExists { path: display });
        }

        Ok(self.stage(PendingChange {
            token: String::new(),
            preview: diff::creation_preview(
                &display,
                &file_text,
                self.config.create_preview_chars,
            ),
            success_message: format!("Successfully created file '{display}'."),
            path,
            operation: EditOperation::Create,
            new_content: file_text,
            expected: PreImage::Absent,
        }))
    }

    fn propose_insert(
        &mut self,
        path: ValidatedPath,
        insert_line: i64,
        new_str: &str,
    ) -> Result<PendingChange, EditorError> {
        let content = self.read_existing(&path)?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        if insert_line < 0 || insert_line as usize > lines.len() {
            return Err(EditorError::InvalidLine {
                line: insert_line,
                line_count: lines.len(),
            });
        }

        let split = insert_line as usize;
        let mut new_content = lines[..split].concat();
        if !new_content.is_empty() && !new_content.ends_with('\n') {
            new_content.push('\n');
        }
        new_content.push_str(new_str);
        new_content.push('\n');
        new_content.push_str(&lines[split..].concat());

        let display = self.guard.display_path(&path);
        let diff = unified_diff(
            &content,
            &new_content,
            &display,
            self.config.diff_context_lines,
        );

        Ok(self.stage(PendingChange {
            token: String::new(),
            path,
            operation: EditOperation::Insert,
            preview: diff::change_preview(&diff),
            new_content,
            expected: PreImage::Content(content),
            success_message: format!("Successfully inserted text after line {insert_line}."),
        }))
    }

    fn stage(&mut self, mut change: PendingChange) -> PendingChange {
        change.token = format!("edit-{}", self.next_token);
        self.next_token += 1;
        debug!(token = %change.token, path = %change.path, "edit proposed");
        self.pending.insert(change.token.clone(), change.clone());
        change
    }

    fn undo(&mut self, path: &ValidatedPath) -> Result<String, EditorError> {
        let display = self.guard.display_path(path);
        let record = self
            .history
            .take(path)
            .ok_or_else(|| EditorError::NoHistory {
                path: display.clone(),
            })?;

        if record.operation == EditOperation::Create {
            match fs::remove_file(path.as_path()) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(EditorError::Io {
                        path: display,
                        source,
                    });
                }
            }
            info!(path = %path, "undid file creation");
            return Ok(format!(
                "Successfully undid file creation by deleting '{display}'."
            ));
        }

        if let Some(slot) = record.backup_path.as_deref() {
            if self.backups.is_owned_by(slot, path) {
                match self.backups.read(slot) {
                    Ok(content) => {
                        write_file(path, &content)?;
                        info!(path = %path, "restored from backup");
                        return Ok(format!(
                            "Successfully undid changes to '{display}' from backup."
                        ));
                    }
                    Err(err) => {
                        debug!(slot = %slot.display(), error = %err, "backup unreadable");
                    }
                }
            } else {
                debug!(slot = %slot.display(), "backup slot belongs to another file");
            }
        }

        match record.old_content {
            Some(content) => {
                write_file(path, &content)?;
                info!(path = %path, "restored from stored content");
                Ok(format!(
                    "Successfully undid changes to '{display}' from stored content."
                ))
            }
            None => Err(EditorError::UndoUnavailable { path: display }),
        }
    }

    /// Strictly decoded content; edits never rewrite bytes they cannot represent
    fn read_existing(&self, path: &ValidatedPath) -> Result<String, EditorError> {
        match fs::read(path.as_path()) {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| EditorError::NotUtf8 {
                path: self.guard.display_path(path),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(EditorError::NotFound {
                path: self.guard.display_path(path),
            }),
            Err(source) => Err(EditorError::Io {
                path: self.guard.display_path(path),
                source,
            }),
        }
    }

    /// Create missing ancestors of `path`, each checked against the guard first
    fn create_parent_dirs(&self, path: &Path) -> Result<(), EditorError> {
        let mut missing: Vec<PathBuf> = Vec::new();
        let mut current = path.parent();
        while let Some(directory) = current {
            if directory.exists() {
                break;
            }
            missing.push(directory.to_path_buf());
            current = directory.parent();
        }

        for directory in missing.iter().rev() {
            self.guard.validate(&directory.to_string_lossy())?;
            fs::create_dir(directory).map_err(|source| EditorError::Io {
                path: self.guard.display_path(directory),
                source,
            })?;
        }
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), EditorError> {
    fs::write(path, content).map_err(|source| EditorError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::path_guard::AccessPolicy;
    use crate::utils::ToolIgnore;
    use tempfile::TempDir;

    fn editor(root: &Path) -> TextEditor {
        let ignore = ToolIgnore::from_patterns(root, [".backups", "*.secret"]);
        let policy = AccessPolicy::new(root, &[], ignore).unwrap();
        TextEditor::new(Arc::new(PathGuard::new(policy)), EditorConfig::default())
    }

    fn pending(proposal: Proposal) -> PendingChange {
        match proposal {
            Proposal::Pending(change) => change,
            Proposal::Completed(text) => panic!("expected pending change, got {text}"),
        }
    }

    fn completed(proposal: Proposal) -> String {
        match proposal {
            Proposal::Completed(text) => text,
            Proposal::Pending(change) => panic!("expected completed result, got {}", change.token),
        }
    }

    #[test]
    fn propose_does_not_touch_disk() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "hello world\n").unwrap();
        let mut editor = editor(temp_dir.path());

        let change = pending(
            editor
                .propose(EditRequest::StrReplace {
                    path: "a.txt".into(),
                    old_str: "world".into(),
                    new_str: "there".into(),
                })
                .unwrap(),
        );

        assert_eq!(change.token, "edit-1");
        assert!(change.preview.starts_with("CONFIRM_EDIT\n\nProposed changes:"));
        assert!(change.preview.contains("+hello there"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello world\n");
        assert!(editor.history().is_empty());
    }

    #[test]
    fn commit_refuses_stale_pre_image() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\n").unwrap();
        let mut editor = editor(temp_dir.path());

        let change = pending(
            editor
                .propose(EditRequest::Insert {
                    path: "a.txt".into(),
                    insert_line: 1,
                    new_str: "two".into(),
                })
                .unwrap(),
        );
        fs::write(&file, "changed elsewhere\n").unwrap();

        let err = editor.commit(&change.token).unwrap_err();
        assert!(matches!(err, EditorError::StaleProposal { .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "changed elsewhere\n");

        // The token is spent either way
        assert!(matches!(
            editor.commit(&change.token),
            Err(EditorError::UnknownProposal { .. })
        ));
    }

    #[test]
    fn create_commit_fails_if_file_appeared() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor(temp_dir.path());

        let change = pending(
            editor
                .propose(EditRequest::Create {
                    path: "new.txt".into(),
                    file_text: "content".into(),
                })
                .unwrap(),
        );
        fs::write(temp_dir.path().join("new.txt"), "racer").unwrap();

        assert!(matches!(
            editor.commit(&change.token),
            Err(EditorError::StaleProposal { .. })
        ));
    }

    #[test]
    fn create_refuses_ignored_ancestor() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor(temp_dir.path());

        let err = editor
            .propose(EditRequest::Create {
                path: "vault.secret/inner/file.txt".into(),
                file_text: "x".into(),
            })
            .unwrap_err();
        assert!(matches!(err, EditorError::Path(PathError::Ignored { .. })));
        assert!(!temp_dir.path().join("vault.secret").exists());
    }

    #[test]
    fn create_makes_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor(temp_dir.path());

        let change = pending(
            editor
                .propose(EditRequest::Create {
                    path: "deep/nested/file.txt".into(),
                    file_text: "body".into(),
                })
                .unwrap(),
        );
        let message = editor.commit(&change.token).unwrap();

        assert_eq!(message, "Successfully created file 'deep/nested/file.txt'.");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("deep/nested/file.txt")).unwrap(),
            "body"
        );
    }

    #[test]
    fn reject_discards_change() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "x\n").unwrap();
        let mut editor = editor(temp_dir.path());

        let change = pending(
            editor
                .propose(EditRequest::StrReplace {
                    path: "a.txt".into(),
                    old_str: "x".into(),
                    new_str: "y".into(),
                })
                .unwrap(),
        );
        editor.reject(&change.token).unwrap();

        assert!(editor.pending(&change.token).is_none());
        assert!(matches!(
            editor.reject(&change.token),
            Err(EditorError::UnknownProposal { .. })
        ));
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "x\n");
    }

    #[test]
    fn undo_falls_back_when_slot_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/config.txt"), "alpha\n").unwrap();
        fs::write(root.join("b/config.txt"), "beta\n").unwrap();
        let mut editor = editor(root);

        for (path, old) in [("a/config.txt", "alpha"), ("b/config.txt", "beta")] {
            let change = pending(
                editor
                    .propose(EditRequest::StrReplace {
                        path: path.into(),
                        old_str: old.into(),
                        new_str: "edited".into(),
                    })
                    .unwrap(),
            );
            editor.commit(&change.token).unwrap();
        }

        let message = completed(
            editor
                .propose(EditRequest::UndoEdit {
                    path: "a/config.txt".into(),
                })
                .unwrap(),
        );
        assert_eq!(
            message,
            "Successfully undid changes to 'a/config.txt' from stored content."
        );
        assert_eq!(fs::read_to_string(root.join("a/config.txt")).unwrap(), "alpha\n");

        let message = completed(
            editor
                .propose(EditRequest::UndoEdit {
                    path: "b/config.txt".into(),
                })
                .unwrap(),
        );
        assert_eq!(
            message,
            "Successfully undid changes to 'b/config.txt' from backup."
        );
        assert_eq!(fs::read_to_string(root.join("b/config.txt")).unwrap(), "beta\n");
    }

    #[test]
    fn non_utf8_file_is_refused_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("latin1.txt");
        let original = b"name = \"caf\xe9\"\nvalue = 1\n".to_vec();
        fs::write(&file, &original).unwrap();
        let mut editor = editor(temp_dir.path());

        let err = editor
            .propose(EditRequest::StrReplace {
                path: "latin1.txt".into(),
                old_str: "value = 1".into(),
                new_str: "value = 2".into(),
            })
            .unwrap_err();
        assert!(matches!(err, EditorError::NotUtf8 { .. }));
        assert_eq!(err.to_string(), "File 'latin1.txt' is not valid UTF-8 text");

        let err = editor
            .propose(EditRequest::Insert {
                path: "latin1.txt".into(),
                insert_line: 0,
                new_str: "x".into(),
            })
            .unwrap_err();
        assert!(matches!(err, EditorError::NotUtf8 { .. }));

        assert_eq!(fs::read(&file).unwrap(), original);
        assert!(!temp_dir.path().join(".backups").exists());
        assert!(editor.history().is_empty());
    }

    #[test]
    fn insert_line_must_be_within_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\ntwo\n").unwrap();
        let mut editor = editor(temp_dir.path());

        for line in [-1, 3] {
            let err = editor
                .propose(EditRequest::Insert {
                    path: "a.txt".into(),
                    insert_line: line,
                    new_str: "x".into(),
                })
                .unwrap_err();
            assert!(matches!(err, EditorError::InvalidLine { .. }), "{line}");
            assert_eq!(
                err.to_string(),
                format!("Invalid insert_line {line}. File has 2 lines.")
            );
        }
        assert_eq!(fs::read_to_string(&file).unwrap(), "one\ntwo\n");

        // The last line itself is a valid insertion point
        assert!(editor
            .propose(EditRequest::Insert {
                path: "a.txt".into(),
                insert_line: 2,
                new_str: "x".into(),
            })
            .is_ok());
    }

    #[test]
    fn view_range_rejects_inverted_bounds() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "1\n2\n3\n").unwrap();
        let mut editor = editor(temp_dir.path());

        for range in [(3, 2), (10, -1)] {
            let err = editor
                .propose(EditRequest::View {
                    path: "a.txt".into(),
                    view_range: Some(range),
                })
                .unwrap_err();
            assert!(matches!(err, EditorError::InvalidRange { .. }), "{range:?}");
        }

        let text = completed(
            editor
                .propose(EditRequest::View {
                    path: "a.txt".into(),
                    view_range: Some((2, -1)),
                })
                .unwrap(),
        );
        assert_eq!(
            text,
            "2: 2\n3: 3\n\n(Showing lines 2 to 3 of 3 total lines)\n(Maximum view limit is 250 lines at a time)"
        );
    }

    #[test]
    fn directory_listing_groups_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join(".backups")).unwrap();
        fs::write(root.join("b.txt"), "12345").unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("key.secret"), "").unwrap();
        let mut editor = editor(root);

        let listing = completed(
            editor
                .propose(EditRequest::View {
                    path: ".".into(),
                    view_range: None,
                })
                .unwrap(),
        );
        assert_eq!(
            listing,
            "Directory listing for: .\n\nDirectories:\n- src/\n\nFiles:\n- a.txt (0.0 B)\n- b.txt (5.0 B)\n"
        );
    }
}
