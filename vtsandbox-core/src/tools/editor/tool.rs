use super::{EditRequest, EditorError, Proposal, TextEditor};
use crate::config::constants::{commands, tools};
use crate::tools::traits::Tool;
use crate::tools::types::ToolOutput;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct EditorInput {
    command: String,
    path: String,
    view_range: Option<Vec<i64>>,
    old_str: Option<String>,
    new_str: Option<String>,
    file_text: Option<String>,
    insert_line: Option<i64>,
    #[serde(default = "default_confirm")]
    confirm: bool,
}

fn default_confirm() -> bool {
    true
}

impl EditorInput {
    fn into_request(self) -> Result<EditRequest> {
        let request = match self.command.as_str() {
            commands::VIEW => {
                let view_range = match self.view_range {
                    None => None,
                    Some(range) => match range.as_slice() {
                        [start, end] => Some((*start, *end)),
                        _ => bail!("Invalid view_range: expected [start, end]"),
                    },
                };
                EditRequest::View {
                    path: self.path,
                    view_range,
                }
            }
            commands::STR_REPLACE => EditRequest::StrReplace {
                path: self.path,
                old_str: self
                    .old_str
                    .ok_or(EditorError::MissingParameter { name: "old_str" })?,
                new_str: self.new_str.unwrap_or_default(),
            },
            commands::CREATE => EditRequest::Create {
                path: self.path,
                file_text: self.file_text.unwrap_or_default(),
            },
            commands::INSERT => EditRequest::Insert {
                path: self.path,
                insert_line: self
                    .insert_line
                    .ok_or(EditorError::MissingParameter {
                        name: "insert_line",
                    })?,
                new_str: self.new_str.unwrap_or_default(),
            },
            commands::UNDO_EDIT => EditRequest::UndoEdit { path: self.path },
            other => bail!("Unknown command '{}'", other),
        };
        Ok(request)
    }
}

/// `str_replace_editor` tool sharing a [`TextEditor`] with the session.
///
/// With `confirm` set (the default) mutations come back as a preview plus a
/// commit token; otherwise they are committed within the same call.
#[derive(Clone)]
pub struct TextEditorTool {
    editor: Arc<Mutex<TextEditor>>,
}

impl TextEditorTool {
    pub fn new(editor: Arc<Mutex<TextEditor>>) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> Arc<Mutex<TextEditor>> {
        Arc::clone(&self.editor)
    }
}

#[async_trait]
impl Tool for TextEditorTool {
    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let input: EditorInput = serde_json::from_value(args).map_err(|err| {
            anyhow!("Invalid arguments for {}: {}", tools::STR_REPLACE_EDITOR, err)
        })?;
        let confirm = input.confirm;
        let command = input.command.clone();
        let request = input.into_request()?;

        let output = {
            let mut editor = self.editor.lock();
            match editor.propose(request)? {
                Proposal::Completed(content) => ToolOutput::completed(content),
                Proposal::Pending(change) if confirm => {
                    ToolOutput::pending(change.preview, change.token)
                }
                Proposal::Pending(change) => ToolOutput::completed(editor.commit(&change.token)?),
            }
        };

        info!(command = %command, pending = output.pending.is_some(), "editor command handled");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        tools::STR_REPLACE_EDITOR
    }

    fn description(&self) -> &'static str {
        "View, create and edit text files with diff confirmation and undo"
    }
}
