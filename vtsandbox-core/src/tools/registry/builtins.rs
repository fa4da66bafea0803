use super::ToolRegistry;
use super::declarations::{search_contract, text_editor_contract};
use super::registration::ToolRegistration;
use crate::tools::editor::{TextEditor, TextEditorTool};
use crate::tools::file_search::{Finder, SearchTool};
use parking_lot::Mutex;
use std::sync::Arc;

pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    editor: Arc<Mutex<TextEditor>>,
    finder: Finder,
) {
    for registration in builtin_tool_registrations(editor, finder) {
        registry.register_tool(registration);
    }
}

pub(super) fn builtin_tool_registrations(
    editor: Arc<Mutex<TextEditor>>,
    finder: Finder,
) -> Vec<ToolRegistration> {
    vec![
        ToolRegistration::from_tool_instance(text_editor_contract(), TextEditorTool::new(editor)),
        ToolRegistration::from_tool_instance(search_contract(), SearchTool::new(finder)),
    ]
}
