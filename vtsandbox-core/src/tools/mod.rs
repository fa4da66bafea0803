//! Sandboxed tools and the machinery that dispatches them
//!
//! Every filesystem path goes through [`PathGuard`]; every result passes
//! through [`OutputGovernor`] before it leaves the registry.

pub mod editor;
pub mod file_search;
pub mod fuzzy;
pub mod output;
pub mod path_guard;
pub mod registry;
pub mod traits;
pub mod types;

pub use editor::{EditRequest, EditorError, TextEditor, TextEditorTool};
pub use file_search::{ContentMatch, ContextLine, Finder, SearchMatch, SearchTool};
pub use output::OutputGovernor;
pub use path_guard::{AccessPolicy, PathError, PathGuard, ValidatedPath};
pub use registry::{ToolContract, ToolErrorType, ToolExecutionError, ToolRegistration, ToolRegistry};
pub use traits::Tool;
pub use types::{ToolCall, ToolOutput, ToolResult};
