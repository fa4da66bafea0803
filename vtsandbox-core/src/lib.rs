//! # vtsandbox-core - tool execution sandbox for terminal coding agents
//!
//! `vtsandbox-core` is the part of a coding agent that touches the local
//! filesystem on behalf of a language model. The model asks for a tool by
//! name, the sandbox validates the request, runs it inside the workspace
//! boundary and returns a bounded text result.
//!
//! ## Architecture Overview
//!
//! - `tools::path_guard`: resolves every path against the workspace root,
//!   `.toolignore` patterns and the allowed-folder list.
//! - `tools::output`: keeps every result inside a character budget.
//! - `tools::editor`: `str_replace_editor` with diff previews, two-phase
//!   commit and single-slot undo backed by `.backups`.
//! - `tools::file_search`: `file_content_search` for fuzzy filename and
//!   literal content search.
//! - `tools::registry`: tool contracts, typed argument validation and
//!   dispatch into structured results.
//! - `core::session`: [`SandboxSession`], which owns all of the above and
//!   settles pending confirmations through a [`Confirmer`].
//! - `config/`: `vtsandbox.toml` loading and defaults.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use vtsandbox_core::{AutoApprove, ConfigManager, SandboxSession, ToolCall};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let workspace = std::env::current_dir()?;
//!     let config = ConfigManager::load_from_workspace(&workspace)?.into_config();
//!     let session = SandboxSession::new(&workspace, config)?;
//!
//!     let call = ToolCall::new(
//!         "call-1",
//!         "str_replace_editor",
//!         json!({"command": "view", "path": "README.md"}),
//!     );
//!     let result = session.handle(&call, &mut AutoApprove).await;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod tools;
pub mod ui;
pub mod utils;

pub use config::{ConfigManager, SandboxConfig};
pub use crate::core::{AutoApprove, AutoReject, Confirmer, SandboxSession};
pub use tools::{
    AccessPolicy, EditorError, Finder, OutputGovernor, PathError, PathGuard, TextEditor, Tool,
    ToolCall, ToolOutput, ToolRegistry, ToolResult, ValidatedPath,
};
pub use ui::DialoguerConfirmer;
