//! Types crossing the tool-call boundary

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation requested by the reasoning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default = "empty_input")]
    pub input: Value,
}

fn empty_input() -> Value {
    Value::Object(Default::default())
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// The bounded answer to a [`ToolCall`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
    /// Commit token when `content` is a confirmation preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_confirmation: Option<String>,
}

impl ToolResult {
    pub fn success(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
            pending_confirmation: None,
        }
    }

    pub fn error(tool_use_id: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: format!("Error: {}", message.as_ref()),
            is_error: true,
            pending_confirmation: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_confirmation.is_some()
    }
}

/// What a tool hands back to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: String,
    pub pending: Option<String>,
}

impl ToolOutput {
    pub fn completed(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pending: None,
        }
    }

    pub fn pending(content: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pending: Some(token.into()),
        }
    }
}
