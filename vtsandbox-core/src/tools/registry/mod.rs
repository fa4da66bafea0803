//! Tool directory: contracts, argument validation and dispatch

mod builtins;
mod declarations;
mod error;
mod registration;
mod schema;

pub use builtins::register_builtin_tools;
pub use error::{ToolErrorType, ToolExecutionError, classify_error};
pub use registration::{ToolContract, ToolRegistration};
pub use schema::{ParameterKind, ParameterSpec, ToolSchema};

use super::output::OutputGovernor;
use super::types::{ToolCall, ToolOutput, ToolResult};
use crate::config::OutputConfig;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct ToolRegistry {
    tool_registrations: Vec<ToolRegistration>,
    tool_lookup: HashMap<&'static str, usize>,
    max_result_chars: usize,
}

impl ToolRegistry {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            tool_registrations: Vec::new(),
            tool_lookup: HashMap::new(),
            max_result_chars: output.max_result_chars,
        }
    }

    /// Add a tool. A later registration under the same name replaces the earlier one.
    pub fn register_tool(&mut self, registration: ToolRegistration) {
        let name = registration.name();
        match self.tool_lookup.get(name) {
            Some(&index) => {
                debug!(tool = name, "replacing registered tool");
                self.tool_registrations[index] = registration;
            }
            None => {
                self.tool_lookup.insert(name, self.tool_registrations.len());
                self.tool_registrations.push(registration);
            }
        }
    }

    pub fn available_tools(&self) -> Vec<String> {
        self.tool_registrations
            .iter()
            .map(|registration| registration.name().to_string())
            .collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_lookup.contains_key(name)
    }

    pub fn contract(&self, name: &str) -> Option<&ToolContract> {
        self.registration(name).map(ToolRegistration::contract)
    }

    pub fn contracts(&self) -> Vec<&ToolContract> {
        self.tool_registrations
            .iter()
            .map(ToolRegistration::contract)
            .collect()
    }

    /// Specs in registration order, ready for the reasoning service
    pub fn tool_specs(&self) -> Vec<Value> {
        self.tool_registrations
            .iter()
            .map(|registration| registration.contract().spec())
            .collect()
    }

    fn registration(&self, name: &str) -> Option<&ToolRegistration> {
        self.tool_lookup
            .get(name)
            .and_then(|index| self.tool_registrations.get(*index))
    }

    /// Validate and run a tool, returning its output or a structured error.
    ///
    /// Completed content is bounded by `max_result_chars`; pending previews are not.
    pub async fn execute_tool(
        &self,
        name: &str,
        args: Value,
    ) -> Result<ToolOutput, ToolExecutionError> {
        let registration = self.registration(name).ok_or_else(|| {
            ToolExecutionError::new(
                name.to_string(),
                ToolErrorType::ToolNotFound,
                format!("Unknown tool: {}", name),
            )
        })?;

        registration
            .contract()
            .schema
            .validate(&args)
            .map_err(|message| {
                ToolExecutionError::new(name.to_string(), ToolErrorType::InvalidParameters, message)
            })?;

        let handler = registration.handler();
        match handler.execute(args).await {
            // A preview is shown in full: approving it commits the whole change
            Ok(output) if output.pending.is_some() => Ok(output),
            Ok(output) => Ok(ToolOutput {
                content: OutputGovernor::truncate_text(&output.content, self.max_result_chars),
                pending: None,
            }),
            Err(err) => Err(ToolExecutionError::from_handler(name, &err)),
        }
    }

    /// Dispatch a call. Never fails: errors become results with `is_error` set.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        match self.execute_tool(&call.name, call.input.clone()).await {
            Ok(output) => ToolResult {
                tool_use_id: call.id.clone(),
                content: output.content,
                is_error: false,
                pending_confirmation: output.pending,
            },
            Err(error) => {
                warn!(
                    tool = %error.tool_name,
                    error_type = ?error.error_type,
                    message = %error.message,
                    "tool call failed"
                );
                ToolResult::error(&call.id, &error.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::traits::Tool;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;

    const CUSTOM_TOOL_NAME: &str = "custom_test_tool";

    struct EchoTool {
        prefix: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, args: Value) -> Result<ToolOutput> {
            Ok(ToolOutput::completed(format!("{}{}", self.prefix, args["input"])))
        }

        fn name(&self) -> &'static str {
            CUSTOM_TOOL_NAME
        }

        fn description(&self) -> &'static str {
            "Custom echo tool for testing"
        }
    }

    struct PreviewTool;

    #[async_trait]
    impl Tool for PreviewTool {
        async fn execute(&self, args: Value) -> Result<ToolOutput> {
            let size = args["size"].as_u64().unwrap_or(0) as usize;
            Ok(ToolOutput::pending("+".repeat(size), "edit-1"))
        }

        fn name(&self) -> &'static str {
            "preview_tool"
        }

        fn description(&self) -> &'static str {
            "Returns a pending preview of the requested size"
        }
    }

    fn echo_registration(prefix: &'static str) -> ToolRegistration {
        let schema = ToolSchema::new()
            .parameter("input", ParameterSpec::string("Text to echo"))
            .required(&["input"]);
        ToolRegistration::from_tool_instance(
            ToolContract::new(CUSTOM_TOOL_NAME, "Echo", schema),
            EchoTool { prefix },
        )
    }

    #[tokio::test]
    async fn last_registration_wins() {
        let mut registry = ToolRegistry::new(&OutputConfig::default());
        registry.register_tool(echo_registration("first:"));
        registry.register_tool(echo_registration("second:"));

        assert_eq!(registry.available_tools(), vec![CUSTOM_TOOL_NAME.to_string()]);
        let result = registry
            .execute(&ToolCall::new("1", CUSTOM_TOOL_NAME, json!({"input": "hi"})))
            .await;
        assert!(!result.is_error);
        assert_eq!(result.content, "second:\"hi\"");
    }

    #[tokio::test]
    async fn unknown_tool_is_structured_error() {
        let registry = ToolRegistry::new(&OutputConfig::default());
        let error = registry
            .execute_tool("missing", json!({}))
            .await
            .unwrap_err();
        assert_eq!(error.error_type, ToolErrorType::ToolNotFound);

        let result = registry.execute(&ToolCall::new("7", "missing", json!({}))).await;
        assert!(result.is_error);
        assert_eq!(result.tool_use_id, "7");
        assert_eq!(result.content, "Error: Unknown tool: missing");
    }

    #[tokio::test]
    async fn output_is_bounded() {
        let mut registry = ToolRegistry::new(&OutputConfig {
            max_result_chars: 200,
        });
        registry.register_tool(echo_registration(""));

        let result = registry
            .execute(&ToolCall::new(
                "1",
                CUSTOM_TOOL_NAME,
                json!({"input": "x".repeat(1_000)}),
            ))
            .await;
        assert!(result.content.chars().count() <= 200);
        assert!(result.content.contains("[Output truncated to 200 characters."));
    }

    #[tokio::test]
    async fn pending_previews_are_not_truncated() {
        let mut registry = ToolRegistry::new(&OutputConfig {
            max_result_chars: 200,
        });
        let schema = ToolSchema::new().parameter("size", ParameterSpec::integer("Preview size"));
        registry.register_tool(ToolRegistration::from_tool_instance(
            ToolContract::new("preview_tool", "Preview", schema),
            PreviewTool,
        ));

        let result = registry
            .execute(&ToolCall::new("1", "preview_tool", json!({"size": 5_000})))
            .await;
        assert!(!result.is_error);
        assert_eq!(result.pending_confirmation.as_deref(), Some("edit-1"));
        assert_eq!(result.content.chars().count(), 5_000);
        assert!(!result.content.contains("[Output truncated"));
    }
}
