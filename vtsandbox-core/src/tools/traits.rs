//! Core trait for tools exposed through the registry

use super::types::ToolOutput;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A tool the reasoning service can call by name
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with already validated arguments
    async fn execute(&self, args: Value) -> Result<ToolOutput>;

    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;
}
