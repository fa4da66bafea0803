use super::schema::ToolSchema;
use crate::tools::traits::Tool;
use serde_json::{Value, json};
use std::sync::Arc;

/// What the reasoning service is told about a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolContract {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: ToolSchema,
}

impl ToolContract {
    pub fn new(name: &'static str, description: &'static str, schema: ToolSchema) -> Self {
        Self {
            name,
            description,
            schema,
        }
    }

    /// API-facing spec: `{name, description, input_schema}`
    pub fn spec(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.schema.to_json(),
        })
    }
}

#[derive(Clone)]
pub struct ToolRegistration {
    contract: Arc<ToolContract>,
    handler: Arc<dyn Tool>,
}

impl ToolRegistration {
    pub fn from_tool(contract: ToolContract, tool: Arc<dyn Tool>) -> Self {
        Self {
            contract: Arc::new(contract),
            handler: tool,
        }
    }

    pub fn from_tool_instance<T>(contract: ToolContract, tool: T) -> Self
    where
        T: Tool + 'static,
    {
        Self::from_tool(contract, Arc::new(tool))
    }

    pub fn name(&self) -> &'static str {
        self.contract.name
    }

    pub fn contract(&self) -> &ToolContract {
        &self.contract
    }

    pub fn handler(&self) -> Arc<dyn Tool> {
        Arc::clone(&self.handler)
    }
}
