//! Typed parameter schemas checked before any handler runs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::String => "string",
            ParameterKind::Integer => "integer",
            ParameterKind::Number => "number",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Array => "array",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParameterKind::String => value.is_string(),
            ParameterKind::Integer => value.is_i64() || value.is_u64(),
            ParameterKind::Number => value.is_number(),
            ParameterKind::Boolean => value.is_boolean(),
            ParameterKind::Array => value.is_array(),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    /// Element kind for arrays
    pub items: Option<ParameterKind>,
    pub enum_values: Option<Vec<&'static str>>,
    pub description: &'static str,
    pub default: Option<Value>,
}

impl ParameterSpec {
    pub fn new(kind: ParameterKind, description: &'static str) -> Self {
        Self {
            kind,
            items: None,
            enum_values: None,
            description,
            default: None,
        }
    }

    pub fn string(description: &'static str) -> Self {
        Self::new(ParameterKind::String, description)
    }

    pub fn integer(description: &'static str) -> Self {
        Self::new(ParameterKind::Integer, description)
    }

    pub fn boolean(description: &'static str) -> Self {
        Self::new(ParameterKind::Boolean, description)
    }

    pub fn array_of(items: ParameterKind, description: &'static str) -> Self {
        Self {
            items: Some(items),
            ..Self::new(ParameterKind::Array, description)
        }
    }

    pub fn with_enum(mut self, values: &[&'static str]) -> Self {
        self.enum_values = Some(values.to_vec());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".into(), json!(self.kind.as_str()));
        object.insert("description".into(), json!(self.description));
        if let Some(items) = self.items {
            object.insert("items".into(), json!({ "type": items.as_str() }));
        }
        if let Some(values) = &self.enum_values {
            object.insert("enum".into(), json!(values));
        }
        if let Some(default) = &self.default {
            object.insert("default".into(), default.clone());
        }
        Value::Object(object)
    }

    fn check(&self, name: &str, value: &Value) -> Result<(), String> {
        if !self.kind.accepts(value) {
            return Err(format!(
                "Invalid type for parameter '{}': expected {}",
                name, self.kind
            ));
        }

        if let (Some(items), Some(elements)) = (self.items, value.as_array()) {
            if let Some(position) = elements.iter().position(|element| !items.accepts(element)) {
                return Err(format!(
                    "Invalid element at index {} of parameter '{}': expected {}",
                    position, name, items
                ));
            }
        }

        if let (Some(values), Some(text)) = (&self.enum_values, value.as_str()) {
            if !values.contains(&text) {
                return Err(format!(
                    "Invalid value '{}' for parameter '{}': expected one of {}",
                    text,
                    name,
                    values.join(", ")
                ));
            }
        }

        Ok(())
    }
}

/// Ordered parameter set plus the names that must be present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSchema {
    parameters: IndexMap<&'static str, ParameterSpec>,
    required: Vec<&'static str>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameter(mut self, name: &'static str, spec: ParameterSpec) -> Self {
        self.parameters.insert(name, spec);
        self
    }

    pub fn required(mut self, names: &[&'static str]) -> Self {
        self.required = names.to_vec();
        self
    }

    pub fn parameters(&self) -> &IndexMap<&'static str, ParameterSpec> {
        &self.parameters
    }

    pub fn required_parameters(&self) -> &[&'static str] {
        &self.required
    }

    /// JSON schema object for the `input_schema` field of a tool spec
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.to_json()))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }

    /// Check `args` against the schema, naming the first offending parameter.
    ///
    /// `null` counts as absent.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        let object = args
            .as_object()
            .ok_or_else(|| "Invalid arguments: expected a JSON object".to_string())?;

        for name in object.keys() {
            if !self.parameters.contains_key(name.as_str()) {
                return Err(format!("Invalid parameter '{}': not accepted by this tool", name));
            }
        }

        for name in &self.required {
            if object.get(*name).is_none_or(Value::is_null) {
                return Err(format!("Missing required parameter '{}'", name));
            }
        }

        for (name, value) in object {
            if value.is_null() {
                continue;
            }
            if let Some(spec) = self.parameters.get(name.as_str()) {
                spec.check(name, value)?;
            }
        }

        Ok(())
    }
}
