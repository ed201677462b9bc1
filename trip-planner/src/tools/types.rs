use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// JSON Schema property definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        PropertySchema {
            schema_type: "string".to_string(),
            description: description.into(),
            default: None,
            enum_values: None,
        }
    }
}

/// Tool input schema using JSON Schema format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: vec![],
        }
    }
}

impl ToolInputSchema {
    /// Schema for a tool that takes a single required string parameter
    pub fn single_string(name: &str, description: &str) -> Self {
        let mut properties = HashMap::new();
        properties.insert(name.to_string(), PropertySchema::string(description));
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties,
            required: vec![name.to_string()],
        }
    }
}

/// Tool definition that gets sent to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// Result of a tool invocation.
///
/// Serialized exactly as the model sees it:
/// `{"status": "success", "report": ...}` or `{"status": "error", "error_message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success { report: String },
    Error { error_message: String },
}

impl ToolResult {
    pub fn success(report: impl Into<String>) -> Self {
        ToolResult::Success {
            report: report.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult::Error {
            error_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    /// The report or the error message, whichever this result carries
    pub fn text(&self) -> &str {
        match self {
            ToolResult::Success { report } => report,
            ToolResult::Error { error_message } => error_message,
        }
    }

    /// JSON payload handed back to the model as the tool response
    pub fn to_model_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.text().to_string())
    }
}

/// Context provided to tools during execution
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Pipeline run this invocation belongs to
    pub run_id: Option<String>,
    /// Agent that asked for the tool
    pub agent_name: Option<String>,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn with_agent(mut self, agent_name: impl Into<String>) -> Self {
        self.agent_name = Some(agent_name.into());
        self
    }
}
