pub mod openai;
#[cfg(test)]
pub mod scripted;
pub mod types;

pub use openai::OpenAIClient;
pub use types::{AiError, AiResponse, ToolHistoryEntry, ToolResponse};

use crate::config::Config;
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// The inference backend an agent talks to.
///
/// Implementations send the conversation, any earlier tool rounds and the tool
/// definitions to a model and return what it said. Whether to call a tool is
/// the model's decision; executing the call is the caller's job.
#[async_trait]
pub trait ModelRunner: Send + Sync {
    /// Model identifier used for requests
    fn model_name(&self) -> &str;

    async fn generate_with_tools(
        &self,
        messages: Vec<Message>,
        tool_history: Vec<ToolHistoryEntry>,
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError>;
}

/// Create the model runner described by the configuration
pub fn runner_from_config(config: &Config) -> Result<Arc<dyn ModelRunner>, String> {
    let client = OpenAIClient::new(
        config.api_key.as_deref().unwrap_or(""),
        Some(config.endpoint.as_str()),
        Some(config.model.as_str()),
        Some(config.max_tokens),
    )?;
    Ok(Arc::new(client))
}
