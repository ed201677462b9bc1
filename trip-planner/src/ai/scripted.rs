//! Test double that replays canned model responses and records every request.

use crate::ai::types::{AiError, AiResponse, ToolCall, ToolHistoryEntry};
use crate::ai::{Message, ModelRunner};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One request as the runner received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tool_history: Vec<ToolHistoryEntry>,
    pub tools: Vec<ToolDefinition>,
}

impl RecordedRequest {
    pub fn system_prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }
}

pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<AiResponse, AiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedRunner {
    pub fn new(responses: Vec<Result<AiResponse, AiError>>) -> Self {
        ScriptedRunner {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Runner that answers each call with the given texts, in order
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(AiResponse::text(*t))).collect())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Convenience for building a scripted tool call
pub fn tool_call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

#[async_trait]
impl ModelRunner for ScriptedRunner {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate_with_tools(
        &self,
        messages: Vec<Message>,
        tool_history: Vec<ToolHistoryEntry>,
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages,
            tool_history,
            tools,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::new("scripted runner has no responses left")))
    }
}
