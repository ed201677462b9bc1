use crate::ai::types::{AiError, AiResponse, ToolCall, ToolHistoryEntry, ToolResponse};
use crate::ai::{Message, ModelRunner};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for any OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAICompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIFunction,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: OpenAIFunctionCall,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIFunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAICompletionResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIClient {
    pub fn new(
        api_key: &str,
        endpoint: Option<&str>,
        model: Option<&str>,
        max_tokens: Option<u32>,
    ) -> Result<Self, String> {
        let endpoint_url = endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        // Local servers usually run without a key
        if !api_key.is_empty() {
            let auth_value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| format!("Invalid API key format: {}", e))?;
            headers.insert(header::AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        let model_name = match model {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => DEFAULT_MODEL.to_string(),
        };

        Ok(Self {
            client,
            endpoint: endpoint_url,
            model: model_name,
            max_tokens: max_tokens.unwrap_or(8192),
        })
    }

    fn build_request(
        &self,
        messages: Vec<Message>,
        tool_history: &[ToolHistoryEntry],
        tools: &[ToolDefinition],
    ) -> OpenAICompletionRequest {
        let mut api_messages: Vec<OpenAIMessage> = messages
            .into_iter()
            .map(|m| OpenAIMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content),
                tool_calls: None,
                tool_call_id: None,
            })
            .collect();

        // Replay previous tool rounds after the conversation
        for entry in tool_history {
            api_messages.extend(Self::build_tool_result_messages(
                &entry.tool_calls,
                &entry.tool_responses,
            ));
        }

        let openai_tools: Option<Vec<OpenAITool>> = if tools.is_empty() {
            None
        } else {
            Some(
                tools
                    .iter()
                    .map(|t| OpenAITool {
                        tool_type: "function".to_string(),
                        function: OpenAIFunction {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: json!({
                                "type": t.input_schema.schema_type,
                                "properties": t.input_schema.properties.iter().map(|(k, v)| {
                                    (k.clone(), json!({
                                        "type": v.schema_type,
                                        "description": v.description
                                    }))
                                }).collect::<serde_json::Map<String, Value>>(),
                                "required": t.input_schema.required
                            }),
                        },
                    })
                    .collect(),
            )
        };

        OpenAICompletionRequest {
            model: self.model.clone(),
            messages: api_messages,
            max_tokens: self.max_tokens,
            tool_choice: openai_tools.as_ref().map(|_| "auto".to_string()),
            tools: openai_tools,
        }
    }

    /// Decode a tool call's argument string. Text that is not JSON is passed on
    /// as a plain string so the tool's parameter error shows what the model sent.
    fn parse_arguments(tool_name: &str, raw: &str) -> Value {
        if raw.trim().is_empty() {
            return json!({});
        }
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "[OPENAI] Arguments for '{}' are not valid JSON ({}): {}",
                    tool_name,
                    e,
                    raw
                );
                Value::String(raw.to_string())
            }
        }
    }

    fn parse_response(response_text: &str) -> Result<AiResponse, AiError> {
        let response_data: OpenAICompletionResponse = serde_json::from_str(response_text)
            .map_err(|e| {
                AiError::new(format!(
                    "Failed to parse OpenAI response: {} - body: {}",
                    e, response_text
                ))
            })?;

        let choice = response_data
            .choices
            .first()
            .ok_or_else(|| AiError::new("OpenAI API returned no choices"))?;

        log::info!(
            "[OPENAI] Response - content_len: {}, tool_calls: {}, finish_reason: {:?}",
            choice.message.content.as_ref().map(|c| c.len()).unwrap_or(0),
            choice.message.tool_calls.as_ref().map(|t| t.len()).unwrap_or(0),
            choice.finish_reason
        );

        let content = choice.message.content.clone().unwrap_or_default();

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .as_ref()
            .map(|calls| {
                calls
                    .iter()
                    .map(|tc| ToolCall {
                        id: tc.id.clone(),
                        name: tc.function.name.clone(),
                        arguments: Self::parse_arguments(&tc.function.name, &tc.function.arguments),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let is_tool_use =
            choice.finish_reason.as_deref() == Some("tool_calls") || !tool_calls.is_empty();

        Ok(AiResponse {
            content,
            tool_calls,
            stop_reason: if is_tool_use {
                Some("tool_use".to_string())
            } else {
                Some("end_turn".to_string())
            },
        })
    }

    /// Build tool result messages for continuing after tool execution
    pub fn build_tool_result_messages(
        tool_calls: &[ToolCall],
        tool_responses: &[ToolResponse],
    ) -> Vec<OpenAIMessage> {
        let mut messages = Vec::new();

        let openai_tool_calls: Vec<OpenAIToolCall> = tool_calls
            .iter()
            .map(|tc| OpenAIToolCall {
                id: tc.id.clone(),
                call_type: "function".to_string(),
                function: OpenAIFunctionCall {
                    name: tc.name.clone(),
                    arguments: serde_json::to_string(&tc.arguments).unwrap_or_default(),
                },
            })
            .collect();

        messages.push(OpenAIMessage {
            role: "assistant".to_string(),
            content: Some(String::new()),
            tool_calls: Some(openai_tool_calls),
            tool_call_id: None,
        });

        for response in tool_responses {
            messages.push(OpenAIMessage {
                role: "tool".to_string(),
                content: Some(response.content.clone()),
                tool_calls: None,
                tool_call_id: Some(response.tool_call_id.clone()),
            });
        }

        messages
    }
}

#[async_trait]
impl ModelRunner for OpenAIClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate_with_tools(
        &self,
        messages: Vec<Message>,
        tool_history: Vec<ToolHistoryEntry>,
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        let request = self.build_request(messages, &tool_history, &tools);

        log::info!(
            "[OPENAI] Sending request to {} with model {} and {} tools",
            self.endpoint,
            self.model,
            request.tools.as_ref().map(|t| t.len()).unwrap_or(0)
        );
        log::debug!(
            "[OPENAI] Full request:\n{}",
            serde_json::to_string_pretty(&request).unwrap_or_default()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::new(format!("OpenAI API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                return Err(AiError::with_status(
                    format!("OpenAI API error: {}", error_response.error.message),
                    status.as_u16(),
                ));
            }

            return Err(AiError::with_status(
                format!("OpenAI API returned error status: {}, body: {}", status, error_text),
                status.as_u16(),
            ));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AiError::new(format!("Failed to read OpenAI response: {}", e)))?;

        log::debug!("[OPENAI] Raw response:\n{}", response_text);

        Self::parse_response(&response_text)
    }
}
