//! Runs one agent: instruction in, text out, with tool calls in between.

use super::blackboard::Blackboard;
use super::error::PipelineError;
use super::pipeline::USER_REQUEST_KEY;
use super::spec::AgentSpec;
use super::template;
use crate::ai::{Message, ModelRunner, ToolHistoryEntry, ToolResponse};
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use std::sync::Arc;

/// Default bound on model calls per agent turn
pub const DEFAULT_MAX_TOOL_ITERATIONS: u32 = 10;

/// What an agent produced
#[derive(Debug, Clone)]
pub struct AgentOutput {
    pub text: String,
    /// Number of tool calls executed on the way
    pub tool_calls: usize,
}

pub struct AgentRunner {
    model: Arc<dyn ModelRunner>,
    tools: Arc<ToolRegistry>,
    max_tool_iterations: u32,
}

impl AgentRunner {
    pub fn new(model: Arc<dyn ModelRunner>, tools: Arc<ToolRegistry>, max_tool_iterations: u32) -> Self {
        AgentRunner {
            model,
            tools,
            max_tool_iterations: max_tool_iterations.max(1),
        }
    }

    /// Run a standalone agent against a user message
    pub async fn run_single(&self, spec: &AgentSpec, user_message: &str) -> Result<AgentOutput, PipelineError> {
        let mut blackboard = Blackboard::new();
        blackboard.set(USER_REQUEST_KEY, user_message, "user");
        let instruction = template::render(spec.instruction(), &blackboard)?;
        self.run(spec, &instruction, user_message, &ToolContext::new().with_agent(spec.name()))
            .await
    }

    /// Run an agent with an already rendered instruction.
    ///
    /// The model sees the instruction as the system message and the user message
    /// after it. Each tool-use reply is answered by executing the calls and asking
    /// again; the first reply without tool calls is the agent's output.
    pub async fn run(
        &self,
        spec: &AgentSpec,
        instruction: &str,
        user_message: &str,
        context: &ToolContext,
    ) -> Result<AgentOutput, PipelineError> {
        let messages = vec![Message::system(instruction), Message::user(user_message)];
        let tool_definitions = self.tools.definitions_for(spec.tools());
        let mut tool_history: Vec<ToolHistoryEntry> = Vec::new();
        let mut tool_calls_made = 0;

        log::info!("[AGENT] Running {}: {}", spec.name(), spec.description());

        for iteration in 0..self.max_tool_iterations {
            log::debug!(
                "[AGENT] {} iteration {} ({} tools offered)",
                spec.name(),
                iteration + 1,
                tool_definitions.len()
            );

            let response = self
                .model
                .generate_with_tools(messages.clone(), tool_history.clone(), tool_definitions.clone())
                .await
                .map_err(|error| {
                    let kind = if error.is_client_error() {
                        "rejected"
                    } else if error.is_server_error() {
                        "server error"
                    } else {
                        "failed"
                    };
                    log::error!("[AGENT] {} model call {}: {}", spec.name(), kind, error);
                    PipelineError::Model {
                        agent: spec.name().to_string(),
                        error,
                    }
                })?;

            if !response.is_tool_use() {
                log::info!(
                    "[AGENT] {} finished after {} tool calls ({} chars)",
                    spec.name(),
                    tool_calls_made,
                    response.content.len()
                );
                return Ok(AgentOutput {
                    text: response.content,
                    tool_calls: tool_calls_made,
                });
            }

            // No model call is left to read the results of this round
            if iteration + 1 == self.max_tool_iterations {
                break;
            }

            let mut tool_responses = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                log::info!("[AGENT] {} calls {} with {}", spec.name(), call.name, call.arguments);

                let result = if spec.tools().iter().any(|t| t == &call.name) {
                    self.tools.execute(&call.name, call.arguments.clone(), context).await
                } else {
                    ToolResult::error(format!(
                        "Tool '{}' is not available to {}",
                        call.name,
                        spec.name()
                    ))
                };
                tool_calls_made += 1;

                let content = result.to_model_content();
                tool_responses.push(if result.is_success() {
                    ToolResponse::success(call.id.clone(), content)
                } else {
                    ToolResponse::error(call.id.clone(), content)
                });
            }

            tool_history.push(ToolHistoryEntry::new(response.tool_calls, tool_responses));
        }

        log::warn!(
            "[AGENT] {} still calling tools after {} model calls",
            spec.name(),
            self.max_tool_iterations
        );
        Err(PipelineError::ToolLoopExhausted {
            agent: spec.name().to_string(),
            iterations: self.max_tool_iterations,
        })
    }
}
