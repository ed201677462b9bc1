//! Sequential pipeline runner
//!
//! Steps run once each, in declaration order. Before a step runs its
//! instruction is rendered from the blackboard; after it returns, its text is
//! written under the step's output key. Rendering finishes before the model is
//! called, so a step that reads and writes the same key sees the earlier value.

use super::blackboard::Blackboard;
use super::error::PipelineError;
use super::runner::AgentRunner;
use super::spec::AgentSpec;
use super::template;
use crate::tools::{ToolContext, ToolRegistry};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Instant;
use uuid::Uuid;

/// Key under which the user's request is seeded before the first step
pub const USER_REQUEST_KEY: &str = "user_request";
const USER_WRITER: &str = "user";

/// A validated, fixed list of agents
#[derive(Debug, Clone)]
pub struct SequentialPipeline {
    name: String,
    steps: Vec<AgentSpec>,
}

pub struct PipelineBuilder {
    name: String,
    steps: Vec<AgentSpec>,
}

impl PipelineBuilder {
    pub fn step(mut self, spec: AgentSpec) -> Self {
        self.steps.push(spec);
        self
    }

    /// Validate the step order against the registry and freeze the pipeline
    pub fn build(self, registry: &ToolRegistry) -> Result<SequentialPipeline, PipelineError> {
        if self.steps.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }

        let mut names = HashSet::new();
        let mut written: HashSet<String> = HashSet::from([USER_REQUEST_KEY.to_string()]);

        for spec in &self.steps {
            if !names.insert(spec.name().to_string()) {
                return Err(PipelineError::DuplicateAgent(spec.name().to_string()));
            }

            registry
                .validate_bindings(spec.tools())
                .map_err(|tool| PipelineError::UnknownTool {
                    agent: spec.name().to_string(),
                    tool,
                })?;

            // Keys must come from strictly earlier steps
            if let Some(placeholder) = spec
                .referenced_keys()
                .into_iter()
                .find(|p| !p.optional && !written.contains(&p.key))
            {
                return Err(PipelineError::UnresolvedKey {
                    agent: spec.name().to_string(),
                    key: placeholder.key,
                });
            }

            if let Some(key) = spec.output_key() {
                written.insert(key.to_string());
            }
        }

        log::info!(
            "[PIPELINE] Built '{}' with {} steps: {}",
            self.name,
            self.steps.len(),
            self.steps.iter().map(|s| s.name()).collect::<Vec<_>>().join(" → ")
        );

        Ok(SequentialPipeline {
            name: self.name,
            steps: self.steps,
        })
    }
}

/// Record of one executed step
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub agent: String,
    pub output_key: Option<String>,
    pub tool_calls: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Everything a finished run leaves behind
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run_id: String,
    pub final_output: String,
    pub blackboard: Blackboard,
    pub steps: Vec<StepRecord>,
}

impl SequentialPipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute every step once, in order. The first failing step aborts the run.
    pub async fn run(
        &self,
        runner: &AgentRunner,
        user_request: &str,
    ) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Uuid::new_v4().to_string();
        let mut blackboard = Blackboard::new();
        blackboard.set(USER_REQUEST_KEY, user_request, USER_WRITER);

        let mut records = Vec::with_capacity(self.steps.len());
        let mut last_text = String::new();

        for (index, spec) in self.steps.iter().enumerate() {
            log::info!(
                "[PIPELINE] {} run {} step {}/{}: {}",
                self.name,
                run_id,
                index + 1,
                self.steps.len(),
                spec.name()
            );

            let started_at = Utc::now();
            let timer = Instant::now();

            let instruction = template::render(spec.instruction(), &blackboard).map_err(|e| {
                log::error!("[PIPELINE] {} could not render its instruction: {}", spec.name(), e);
                e
            })?;

            let context = ToolContext::new().with_run(&run_id).with_agent(spec.name());
            let output = runner
                .run(spec, &instruction, user_request, &context)
                .await
                .map_err(|e| {
                    log::error!("[PIPELINE] {} run {} aborted: {}", self.name, run_id, e);
                    e
                })?;

            if let Some(key) = spec.output_key() {
                blackboard.set(key, output.text.clone(), spec.name());
            }

            records.push(StepRecord {
                agent: spec.name().to_string(),
                output_key: spec.output_key().map(str::to_string),
                tool_calls: output.tool_calls,
                started_at,
                duration_ms: timer.elapsed().as_millis() as u64,
            });
            last_text = output.text;
        }

        let final_output = self
            .steps
            .last()
            .and_then(|spec| spec.output_key())
            .and_then(|key| blackboard.get(key))
            .map(str::to_string)
            .unwrap_or(last_text);

        log::info!(
            "[PIPELINE] {} run {} complete ({} steps, {} chars of output)",
            self.name,
            run_id,
            records.len(),
            final_output.len()
        );

        Ok(PipelineOutcome {
            run_id,
            final_output,
            blackboard,
            steps: records,
        })
    }
}
