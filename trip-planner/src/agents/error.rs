use crate::ai::AiError;
use std::fmt;

/// Failures when assembling or running agents
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// A pipeline needs at least one step
    EmptyPipeline,
    /// Two steps share an agent name
    DuplicateAgent(String),
    /// An agent declares a tool the registry does not have
    UnknownTool { agent: String, tool: String },
    /// An agent reads a key that no earlier step writes
    UnresolvedKey { agent: String, key: String },
    /// A required placeholder had no value on the blackboard at render time
    MissingKey { key: String },
    /// The model runner failed
    Model { agent: String, error: AiError },
    /// The model kept asking for tools past the configured bound
    ToolLoopExhausted { agent: String, iterations: u32 },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyPipeline => write!(f, "pipeline has no steps"),
            PipelineError::DuplicateAgent(name) => {
                write!(f, "agent '{}' appears more than once in the pipeline", name)
            }
            PipelineError::UnknownTool { agent, tool } => {
                write!(f, "agent '{}' declares unknown tool '{}'", agent, tool)
            }
            PipelineError::UnresolvedKey { agent, key } => write!(
                f,
                "agent '{}' reads '{}' but no earlier step writes it",
                agent, key
            ),
            PipelineError::MissingKey { key } => {
                write!(f, "no value for '{}' on the blackboard", key)
            }
            PipelineError::Model { agent, error } => {
                write!(f, "model call for agent '{}' failed: {}", agent, error)
            }
            PipelineError::ToolLoopExhausted { agent, iterations } => write!(
                f,
                "agent '{}' was still calling tools after {} model calls",
                agent, iterations
            ),
        }
    }
}

impl std::error::Error for PipelineError {}
