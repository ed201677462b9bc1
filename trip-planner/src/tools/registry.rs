use crate::tools::types::{ToolContext, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition for the model API
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with the given parameters
    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult;

    /// Returns the tool's name
    fn name(&self) -> String {
        self.definition().name
    }
}

/// Registry that holds all available tools.
///
/// Populated once at startup and read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        if self.tools.insert(name.clone(), tool).is_some() {
            log::warn!("[TOOLS] Tool '{}' registered twice, keeping the latest", name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check that every tool an agent declares is registered.
    /// Returns the first missing tool name.
    pub fn validate_bindings(&self, tool_names: &[String]) -> Result<(), String> {
        match tool_names.iter().find(|name| !self.tools.contains_key(*name)) {
            Some(missing) => Err(missing.clone()),
            None => Ok(()),
        }
    }

    /// Definitions for the named tools, in the order given. Unknown names are skipped.
    pub fn definitions_for(&self, tool_names: &[String]) -> Vec<ToolDefinition> {
        tool_names
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, params: Value, context: &ToolContext) -> ToolResult {
        let tool = match self.get(name) {
            Some(t) => t,
            None => return ToolResult::error(format!("Tool '{}' not found", name)),
        };

        log::info!(
            "[TOOLS] Executing '{}' for agent {:?} with params {}",
            name,
            context.agent_name,
            params
        );
        let result = tool.execute(params, context).await;
        log::debug!("[TOOLS] '{}' returned {:?}", name, result);
        result
    }
}
