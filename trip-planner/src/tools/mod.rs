pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::ToolRegistry;
pub use types::{ToolContext, ToolDefinition, ToolResult};

use std::sync::Arc;

/// Register all built-in tools to a registry
fn register_all_tools(registry: &mut ToolRegistry) {
    registry.register(Arc::new(builtin::WeatherTool::new()));
    registry.register(Arc::new(builtin::CurrentTimeTool::new()));
}

/// Create a new ToolRegistry with all built-in tools registered
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry);
    registry
}
