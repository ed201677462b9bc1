use super::template::{self, Placeholder};
use serde::{Deserialize, Serialize};

/// Declarative definition of one agent.
///
/// Fields are private; a spec does not change once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    name: String,
    #[serde(default)]
    description: String,
    instruction: String,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    output_key: Option<String>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        AgentSpec {
            name: name.into(),
            description: String::new(),
            instruction: instruction.into(),
            tools: vec![],
            output_key: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tools(mut self, tools: &[&str]) -> Self {
        self.tools = tools.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn output_key(&self) -> Option<&str> {
        self.output_key.as_deref()
    }

    /// Blackboard keys the instruction reads
    pub fn referenced_keys(&self) -> Vec<Placeholder> {
        template::placeholders(&self.instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let spec = AgentSpec::new("itinerary_builder_agent", "Use {destination_research}.")
            .with_description("Builds itineraries")
            .with_tools(&["get_weather"])
            .with_output_key("travel_itinerary");

        assert_eq!(spec.name(), "itinerary_builder_agent");
        assert_eq!(spec.description(), "Builds itineraries");
        assert_eq!(spec.tools(), ["get_weather".to_string()]);
        assert_eq!(spec.output_key(), Some("travel_itinerary"));
        assert_eq!(spec.referenced_keys()[0].key, "destination_research");
    }

    #[test]
    fn test_ron_defaults() {
        let spec: AgentSpec =
            ron::from_str(r#"(name: "a", instruction: "do it")"#).unwrap();
        assert!(spec.tools().is_empty());
        assert_eq!(spec.output_key(), None);
        assert_eq!(spec.description(), "");
    }
}
