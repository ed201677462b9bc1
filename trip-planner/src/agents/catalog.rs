//! Agent definitions loaded from `agents.ron`
//!
//! The catalog holds the standalone travel planner and the steps of the
//! research → itinerary → optimization pipeline. A missing file falls back to
//! the built-in definitions below; a file that does not parse is an error.

use super::error::PipelineError;
use super::pipeline::{PipelineBuilder, SequentialPipeline, USER_REQUEST_KEY};
use super::spec::AgentSpec;
use crate::tools::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CATALOG_FILE: &str = "agents.ron";

/// Ordered steps of a pipeline as written in config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<AgentSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCatalog {
    /// Standalone tool-using agent
    pub single: AgentSpec,
    pub pipeline: PipelineDefinition,
}

impl AgentCatalog {
    /// Check the standalone agent and build the pipeline once, so configuration
    /// mistakes surface at startup instead of mid-run.
    ///
    /// The standalone agent only ever sees `user_request`; any other required
    /// placeholder could never be filled.
    pub fn validate(&self, registry: &ToolRegistry) -> Result<(), PipelineError> {
        registry
            .validate_bindings(self.single.tools())
            .map_err(|tool| PipelineError::UnknownTool {
                agent: self.single.name().to_string(),
                tool,
            })?;

        if let Some(placeholder) = self
            .single
            .referenced_keys()
            .into_iter()
            .find(|p| !p.optional && p.key != USER_REQUEST_KEY)
        {
            return Err(PipelineError::UnresolvedKey {
                agent: self.single.name().to_string(),
                key: placeholder.key,
            });
        }

        self.build_pipeline(registry).map(|_| ())
    }

    pub fn build_pipeline(&self, registry: &ToolRegistry) -> Result<SequentialPipeline, PipelineError> {
        self.pipeline
            .steps
            .iter()
            .cloned()
            .fold(
                SequentialPipeline::builder(self.pipeline.name.clone()),
                PipelineBuilder::step,
            )
            .build(registry)
    }
}

/// Load the catalog from `config_dir/agents.ron`
pub fn load_catalog(config_dir: &Path) -> Result<AgentCatalog, String> {
    let path = config_dir.join(CATALOG_FILE);

    if !path.exists() {
        log::warn!("[catalog] {:?} not found, using built-in agents", path);
        return Ok(default_catalog());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("[catalog] Failed to read {:?}: {}", path, e))?;
    let catalog: AgentCatalog = ron::from_str(&content)
        .map_err(|e| format!("[catalog] Failed to parse {:?}: {}", path, e))?;

    log::info!(
        "[catalog] Loaded '{}' and pipeline '{}' ({} steps) from {:?}",
        catalog.single.name(),
        catalog.pipeline.name,
        catalog.pipeline.steps.len(),
        path
    );
    Ok(catalog)
}

const PLANNER_INSTRUCTION: &str =
    "You are a travel planner agent. Help the user plan their trip.";

const RESEARCH_INSTRUCTION: &str = "You are a destination research specialist.
Research the destination the user wants to visit. Cover:
- the best areas to stay and how to get around
- the main sights, neighbourhoods and local food worth trying
- the current weather, using the get_weather tool
- the current local time, using the get_current_time tool
- practical tips: currency, tipping, safety, opening hours

If a tool reports an error, say that the information is unavailable instead of guessing.
Present your findings as concise notes under clear headings.";

const ITINERARY_INSTRUCTION: &str = "You are an itinerary builder.
Using the destination research below, build a day-by-day itinerary for the user's trip.
For each day give a morning, afternoon and evening plan with approximate times,
group nearby sights together and leave room for meals and rest.

Destination research:
{destination_research}";

const OPTIMIZER_INSTRUCTION: &str = "You are a travel optimizer.
Review the itinerary below and improve it:
- reorder activities to cut travel time between them
- flag anything that clashes with the weather or opening hours
- add budget estimates and booking tips where they help
- keep the day-by-day structure

Return only the final, formatted itinerary.

Itinerary:
{travel_itinerary}";

/// Built-in agents, matching the shipped `config/agents.ron`
pub fn default_catalog() -> AgentCatalog {
    AgentCatalog {
        single: AgentSpec::new("travel_planner_agent", PLANNER_INSTRUCTION)
            .with_description("An agent that helps users plan their travel itineraries.")
            .with_tools(&["get_weather", "get_current_time"]),
        pipeline: PipelineDefinition {
            name: "travel_planner_pipeline".to_string(),
            description: "Researches a destination, builds an itinerary and optimizes it.".to_string(),
            steps: vec![
                AgentSpec::new("destination_research_agent", RESEARCH_INSTRUCTION)
                    .with_description("Researches the destination the user wants to visit.")
                    .with_tools(&["get_weather", "get_current_time"])
                    .with_output_key("destination_research"),
                AgentSpec::new("itinerary_builder_agent", ITINERARY_INSTRUCTION)
                    .with_description("Builds a day-by-day itinerary from the research.")
                    .with_output_key("travel_itinerary"),
                AgentSpec::new("travel_optimizer_agent", OPTIMIZER_INSTRUCTION)
                    .with_description("Optimizes the itinerary and formats the final plan.")
                    .with_output_key("travel_itinerary"),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::create_default_registry;
    use std::fs;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert!(catalog.validate(&create_default_registry()).is_ok());

        let keys: Vec<Option<&str>> = catalog
            .pipeline
            .steps
            .iter()
            .map(|s| s.output_key())
            .collect();
        assert_eq!(
            keys,
            vec![
                Some("destination_research"),
                Some("travel_itinerary"),
                Some("travel_itinerary")
            ]
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_catalog(dir.path()).unwrap(), default_catalog());
    }

    #[test]
    fn test_defaults_round_trip_through_ron() {
        let dir = tempfile::tempdir().unwrap();
        let content = ron::ser::to_string_pretty(&default_catalog(), Default::default()).unwrap();
        fs::write(dir.path().join(CATALOG_FILE), content).unwrap();

        assert_eq!(load_catalog(dir.path()).unwrap(), default_catalog());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CATALOG_FILE), "(single: oops").unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(err.contains("Failed to parse"));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let catalog = load_catalog(Path::new("../config")).unwrap();
        assert_eq!(catalog.single.name(), "travel_planner_agent");
        assert_eq!(catalog.pipeline.steps.len(), 3);

        let pipeline = catalog.build_pipeline(&create_default_registry()).unwrap();
        assert_eq!(pipeline.name(), catalog.pipeline.name);
        assert_eq!(catalog.pipeline.steps[2].name(), "travel_optimizer_agent");
        assert!(catalog.pipeline.steps[2].instruction().contains("{travel_itinerary}"));
    }

    #[test]
    fn test_validate_catches_unknown_tool_on_single_agent() {
        let mut catalog = default_catalog();
        catalog.single = AgentSpec::new("travel_planner_agent", "x").with_tools(&["book_hotel"]);

        let err = catalog.validate(&create_default_registry()).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownTool { ref tool, .. } if tool == "book_hotel"));
    }

    #[test]
    fn test_validate_catches_unfillable_key_on_single_agent() {
        let mut catalog = default_catalog();
        catalog.single = AgentSpec::new("travel_planner_agent", "Refine {travel_itinerary}")
            .with_tools(&["get_weather"]);

        let err = catalog.validate(&create_default_registry()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnresolvedKey { ref agent, ref key }
                if agent == "travel_planner_agent" && key == "travel_itinerary"
        ));
    }

    #[test]
    fn test_single_agent_may_read_user_request_and_optional_keys() {
        let mut catalog = default_catalog();
        catalog.single = AgentSpec::new(
            "travel_planner_agent",
            "Plan for {user_request}. Notes: {travel_itinerary?}",
        );

        assert!(catalog.validate(&create_default_registry()).is_ok());
    }
}
