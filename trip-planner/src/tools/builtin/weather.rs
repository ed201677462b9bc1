//! Mock weather lookup.
//!
//! Reports come from a fixed table keyed by the normalized city name
//! (lowercase, spaces removed). Nothing is fetched over the network.

use super::CityParams;
use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolInputSchema, ToolResult};
use async_trait::async_trait;
use serde_json::Value;

const WEATHER_REPORTS: &[(&str, &str)] = &[
    ("newyork", "The weather in New York is sunny."),
    (
        "london",
        "It's cloudy in London with a temperature of 15 degree Celsius",
    ),
];

/// `get_weather` tool
pub struct WeatherTool {
    definition: ToolDefinition,
}

impl WeatherTool {
    pub fn new() -> Self {
        WeatherTool {
            definition: ToolDefinition {
                name: "get_weather".to_string(),
                description: "Retrieves the current weather report for a specified city. Returns a status of 'success' with a 'report', or 'error' with an 'error_message'.".to_string(),
                input_schema: ToolInputSchema::single_string(
                    "city",
                    "The name of the city for which to retrieve the weather report.",
                ),
            },
        }
    }

    fn normalize(city: &str) -> String {
        city.to_lowercase().replace(' ', "")
    }

    pub fn lookup(city: &str) -> ToolResult {
        let normalized = Self::normalize(city);
        match WEATHER_REPORTS.iter().find(|(key, _)| *key == normalized) {
            Some((_, report)) => ToolResult::success(*report),
            None => ToolResult::error(format!(
                "Sorry, I don't have weather information for '{}'.",
                city
            )),
        }
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolResult {
        let params: CityParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        log::info!("--- Tool: get_weather called for city: {} ---", params.city);
        Self::lookup(&params.city)
    }
}
