//! Local time lookup for the one city we have a timezone for.

use super::CityParams;
use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolInputSchema, ToolResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;

/// `get_current_time` tool
pub struct CurrentTimeTool {
    definition: ToolDefinition,
}

impl CurrentTimeTool {
    pub fn new() -> Self {
        CurrentTimeTool {
            definition: ToolDefinition {
                name: "get_current_time".to_string(),
                description: "Returns the current time in a specified city. Returns a status of 'success' with a 'report', or 'error' with an 'error_message'.".to_string(),
                input_schema: ToolInputSchema::single_string(
                    "city",
                    "The name of the city for which to retrieve the current time.",
                ),
            },
        }
    }

    /// Only an exact case-insensitive "new york" is recognized
    fn timezone_for(city: &str) -> Option<Tz> {
        match city.to_lowercase().as_str() {
            "new york" => Some(chrono_tz::America::New_York),
            _ => None,
        }
    }

    /// Build the report for `city` as of the instant `now`
    pub fn report_at(city: &str, now: DateTime<Utc>) -> ToolResult {
        let tz = match Self::timezone_for(city) {
            Some(tz) => tz,
            None => {
                return ToolResult::error(format!(
                    "Sorry, I don't have timezone information for {}.",
                    city
                ));
            }
        };

        let local = now.with_timezone(&tz);
        ToolResult::success(format!(
            "The current time in {} is {}",
            city,
            local.format("%Y-%m-%d %H:%M:%S %Z%z")
        ))
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolResult {
        let params: CityParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        log::info!("--- Tool: get_current_time called for city: {} ---", params.city);
        Self::report_at(&params.city, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn test_summer_offset() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(
            CurrentTimeTool::report_at("New York", now),
            ToolResult::success("The current time in New York is 2024-07-01 08:00:00 EDT-0400")
        );
    }

    #[test]
    fn test_winter_offset() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 5).unwrap();
        assert_eq!(
            CurrentTimeTool::report_at("new york", now).text(),
            "The current time in new york is 2024-01-15 12:30:05 EST-0500"
        );
    }

    #[test]
    fn test_unknown_city() {
        let result = CurrentTimeTool::report_at("Tokyo", Utc::now());
        assert_eq!(
            result,
            ToolResult::error("Sorry, I don't have timezone information for Tokyo.")
        );
    }

    #[test]
    fn test_spaces_are_not_collapsed() {
        let result = CurrentTimeTool::report_at("new  york", Utc::now());
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_execute_uses_wall_clock() {
        let tool = CurrentTimeTool::new();
        let result = tool
            .execute(json!({"city": "New York"}), &ToolContext::new())
            .await;
        let pattern = Regex::new(
            r"^The current time in New York is \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} \w+[+-]\d{4}$",
        )
        .unwrap();
        assert!(result.is_success());
        assert!(pattern.is_match(result.text()), "got: {}", result.text());
    }
}
