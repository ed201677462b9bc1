use crate::agents::runner::DEFAULT_MAX_TOOL_ITERATIONS;
use crate::ai::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Which agent setup to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RunMode {
    /// research → itinerary → optimizer
    Pipeline,
    /// The standalone tool-using planner
    Single,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub max_tool_iterations: u32,
    pub mode: RunMode,
    pub config_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_tokens = match get("TRIP_PLANNER_MAX_TOKENS") {
            Some(v) => v
                .parse()
                .map_err(|_| format!("TRIP_PLANNER_MAX_TOKENS must be a number, got '{}'", v))?,
            None => 8192,
        };

        let max_tool_iterations = match get("TRIP_PLANNER_MAX_TOOL_ITERATIONS") {
            Some(v) => v.parse().map_err(|_| {
                format!("TRIP_PLANNER_MAX_TOOL_ITERATIONS must be a number, got '{}'", v)
            })?,
            None => DEFAULT_MAX_TOOL_ITERATIONS,
        };

        let mode = match get("TRIP_PLANNER_MODE") {
            Some(v) => RunMode::from_str(&v).map_err(|_| {
                format!("TRIP_PLANNER_MODE must be 'pipeline' or 'single', got '{}'", v)
            })?,
            None => RunMode::Pipeline,
        };

        let config_dir = get("TRIP_PLANNER_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_config_dir);

        Ok(Self {
            endpoint: get("TRIP_PLANNER_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: get("TRIP_PLANNER_API_KEY"),
            model: get("TRIP_PLANNER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            max_tool_iterations,
            mode,
            config_dir,
        })
    }
}

/// ./config, or ../config when running from the crate directory
fn default_config_dir() -> PathBuf {
    if Path::new("./config").exists() {
        PathBuf::from("./config")
    } else if Path::new("../config").exists() {
        PathBuf::from("../config")
    } else {
        PathBuf::from("./config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_key, None);
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.max_tool_iterations, 10);
        assert_eq!(config.mode, RunMode::Pipeline);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TRIP_PLANNER_ENDPOINT", "http://localhost:11434/v1/chat/completions"),
            ("TRIP_PLANNER_API_KEY", "secret"),
            ("TRIP_PLANNER_MODEL", "llama3.3"),
            ("TRIP_PLANNER_MAX_TOKENS", "2048"),
            ("TRIP_PLANNER_MAX_TOOL_ITERATIONS", "4"),
            ("TRIP_PLANNER_MODE", "Single"),
            ("TRIP_PLANNER_CONFIG_DIR", "/etc/trip-planner"),
        ])
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:11434/v1/chat/completions");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "llama3.3");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.max_tool_iterations, 4);
        assert_eq!(config.mode, RunMode::Single);
        assert_eq!(config.config_dir, PathBuf::from("/etc/trip-planner"));
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = config_from(&[("TRIP_PLANNER_API_KEY", "  ")]).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("TRIP_PLANNER_MAX_TOKENS", "lots")]).is_err());
        assert!(config_from(&[("TRIP_PLANNER_MODE", "parallel")])
            .unwrap_err()
            .contains("pipeline"));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(RunMode::Pipeline.to_string(), "pipeline");
        assert_eq!(RunMode::Single.to_string(), "single");
    }
}
