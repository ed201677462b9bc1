use dotenv::dotenv;
use std::sync::Arc;

mod agents;
mod ai;
mod config;
mod tools;

use agents::AgentRunner;
use config::{Config, RunMode};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = Config::from_env()?;
    let request = trip_request(std::env::args().skip(1), std::env::var("TRIP_QUERY").ok())?;

    log::info!("Using config directory: {:?}", config.config_dir);
    let catalog = agents::catalog::load_catalog(&config.config_dir)?;

    log::info!("Initializing tool registry");
    let registry = Arc::new(tools::create_default_registry());
    log::info!("Registered {} tools: {}", registry.len(), registry.names().join(", "));
    catalog.validate(&registry).map_err(|e| e.to_string())?;

    let model = ai::runner_from_config(&config)?;
    log::info!(
        "Running in {} mode with model {} at {}",
        config.mode,
        model.model_name(),
        config.endpoint
    );
    let runner = AgentRunner::new(model, registry.clone(), config.max_tool_iterations);

    match config.mode {
        RunMode::Single => {
            let output = runner
                .run_single(&catalog.single, &request)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", output.text);
        }
        RunMode::Pipeline => {
            let pipeline = catalog
                .build_pipeline(&registry)
                .map_err(|e| e.to_string())?;
            let outcome = pipeline
                .run(&runner, &request)
                .await
                .map_err(|e| e.to_string())?;

            for step in &outcome.steps {
                log::info!(
                    "[{}] {} → {:?} in {} ms ({} tool calls, started {})",
                    pipeline.name(),
                    step.agent,
                    step.output_key,
                    step.duration_ms,
                    step.tool_calls,
                    step.started_at.to_rfc3339()
                );
            }
            log::info!(
                "[{}] run {} left {} blackboard entries",
                pipeline.name(),
                outcome.run_id,
                outcome.blackboard.len()
            );
            for key in outcome.blackboard.keys() {
                if let Some(entry) = outcome.blackboard.get_entry(&key) {
                    log::debug!(
                        "[{}] {} written by {} at {}",
                        pipeline.name(),
                        key,
                        entry.writer,
                        entry.written_at.to_rfc3339()
                    );
                }
            }
            println!("{}", outcome.final_output);
        }
    }

    Ok(())
}

/// The trip request comes from the command line, or TRIP_QUERY when no arguments are given
fn trip_request(
    args: impl IntoIterator<Item = String>,
    query: Option<String>,
) -> Result<String, String> {
    let from_args = args.into_iter().collect::<Vec<_>>().join(" ");
    if !from_args.trim().is_empty() {
        return Ok(from_args);
    }
    query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| "No trip request given: pass it as arguments or set TRIP_QUERY".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_arguments_win_over_query() {
        let request = trip_request(
            args(&["Plan", "a", "week", "in", "London"]),
            Some("Weekend in Paris".to_string()),
        )
        .unwrap();
        assert_eq!(request, "Plan a week in London");
    }

    #[test]
    fn test_query_used_without_arguments() {
        let request = trip_request(args(&[]), Some("Weekend in Paris".to_string())).unwrap();
        assert_eq!(request, "Weekend in Paris");
    }

    #[test]
    fn test_blank_arguments_fall_back_to_query() {
        let request = trip_request(args(&["", " "]), Some("New York".to_string())).unwrap();
        assert_eq!(request, "New York");
    }

    #[test]
    fn test_missing_or_blank_request_rejected() {
        assert!(trip_request(args(&[]), None).is_err());
        assert!(trip_request(args(&[]), Some("   ".to_string())).is_err());
        assert!(trip_request(args(&["  "]), Some(String::new())).is_err());
    }
}
