//! Agents and the sequential pipeline that chains them
//!
//! An agent is an instruction template plus the tools it may call. Agents run
//! one after another; each writes its reply to the blackboard under its output
//! key, and later agents read earlier replies through `{key}` placeholders in
//! their instructions.
//!
//! ```text
//! destination_research_agent → itinerary_builder_agent → travel_optimizer_agent
//!        writes destination_research   writes travel_itinerary   rewrites travel_itinerary
//! ```

pub mod blackboard;
pub mod catalog;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod spec;
pub mod template;

pub use runner::AgentRunner;
