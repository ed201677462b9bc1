//! Built-in tools available to the travel agents

mod current_time;
mod weather;

pub use current_time::CurrentTimeTool;
pub use weather::WeatherTool;

use serde::Deserialize;

/// Parameters shared by the city lookup tools
#[derive(Debug, Deserialize)]
struct CityParams {
    city: String,
}
