//! Built-in tools

mod clock;
mod weather;

pub use clock::ClockTool;
pub use weather::WeatherTool;
