//! Tool system for the function-calling sample
//!
//! Tools are local functions the model may ask to run. The executor turns
//! the model's tool calls into results that are sent back on the next turn.

mod executor;
mod traits;

pub mod builtin;

pub use executor::ToolExecutor;
pub use traits::{Tool, ToolResult};
