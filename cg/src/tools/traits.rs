//! The contract between the function-calling loop and a local function

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolDefinition;

/// A local function the model may ask to call
///
/// Tools never fail the sample: bad input or an internal problem comes back
/// as an error [`ToolResult`] the model can read and react to.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name as declared to the model
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema of the arguments object
    fn input_schema(&self) -> Value;

    async fn execute(&self, input: Value) -> ToolResult;

    /// Declaration sent with the request
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// What goes back to the model as the tool message
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Successful result carrying a JSON document
    pub fn json(value: Value) -> Self {
        Self::success(value.to_string())
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}
