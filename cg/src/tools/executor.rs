//! ToolExecutor - dispatches model tool calls to local tools

use std::collections::BTreeMap;
use tracing::debug;

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{ClockTool, WeatherTool};
use super::{Tool, ToolResult};

/// Registry of tools available to the model
pub struct ToolExecutor {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Executor with no tools
    pub fn empty() -> Self {
        Self { tools: BTreeMap::new() }
    }

    /// Executor with the built-in tools
    pub fn standard() -> Self {
        let mut executor = Self::empty();
        executor.register(Box::new(ClockTool));
        executor.register(Box::new(WeatherTool));
        executor
    }

    /// Add a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(name = %tool.name(), "ToolExecutor::register: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions to declare in the request, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        debug!(name = %tool_call.name, id = %tool_call.id, "ToolExecutor::execute: called");
        match self.tools.get(&tool_call.name) {
            Some(tool) => tool.execute(tool_call.input.clone()).await,
            None => ToolResult::error(format!("Unknown tool: {}", tool_call.name)),
        }
    }

    /// Execute multiple tool calls in order
    pub async fn execute_all(&self, tool_calls: &[ToolCall]) -> Vec<(String, ToolResult)> {
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            let result = self.execute(call).await;
            results.push((call.id.clone(), result));
        }

        results
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_executor_has_builtin_tools() {
        let executor = ToolExecutor::standard();

        assert!(executor.has_tool("get_current_time"));
        assert!(executor.has_tool("get_weather"));
        assert!(!executor.has_tool("rm_rf"));
    }

    #[test]
    fn test_definitions_sorted_by_name() {
        let defs = ToolExecutor::standard().definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["get_current_time", "get_weather"]);
        assert!(defs.iter().all(|d| d.input_schema.is_object()));
    }

    #[test]
    fn test_empty_executor() {
        assert!(ToolExecutor::empty().definitions().is_empty());
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let executor = ToolExecutor::standard();
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "unknown_tool".to_string(),
            input: serde_json::json!({}),
        };

        let result = executor.execute(&call).await;
        assert!(result.is_error);
        assert!(result.content.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_execute_all_keeps_ids() {
        let executor = ToolExecutor::standard();
        let calls = vec![
            ToolCall {
                id: "a".to_string(),
                name: "get_weather".to_string(),
                input: serde_json::json!({"city": "Paris"}),
            },
            ToolCall {
                id: "b".to_string(),
                name: "get_current_time".to_string(),
                input: serde_json::json!({}),
            },
        ];

        let results = executor.execute_all(&calls).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "a");
        assert_eq!(results[1].0, "b");
        assert!(results.iter().all(|(_, r)| !r.is_error));
    }
}
