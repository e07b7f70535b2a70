//! get_current_time tool - current date and time at a UTC offset

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use serde_json::Value;

use crate::tools::{Tool, ToolResult};

/// Report the current time, optionally shifted to a UTC offset
pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    fn description(&self) -> &'static str {
        "Get the current date and time. Pass utc_offset in hours for a local time zone."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "utc_offset": {
                    "type": "number",
                    "description": "Offset from UTC in hours, e.g. -5 or 5.5 (default: 0)"
                }
            }
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let hours = match &input["utc_offset"] {
            Value::Null => 0.0,
            v => match v.as_f64() {
                Some(h) => h,
                None => return ToolResult::error("utc_offset must be a number"),
            },
        };

        let seconds = (hours * 3600.0).round() as i32;
        let offset = match FixedOffset::east_opt(seconds) {
            Some(o) => o,
            None => return ToolResult::error(format!("utc_offset out of range: {}", hours)),
        };

        let now = Utc::now().with_timezone(&offset);
        ToolResult::success(now.format("%A, %Y-%m-%d %H:%M:%S %:z").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_utc() {
        let result = ClockTool.execute(serde_json::json!({})).await;
        assert!(!result.is_error);
        assert!(result.content.ends_with("+00:00"));
    }

    #[tokio::test]
    async fn test_fractional_offset() {
        let result = ClockTool.execute(serde_json::json!({"utc_offset": 5.5})).await;
        assert!(!result.is_error);
        assert!(result.content.ends_with("+05:30"));
    }

    #[tokio::test]
    async fn test_out_of_range_offset() {
        let result = ClockTool.execute(serde_json::json!({"utc_offset": 30})).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_non_numeric_offset() {
        let result = ClockTool.execute(serde_json::json!({"utc_offset": "noon"})).await;
        assert!(result.is_error);
    }
}
