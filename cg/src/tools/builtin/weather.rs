//! get_weather tool - canned forecast for a city
//!
//! No network: the forecast is derived from the city name so the sample is
//! reproducible offline.

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{Tool, ToolResult};

const CONDITIONS: [&str; 5] = ["sunny", "partly cloudy", "overcast", "light rain", "windy"];

/// Report a deterministic weather forecast
pub struct WeatherTool;

impl WeatherTool {
    fn forecast(city: &str) -> (i64, &'static str) {
        let seed: u64 = city
            .to_lowercase()
            .bytes()
            .fold(7u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let celsius = 5 + (seed % 26) as i64;
        let conditions = CONDITIONS[(seed / 26 % CONDITIONS.len() as u64) as usize];
        (celsius, conditions)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> &'static str {
        "Get the current weather for a city."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. Paris"
                },
                "unit": {
                    "type": "string",
                    "enum": ["celsius", "fahrenheit"],
                    "description": "Temperature unit (default: celsius)"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        let city = match input["city"].as_str().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => return ToolResult::error("city is required"),
        };
        let unit = input["unit"].as_str().unwrap_or("celsius");

        let (celsius, conditions) = Self::forecast(city);
        let temperature = match unit {
            "celsius" => celsius,
            "fahrenheit" => celsius * 9 / 5 + 32,
            other => return ToolResult::error(format!("unknown unit: {}", other)),
        };

        ToolResult::json(serde_json::json!({
            "city": city,
            "temperature": temperature,
            "unit": unit,
            "conditions": conditions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forecast_is_deterministic() {
        let a = WeatherTool.execute(serde_json::json!({"city": "Oslo"})).await;
        let b = WeatherTool.execute(serde_json::json!({"city": "oslo"})).await;
        assert!(!a.is_error);
        let a: Value = serde_json::from_str(&a.content).unwrap();
        let b: Value = serde_json::from_str(&b.content).unwrap();
        assert_eq!(a["temperature"], b["temperature"]);
        assert_eq!(a["conditions"], b["conditions"]);
    }

    #[tokio::test]
    async fn test_fahrenheit_conversion() {
        let c: Value =
            serde_json::from_str(&WeatherTool.execute(serde_json::json!({"city": "Rome"})).await.content).unwrap();
        let f: Value = serde_json::from_str(
            &WeatherTool
                .execute(serde_json::json!({"city": "Rome", "unit": "fahrenheit"}))
                .await
                .content,
        )
        .unwrap();
        let celsius = c["temperature"].as_i64().unwrap();
        assert_eq!(f["temperature"].as_i64().unwrap(), celsius * 9 / 5 + 32);
    }

    #[tokio::test]
    async fn test_missing_city() {
        assert!(WeatherTool.execute(serde_json::json!({})).await.is_error);
        assert!(WeatherTool.execute(serde_json::json!({"city": "  "})).await.is_error);
    }

    #[tokio::test]
    async fn test_unknown_unit() {
        let result = WeatherTool
            .execute(serde_json::json!({"city": "Lima", "unit": "kelvin"}))
            .await;
        assert!(result.is_error);
    }
}
