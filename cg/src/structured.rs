//! Structured (JSON) output parsing
//!
//! Models asked for JSON sometimes wrap it in a Markdown code fence; the
//! fence is stripped before deserializing. Failures are ordinary errors the
//! caller can report and move past.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StructuredError {
    #[error("Response was empty")]
    Empty,

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Deserialize a model response into `T`
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, StructuredError> {
    let body = strip_code_fence(text);
    debug!(len = %body.len(), "parse_json: called");
    if body.is_empty() {
        return Err(StructuredError::Empty);
    }
    Ok(serde_json::from_str(body)?)
}

/// Remove a surrounding ``` fence (with optional language tag) if present
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
