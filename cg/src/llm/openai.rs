//! OpenAI-compatible Chat Completions client
//!
//! Implements the LlmClient trait for OpenAI, Azure OpenAI and any server that
//! speaks the same `/chat/completions` protocol (Ollama, vLLM, llama.cpp).
//! One request per call; failures are surfaced, never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmClient, LlmError, Message, MessageContent, StopReason,
    TokenUsage, ToolCall,
};
use crate::config::{Provider, ResolvedLlmConfig};

/// How the credential travels
#[derive(Clone, PartialEq, Eq)]
enum Auth {
    /// Local endpoints without a key
    None,
    /// `Authorization: Bearer <key>`
    Bearer(String),
    /// Azure's `api-key: <key>`
    ApiKeyHeader(String),
}

/// OpenAI-compatible API client
pub struct OpenAIClient {
    model: String,
    url: String,
    auth: Auth,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        let (url, auth) = match config.provider {
            Provider::OpenAI => (
                format!("{}/chat/completions", config.endpoint),
                config.api_key.clone().map(Auth::Bearer).unwrap_or(Auth::None),
            ),
            Provider::Azure => (
                format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    config.endpoint, config.model, config.api_version
                ),
                config.api_key.clone().map(Auth::ApiKeyHeader).unwrap_or(Auth::None),
            ),
        };
        debug!(%url, "from_config: request url");

        Ok(Self {
            model: config.model.clone(),
            url,
            auth,
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    /// The URL completions are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the request body for the Chat Completions API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, json_mode = %request.json_mode, "build_request_body: called");

        let messages = self.convert_messages(&request.messages);
        let max_tokens = request.max_tokens.min(self.max_tokens);

        // o1/o3 and gpt-5 models take max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        if request.json_mode {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        if !request.tools.is_empty() {
            debug!(tool_count = %request.tools.len(), "build_request_body: adding tools");
            body["tools"] = serde_json::json!(request.tools.iter().map(|t| t.to_openai_schema()).collect::<Vec<_>>());
            body["tool_choice"] = serde_json::json!("auto");
        }

        body
    }

    /// Convert internal Message types to API format
    ///
    /// One internal message with several tool results becomes several `tool`
    /// messages; text and image blocks become a content-part array.
    fn convert_messages(&self, messages: &[Message]) -> Vec<serde_json::Value> {
        debug!(message_count = %messages.len(), "convert_messages: called");
        let mut result = Vec::new();

        for msg in messages {
            let role = msg.role.as_str();

            let blocks = match &msg.content {
                MessageContent::Text(text) => {
                    result.push(serde_json::json!({
                        "role": role,
                        "content": text,
                    }));
                    continue;
                }
                MessageContent::Blocks(blocks) => blocks,
            };

            let mut parts = Vec::new();
            let mut has_image = false;
            let mut text_content = String::new();
            let mut tool_calls = Vec::new();
            let mut tool_results = Vec::new();

            for block in blocks {
                match block {
                    ContentBlock::Text { text } => {
                        text_content.push_str(text);
                        parts.push(serde_json::json!({ "type": "text", "text": text }));
                    }
                    ContentBlock::Image { source } => {
                        has_image = true;
                        parts.push(serde_json::json!({
                            "type": "image_url",
                            "image_url": { "url": source.to_url() },
                        }));
                    }
                    ContentBlock::ToolUse { id, name, input } => {
                        tool_calls.push(serde_json::json!({
                            "id": id,
                            "type": "function",
                            "function": {
                                "name": name,
                                "arguments": input.to_string(),
                            }
                        }));
                    }
                    ContentBlock::ToolResult {
                        tool_use_id, content, ..
                    } => {
                        tool_results.push((tool_use_id.clone(), content.clone()));
                    }
                }
            }

            if !tool_results.is_empty() {
                for (tool_call_id, content) in tool_results {
                    result.push(serde_json::json!({
                        "role": "tool",
                        "tool_call_id": tool_call_id,
                        "content": content,
                    }));
                }
                continue;
            }

            if !tool_calls.is_empty() {
                let mut msg = serde_json::json!({
                    "role": "assistant",
                    "tool_calls": tool_calls,
                });
                if !text_content.is_empty() {
                    msg["content"] = serde_json::json!(text_content);
                }
                result.push(msg);
                continue;
            }

            if has_image {
                result.push(serde_json::json!({
                    "role": role,
                    "content": parts,
                }));
                continue;
            }

            result.push(serde_json::json!({
                "role": role,
                "content": text_content,
            }));
        }

        result
    }

    /// Parse the API response
    fn parse_response(&self, api_response: OpenAIResponse) -> Result<CompletionResponse, LlmError> {
        debug!(choice_count = %api_response.choices.len(), "parse_response: called");
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                let input = serde_json::from_str(&tc.function.arguments).unwrap_or_else(|e| {
                    warn!(tool = %tc.function.name, error = %e, "parse_response: unparseable tool arguments");
                    serde_json::json!({})
                });
                ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    input,
                }
            })
            .collect();

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content,
            tool_calls,
            stop_reason: StopReason::from_openai(choice.finish_reason.as_deref()),
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let body = self.build_request_body(&request);

        let mut builder = self
            .http
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&body);
        builder = match &self.auth {
            Auth::None => builder,
            Auth::Bearer(key) => builder.header("Authorization", format!("Bearer {}", key)),
            Auth::ApiKeyHeader(key) => builder.header("api-key", key.as_str()),
        };

        let response = builder.send().await.map_err(|e| {
            debug!(error = %e, "complete: send failed");
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::Network(e)
            }
        })?;

        let status = response.status().as_u16();

        if status == 429 {
            debug!("complete: rate limited (429)");
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
            });
        }

        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        let text = response.text().await?;
        let api_response: OpenAIResponse = serde_json::from_str(&text)?;
        debug!("complete: success");
        self.parse_response(api_response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Chat Completions response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCall {
    id: String,
    function: OpenAIFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAIFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
