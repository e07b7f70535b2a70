//! LLM client module for ChatGallery
//!
//! Provides the chat-completion client, request/response types, and small
//! helpers that turn a prompt or a history into response text.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod history;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use history::ChatHistory;
pub use openai::OpenAIClient;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, ImageSource, Message, MessageContent, Role, StopReason,
    TokenUsage, ToolCall, ToolDefinition,
};

use crate::config::{Provider, ResolvedLlmConfig};

/// Create an LLM client from a resolved configuration
///
/// Every supported provider speaks the Chat Completions protocol, so they all
/// share `OpenAIClient`; the provider only changes URL layout and auth header.
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider {
        Provider::OpenAI | Provider::Azure => Ok(Arc::new(OpenAIClient::from_config(config)?)),
    }
}

/// Send a single user prompt and return the response text
pub async fn send_prompt(llm: &dyn LlmClient, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
    debug!(prompt_len = %prompt.len(), %max_tokens, "send_prompt: called");
    let request = CompletionRequest::new(vec![Message::user(prompt)], max_tokens);
    let response = llm.complete(request).await?;
    Ok(response.text()?.to_string())
}

/// Send the whole history and return the response text
///
/// The history is not modified; callers append the reply themselves.
pub async fn send_history(llm: &dyn LlmClient, history: &ChatHistory, max_tokens: u32) -> Result<String, LlmError> {
    debug!(message_count = %history.len(), %max_tokens, "send_history: called");
    let request = CompletionRequest::new(history.messages().to_vec(), max_tokens);
    let response = llm.complete(request).await?;
    Ok(response.text()?.to_string())
}
