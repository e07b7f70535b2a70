//! The sample catalogue
//!
//! Each sample is an independent walk through one feature of the chat API.
//! A sample gets the shared client and resource directory through
//! [`SampleContext`], talks to the model sequentially, and prints as it goes.
//! Any error aborts only that sample.

use std::sync::Arc;

use async_trait::async_trait;
use prompttemplate::{PromptDocument, TemplateError};
use thiserror::Error;

use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::resources::{ResourceError, Resources};

mod basic_chat;
mod chat_history;
mod function_calling;
mod json_mode;
mod json_resource;
mod prompt_template;
mod summarize_file;
mod vision_local;
mod vision_url;
mod yaml_prompt;

pub use basic_chat::BasicChat;
pub use chat_history::ChatHistorySample;
pub use function_calling::{FunctionCalling, MAX_TOOL_ROUNDS};
pub use json_mode::JsonMode;
pub use json_resource::JsonResource;
pub use prompt_template::PromptTemplateSample;
pub use summarize_file::SummarizeFile;
pub use vision_local::VisionLocal;
pub use vision_url::VisionUrl;
pub use yaml_prompt::YamlPrompt;

/// Errors that end a sample run
#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model still wanted tools after {0} rounds")]
    ToolRounds(usize),
}

/// What every sample gets to work with
pub struct SampleContext {
    pub llm: Arc<dyn LlmClient>,
    pub resources: Resources,
    /// Response budget when a sample does not pick its own
    pub max_tokens: u32,
}

impl SampleContext {
    pub fn new(llm: Arc<dyn LlmClient>, resources: Resources, max_tokens: u32) -> Self {
        Self {
            llm,
            resources,
            max_tokens,
        }
    }

    /// A request with the context's default token budget
    pub fn request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest::new(messages, self.max_tokens)
    }
}

/// One runnable demonstration
#[async_trait]
pub trait Sample: Send + Sync {
    /// Short kebab-case name
    fn name(&self) -> &'static str;

    /// One line shown in the menu
    fn description(&self) -> &'static str;

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError>;
}

/// All samples in menu order; menu number N is index N-1
pub fn catalog() -> Vec<Box<dyn Sample>> {
    vec![
        Box::new(BasicChat),
        Box::new(ChatHistorySample),
        Box::new(PromptTemplateSample),
        Box::new(YamlPrompt),
        Box::new(SummarizeFile),
        Box::new(JsonMode),
        Box::new(JsonResource),
        Box::new(FunctionCalling),
        Box::new(VisionUrl),
        Box::new(VisionLocal),
    ]
}

/// Build a request for a rendered prompt document, honouring its execution settings
pub(crate) fn document_request(doc: &PromptDocument, prompt: String, default_max_tokens: u32) -> CompletionRequest {
    let settings = doc.execution_settings.clone().unwrap_or_default();
    let mut request = CompletionRequest::new(
        vec![Message::user(prompt)],
        settings.max_tokens.unwrap_or(default_max_tokens),
    );
    if let Some(temperature) = settings.temperature {
        request = request.with_temperature(temperature);
    }
    if settings.json_mode {
        request = request.json();
    }
    request
}
