//! ChatGallery - a console gallery of chat-completion samples
//!
//! Ten self-contained samples show how to talk to an OpenAI-compatible chat
//! endpoint: plain prompts, conversation history, prompt templates, YAML
//! prompt documents, JSON output, function calling, and vision input.

pub mod cli;
pub mod config;
pub mod console;
pub mod llm;
pub mod resources;
pub mod runner;
pub mod samples;
pub mod structured;
pub mod tools;

pub use config::{Config, ConfigError, LlmConfig, Provider, ResolvedLlmConfig};
pub use runner::{SampleId, SampleOutcome, SelectionError};
