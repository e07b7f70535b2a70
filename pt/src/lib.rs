//! prompttemplate - prompt text with `{{$name}}` placeholders
//!
//! A [`PromptTemplate`] is bound to a [`PromptArguments`] set to produce the
//! rendered prompt. Placeholders without a matching argument are left in the
//! output as literal text unless [`MissingArgumentPolicy::Error`] is asked for.
//!
//! Prompts can also be described by a YAML [`PromptDocument`] that declares its
//! input variables, their defaults, and optional execution settings:
//!
//! ```yaml
//! name: story
//! description: Write a short story
//! template_format: semantic-kernel
//! template: |
//!   Write a {{$length}} story about {{$topic}}.
//! input_variables:
//!   - name: topic
//!     is_required: true
//!   - name: length
//!     default: short
//! execution_settings:
//!   max_tokens: 400
//! ```
//!
//! # Example
//!
//! ```
//! use prompttemplate::{PromptArguments, PromptTemplate};
//!
//! let tmpl = PromptTemplate::new("Hello {{$name}}, you are {{$age}}.");
//! let args = PromptArguments::new().with("name", "Ada").with("age", "36");
//! assert_eq!(tmpl.render(&args), "Hello Ada, you are 36.");
//! ```

pub mod cli;
mod document;
mod error;
mod source;
mod template;

pub use document::{ExecutionSettings, InputVariable, PromptDocument, TemplateFormat};
pub use error::TemplateError;
pub use source::PromptSource;
pub use template::{MissingArgumentPolicy, PromptArguments, PromptTemplate};
