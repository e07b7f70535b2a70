//! Template error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or rendering a prompt
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Missing argument for placeholder '{name}'")]
    MissingArgument { name: String },

    #[error("Failed to read prompt {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid prompt document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Prompt document has an empty template")]
    EmptyTemplate,

    #[error("Handlebars render failed: {0}")]
    Handlebars(#[from] handlebars::RenderError),
}

impl TemplateError {
    /// Check if this error came from an unbound placeholder or required variable
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, TemplateError::MissingArgument { .. })
    }
}
