//! Loading prompts from files

use std::path::Path;

use log::debug;

use crate::document::PromptDocument;
use crate::error::TemplateError;
use crate::template::{MissingArgumentPolicy, PromptArguments, PromptTemplate};

/// A prompt loaded from disk: either a bare template or a YAML document
#[derive(Debug, Clone)]
pub enum PromptSource {
    Plain(PromptTemplate),
    Document(PromptDocument),
}

impl PromptSource {
    /// Load by extension: `.yaml`/`.yml` files are prompt documents, anything else is a bare template
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        debug!("PromptSource::load: {} (yaml={})", path.display(), is_yaml);

        if is_yaml {
            return Ok(Self::Document(PromptDocument::from_file(path)?));
        }
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::Plain(PromptTemplate::new(text)))
    }

    pub fn render_with(&self, args: &PromptArguments, policy: MissingArgumentPolicy) -> Result<String, TemplateError> {
        match self {
            Self::Plain(tmpl) => tmpl.render_with(args, policy),
            Self::Document(doc) => doc.render_with(args, policy),
        }
    }

    /// Variable names the prompt expects
    pub fn variables(&self) -> Vec<String> {
        match self {
            Self::Plain(tmpl) => tmpl.placeholders().into_iter().map(String::from).collect(),
            Self::Document(doc) => doc.variables(),
        }
    }
}
