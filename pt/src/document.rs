//! YAML prompt documents
//!
//! The whole document is parsed with serde_yaml and the `template` field read
//! directly; defaults and required inputs are applied before rendering.

use std::path::Path;

use handlebars::Handlebars;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::template::{MissingArgumentPolicy, PromptArguments, PromptTemplate};

/// Syntax used by the `template` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFormat {
    /// `{{$name}}` placeholders
    #[default]
    SemanticKernel,
    /// Handlebars expressions (`{{name}}`, `{{#if}}`, ...)
    Handlebars,
}

/// A declared input of a prompt document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputVariable {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Value used when the caller does not bind this variable
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default, alias = "is-required")]
    pub is_required: bool,
}

/// Request settings suggested by the prompt author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSettings {
    #[serde(default, alias = "max-tokens")]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f32>,

    /// Ask the model for a JSON object
    #[serde(default, alias = "json-mode")]
    pub json_mode: bool,
}

/// A prompt described by a YAML document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDocument {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub template: String,

    #[serde(default, alias = "template-format")]
    pub template_format: TemplateFormat,

    #[serde(default, alias = "input-variables")]
    pub input_variables: Vec<InputVariable>,

    #[serde(default, alias = "execution-settings")]
    pub execution_settings: Option<ExecutionSettings>,
}

impl PromptDocument {
    /// Parse a prompt document from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        let doc: Self = serde_yaml::from_str(yaml)?;
        if doc.template.trim().is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }
        debug!("PromptDocument::from_yaml: parsed '{}' ({:?})", doc.name, doc.template_format);
        Ok(doc)
    }

    /// Load and parse a prompt document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_yaml(&yaml)?;
        info!("Loaded prompt document '{}' from {}", doc.name, path.display());
        Ok(doc)
    }

    /// Render with the default missing-argument policy
    pub fn render(&self, args: &PromptArguments) -> Result<String, TemplateError> {
        self.render_with(args, MissingArgumentPolicy::Keep)
    }

    /// Render after applying declared defaults
    ///
    /// A required variable with neither a binding nor a default is always an
    /// error, whatever the policy. The policy governs placeholders that are not
    /// declared as inputs.
    pub fn render_with(&self, args: &PromptArguments, policy: MissingArgumentPolicy) -> Result<String, TemplateError> {
        let bound = self.bind(args)?;
        match self.template_format {
            TemplateFormat::SemanticKernel => PromptTemplate::new(self.template.as_str()).render_with(&bound, policy),
            TemplateFormat::Handlebars => {
                let mut hbs = Handlebars::new();
                hbs.register_escape_fn(handlebars::no_escape);
                hbs.set_strict_mode(policy == MissingArgumentPolicy::Error);
                Ok(hbs.render_template(&self.template, &bound)?)
            }
        }
    }

    /// Names of the declared inputs, or the template's placeholders when none are declared
    pub fn variables(&self) -> Vec<String> {
        if !self.input_variables.is_empty() {
            return self.input_variables.iter().map(|v| v.name.clone()).collect();
        }
        match self.template_format {
            TemplateFormat::SemanticKernel => PromptTemplate::new(self.template.as_str())
                .placeholders()
                .into_iter()
                .map(String::from)
                .collect(),
            TemplateFormat::Handlebars => Vec::new(),
        }
    }

    fn bind(&self, args: &PromptArguments) -> Result<PromptArguments, TemplateError> {
        let mut bound = args.clone();
        for var in &self.input_variables {
            if bound.contains(&var.name) {
                continue;
            }
            match &var.default {
                Some(default) => {
                    debug!("PromptDocument::bind: default for '{}'", var.name);
                    bound.insert(var.name.clone(), default.clone());
                }
                None if var.is_required => {
                    return Err(TemplateError::MissingArgument { name: var.name.clone() });
                }
                None => {}
            }
        }
        Ok(bound)
    }
}
