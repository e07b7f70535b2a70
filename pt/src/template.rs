//! `{{$name}}` placeholder substitution

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// A placeholder is `{{$` + identifier + `}}`, identifier being `[A-Za-z_][A-Za-z0-9_]*`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\$([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder pattern compiles"));

/// What to do when a placeholder has no bound argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingArgumentPolicy {
    /// Leave the `{{$name}}` span in the output untouched
    #[default]
    Keep,
    /// Fail with `TemplateError::MissingArgument`
    Error,
}

/// Named string arguments bound into a template
///
/// Names are case-sensitive and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptArguments(HashMap<String, String>);

impl PromptArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value`, returning the previous value if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for PromptArguments {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for PromptArguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// An immutable prompt template containing `{{$name}}` placeholders
///
/// A template is typically loaded once and rendered many times with different
/// argument sets. Rendering never touches the template itself.
///
/// A placeholder directly preceded by a backslash (`\{{$name}}`) is escaped and
/// copied verbatim, as is anything that does not match the placeholder form
/// (`{{name}}`, `{{$ name}}`, `{{$1st}}`, a stray `{{` or `$`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    /// The raw template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render with the default policy: unbound placeholders stay as literal text
    pub fn render(&self, args: &PromptArguments) -> String {
        // Keep has no failure path
        self.render_with(args, MissingArgumentPolicy::Keep)
            .unwrap_or_else(|_| self.source.clone())
    }

    /// Render with an explicit missing-argument policy
    ///
    /// Bound values are inserted as-is and are not scanned again, so a value
    /// containing `{{$x}}` ends up in the output literally.
    pub fn render_with(&self, args: &PromptArguments, policy: MissingArgumentPolicy) -> Result<String, TemplateError> {
        debug!("PromptTemplate::render_with: len={} args={} policy={:?}", self.source.len(), args.len(), policy);
        let mut out = String::with_capacity(self.source.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if is_escaped(&self.source, whole.start()) {
                continue;
            }

            out.push_str(&self.source[last..whole.start()]);
            match args.get(name.as_str()) {
                Some(value) => out.push_str(value),
                None => match policy {
                    MissingArgumentPolicy::Keep => {
                        debug!("PromptTemplate::render_with: '{}' unbound, keeping literal", name.as_str());
                        out.push_str(whole.as_str());
                    }
                    MissingArgumentPolicy::Error => {
                        return Err(TemplateError::MissingArgument {
                            name: name.as_str().to_string(),
                        });
                    }
                },
            }
            last = whole.end();
        }

        out.push_str(&self.source[last..]);
        Ok(out)
    }

    /// Distinct placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if is_escaped(&self.source, whole.start()) {
                continue;
            }
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }
}

impl From<&str> for PromptTemplate {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for PromptTemplate {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_escaped(source: &str, start: usize) -> bool {
    start > 0 && source.as_bytes()[start - 1] == b'\\'
}
