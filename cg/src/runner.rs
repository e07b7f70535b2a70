//! Sample selection and execution
//!
//! A run resolves the LLM configuration first and only then builds a client,
//! so a missing endpoint or model is reported without touching the network.
//! Every failure is turned into a [`SampleOutcome`] for the console.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::{Config, ResolvedLlmConfig};
use crate::console;
use crate::llm::{LlmClient, LlmError};
use crate::resources::Resources;
use crate::samples::{SampleContext, catalog};

/// A valid menu number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleId(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No selection entered")]
    Empty,

    #[error("Invalid selection '{0}': enter a number from 1 to 10")]
    Invalid(String),
}

impl SampleId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(number: u8) -> Result<Self, SelectionError> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SelectionError::Invalid(number.to_string()))
        }
    }

    /// Parse user input such as `" 3\n"`
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::Empty);
        }
        let number: u8 = trimmed
            .parse()
            .map_err(|_| SelectionError::Invalid(trimmed.to_string()))?;
        Self::new(number).map_err(|_| SelectionError::Invalid(trimmed.to_string()))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Position in the catalogue
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

/// How a sample run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    Completed,
    /// Endpoint or model missing or invalid; no request was sent
    ConfigurationError(String),
    Failed(String),
}

impl SampleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SampleOutcome::Completed)
    }
}

/// Resolve configuration, build a client with `factory`, and run sample `id`
pub async fn run_sample<F>(config: &Config, id: SampleId, factory: F) -> SampleOutcome
where
    F: FnOnce(&ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError>,
{
    debug!(sample = %id.number(), "run_sample: called");
    let resolved = match config.llm.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(error = %e, "run_sample: configuration incomplete");
            return SampleOutcome::ConfigurationError(e.to_string());
        }
    };

    let llm = match factory(&resolved) {
        Ok(llm) => llm,
        Err(e) => {
            error!(error = %e, "run_sample: failed to create client");
            return SampleOutcome::Failed(e.to_string());
        }
    };

    let ctx = SampleContext::new(llm, Resources::new(&config.resources.dir), resolved.max_tokens);
    run_with_context(&ctx, id).await
}

/// Run sample `id` against an existing context
pub async fn run_with_context(ctx: &SampleContext, id: SampleId) -> SampleOutcome {
    let samples = catalog();
    let Some(sample) = samples.get(id.index()) else {
        return SampleOutcome::Failed(SelectionError::Invalid(id.number().to_string()).to_string());
    };

    console::banner(id.number(), sample.as_ref());
    info!(sample = %sample.name(), "run_with_context: starting");
    match sample.run(ctx).await {
        Ok(()) => {
            info!(sample = %sample.name(), "run_with_context: completed");
            SampleOutcome::Completed
        }
        Err(e) => {
            error!(sample = %sample.name(), error = %e, "run_with_context: failed");
            SampleOutcome::Failed(e.to_string())
        }
    }
}
