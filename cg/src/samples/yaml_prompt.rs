use async_trait::async_trait;
use prompttemplate::{PromptArguments, PromptDocument};
use tracing::info;

use super::{Sample, SampleContext, SampleError, document_request};
use crate::console;

pub const STORY_PROMPT: &str = "prompts/story.yaml";
pub const HAIKU_PROMPT: &str = "prompts/haiku.yaml";

/// Prompts loaded from YAML documents in both template formats
pub struct YamlPrompt;

impl YamlPrompt {
    async fn run_document(
        &self,
        ctx: &SampleContext,
        resource: &str,
        args: PromptArguments,
    ) -> Result<(), SampleError> {
        let doc = PromptDocument::from_yaml(&ctx.resources.read_text(resource)?)?;
        info!(name = %doc.name, format = ?doc.template_format, "YamlPrompt: loaded document");
        console::section(&format!("{} ({})", doc.name, resource));
        if !doc.description.is_empty() {
            console::note(&doc.description);
        }

        let prompt = doc.render(&args)?;
        console::user(prompt.trim_end());

        let request = document_request(&doc, prompt, ctx.max_tokens);
        let response = ctx.llm.complete(request).await?;
        console::assistant(response.text()?);
        Ok(())
    }
}

#[async_trait]
impl Sample for YamlPrompt {
    fn name(&self) -> &'static str {
        "yaml-prompt"
    }

    fn description(&self) -> &'static str {
        "Load prompt documents from YAML and render them"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        self.run_document(
            ctx,
            STORY_PROMPT,
            PromptArguments::new().with("topic", "a robot learning to paint"),
        )
        .await?;

        self.run_document(
            ctx,
            HAIKU_PROMPT,
            PromptArguments::new().with("subject", "autumn leaves").with("mood", "wistful"),
        )
        .await
    }
}
