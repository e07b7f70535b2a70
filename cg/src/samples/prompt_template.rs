use async_trait::async_trait;
use prompttemplate::{PromptArguments, PromptTemplate};
use tracing::debug;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::send_prompt;

const TEMPLATE: &str =
    "Write a two-line poem for {{$name}}, who loves {{$hobby}}. Sign it from {{$sender}}.";

/// (name, hobby) pairs bound in turn
const GUESTS: [(&str, &str); 2] = [("Ada", "mathematics"), ("Grace", "compilers")];

/// One inline template rendered with two argument sets
pub struct PromptTemplateSample;

#[async_trait]
impl Sample for PromptTemplateSample {
    fn name(&self) -> &'static str {
        "prompt-template"
    }

    fn description(&self) -> &'static str {
        "Render an inline {{$name}} template with different arguments"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let template = PromptTemplate::new(TEMPLATE);
        console::note(&format!("Template: {}", template));

        for (name, hobby) in GUESTS {
            let args = PromptArguments::new()
                .with("name", name)
                .with("hobby", hobby)
                .with("sender", "the gallery");
            let prompt = template.render(&args);
            debug!(%name, "PromptTemplateSample: rendered");
            console::user(&prompt);

            let reply = send_prompt(ctx.llm.as_ref(), &prompt, ctx.max_tokens).await?;
            console::assistant(&reply);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use crate::llm::client::mock::MockLlmClient;
    use crate::samples::testing::context;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_each_argument_set_is_sent() {
        let dir = tempdir().unwrap();
        let mock = Arc::new(MockLlmClient::replying(&["poem one", "poem two"]));
        let ctx = context(mock.clone(), dir.path());

        PromptTemplateSample.run(&ctx).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].messages[0],
            Message::user("Write a two-line poem for Ada, who loves mathematics. Sign it from the gallery.")
        );
        assert_eq!(
            requests[1].messages[0],
            Message::user("Write a two-line poem for Grace, who loves compilers. Sign it from the gallery.")
        );
    }
}
