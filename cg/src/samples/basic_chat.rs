use async_trait::async_trait;
use tracing::info;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::send_prompt;

const PROMPT: &str = "Tell me one surprising fact about octopuses in two sentences.";

/// Single prompt, single reply
pub struct BasicChat;

#[async_trait]
impl Sample for BasicChat {
    fn name(&self) -> &'static str {
        "basic-chat"
    }

    fn description(&self) -> &'static str {
        "Send one prompt and print the reply"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        info!(model = %ctx.llm.model(), "BasicChat: sending prompt");
        console::user(PROMPT);

        let reply = send_prompt(ctx.llm.as_ref(), PROMPT, ctx.max_tokens).await?;
        console::assistant(&reply);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{LlmError, Message};
    use crate::samples::testing::context;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sends_single_user_message() {
        let dir = tempdir().unwrap();
        let mock = Arc::new(MockLlmClient::replying(&["They have three hearts."]));
        let ctx = context(mock.clone(), dir.path());

        BasicChat.run(&ctx).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages, vec![Message::user(PROMPT)]);
        assert_eq!(requests[0].max_tokens, 512);
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        let dir = tempdir().unwrap();
        let ctx = context(Arc::new(MockLlmClient::new(vec![])), dir.path());

        let err = BasicChat.run(&ctx).await.unwrap_err();
        assert!(matches!(err, SampleError::Llm(LlmError::InvalidResponse(_))));
    }
}
