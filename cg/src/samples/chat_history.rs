use async_trait::async_trait;
use tracing::{debug, info};

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::{ChatHistory, send_history};

const SYSTEM: &str = "You are a friendly travel assistant. Keep every answer under three sentences.";

const TURNS: [&str; 3] = [
    "I'd like to visit Japan in spring. Which city should I start in?",
    "What local food should I try there?",
    "Summarize your suggestions in one sentence.",
];

/// Multi-turn conversation that remembers earlier replies
pub struct ChatHistorySample;

#[async_trait]
impl Sample for ChatHistorySample {
    fn name(&self) -> &'static str {
        "chat-history"
    }

    fn description(&self) -> &'static str {
        "Hold a three-turn conversation with a system prompt"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let mut history = ChatHistory::with_system(SYSTEM);
        console::note(&format!("System: {}", SYSTEM));

        for (turn, text) in TURNS.iter().enumerate() {
            debug!(%turn, "ChatHistorySample: next turn");
            history.add_user(*text);
            console::user(text);

            let reply = send_history(ctx.llm.as_ref(), &history, ctx.max_tokens).await?;
            console::assistant(&reply);
            history.add_assistant(reply);
        }

        info!(messages = %history.len(), "ChatHistorySample: conversation finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{Message, Role};
    use crate::samples::testing::context;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_history_grows_each_turn() {
        let dir = tempdir().unwrap();
        let mock = Arc::new(MockLlmClient::replying(&["Kyoto.", "Try yudofu.", "Kyoto and tofu."]));
        let ctx = context(mock.clone(), dir.path());

        ChatHistorySample.run(&ctx).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].messages.len(), 2);
        assert_eq!(requests[1].messages.len(), 4);
        assert_eq!(requests[2].messages.len(), 6);
        assert!(requests.iter().all(|r| r.max_tokens == 512));

        let last = &requests[2].messages;
        assert_eq!(last[0].role, Role::System);
        assert_eq!(last[2], Message::assistant("Kyoto."));
        assert_eq!(last[4], Message::assistant("Try yudofu."));
        assert_eq!(last[5], Message::user(TURNS[2]));
    }

    #[tokio::test]
    async fn test_failure_mid_conversation_stops() {
        let dir = tempdir().unwrap();
        let mock = Arc::new(MockLlmClient::replying(&["Kyoto."]));
        let ctx = context(mock.clone(), dir.path());

        assert!(ChatHistorySample.run(&ctx).await.is_err());
        assert_eq!(mock.call_count(), 2);
    }
}
