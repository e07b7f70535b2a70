//! Function calling
//!
//! The model is offered the built-in tools. Each round either ends with a
//! text answer or with tool calls, which are executed locally and fed back
//! as tool results before asking again.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::{ChatHistory, ContentBlock, Message};
use crate::tools::ToolExecutor;

/// Upper bound on model/tool round trips before giving up
pub const MAX_TOOL_ROUNDS: usize = 5;

const SYSTEM: &str = "You are a helpful assistant. Use the available tools whenever a question needs live data.";

const QUESTION: &str = "What's the weather like in Paris and in Tokyo right now, and what time is it in Tokyo (UTC+9)?";

pub struct FunctionCalling;

#[async_trait]
impl Sample for FunctionCalling {
    fn name(&self) -> &'static str {
        "function-calling"
    }

    fn description(&self) -> &'static str {
        "Let the model call local tools to answer a question"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let executor = ToolExecutor::standard();
        let definitions = executor.definitions();
        let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        console::note(&format!("Tools: {}", names.join(", ")));

        let mut history = ChatHistory::with_system(SYSTEM);
        history.add_user(QUESTION);
        console::user(QUESTION);

        for round in 1..=MAX_TOOL_ROUNDS {
            debug!(%round, "FunctionCalling: requesting completion");
            let request = ctx.request(history.messages().to_vec()).with_tools(definitions.clone());
            let response = ctx.llm.complete(request).await?;

            if !response.wants_tools() {
                info!(%round, "FunctionCalling: final answer received");
                console::assistant(response.text()?);
                return Ok(());
            }

            let mut blocks = Vec::with_capacity(response.tool_calls.len() + 1);
            if let Some(text) = response.content.as_deref().filter(|t| !t.is_empty()) {
                blocks.push(ContentBlock::text(text));
            }
            blocks.extend(response.tool_calls.iter().map(ContentBlock::tool_use));
            history.add_message(Message::assistant_blocks(blocks));

            for call in &response.tool_calls {
                console::tool(&call.name, &call.input.to_string());
            }

            let results = executor.execute_all(&response.tool_calls).await;
            let blocks = results
                .into_iter()
                .map(|(id, result)| {
                    if result.is_error {
                        warn!(%id, content = %result.content, "FunctionCalling: tool failed");
                    }
                    ContentBlock::tool_result(id, result.content, result.is_error)
                })
                .collect();
            history.add_user_blocks(blocks);
        }

        Err(SampleError::ToolRounds(MAX_TOOL_ROUNDS))
    }
}
