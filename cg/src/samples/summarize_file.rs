use async_trait::async_trait;
use prompttemplate::{PromptArguments, PromptTemplate};
use tracing::warn;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::send_prompt;

pub const SAMPLE_TEXT: &str = "sample.txt";

const TEMPLATE: &str = "Summarize the following text in three short bullet points.\n\n{{$input}}";

/// Used when the resource file is absent
const FALLBACK_TEXT: &str = "The printing press, developed by Johannes Gutenberg around 1440, \
made it possible to produce books quickly and cheaply. Before it, texts were copied by hand, \
which kept them rare and expensive. Within fifty years, presses across Europe had printed \
millions of volumes, spreading literacy, standardizing languages, and accelerating the \
exchange of scientific ideas.";

/// Summarize the contents of a text resource
pub struct SummarizeFile;

#[async_trait]
impl Sample for SummarizeFile {
    fn name(&self) -> &'static str {
        "summarize-file"
    }

    fn description(&self) -> &'static str {
        "Summarize a text file from the resource directory"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let text = match ctx.resources.read_text(SAMPLE_TEXT) {
            Ok(text) => {
                console::note(&format!("Read {} ({} bytes)", SAMPLE_TEXT, text.len()));
                text
            }
            Err(e) if e.is_not_found() => {
                warn!(error = %e, "SummarizeFile: using built-in text");
                console::warning(&format!("{}; summarizing built-in text instead", e));
                FALLBACK_TEXT.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        let prompt = PromptTemplate::new(TEMPLATE).render(&PromptArguments::new().with("input", text.trim()));
        console::user(&prompt);

        let reply = send_prompt(ctx.llm.as_ref(), &prompt, ctx.max_tokens).await?;
        console::assistant(&reply);
        Ok(())
    }
}
