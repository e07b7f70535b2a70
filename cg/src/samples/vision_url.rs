use async_trait::async_trait;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::{ContentBlock, ImageSource, Message};

pub const IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/d/dd/Gfp-wisconsin-madison-the-nature-boardwalk.jpg/2560px-Gfp-wisconsin-madison-the-nature-boardwalk.jpg";

const PROMPT: &str = "Describe this image in two sentences.";

/// Describe an image referenced by URL
pub struct VisionUrl;

#[async_trait]
impl Sample for VisionUrl {
    fn name(&self) -> &'static str {
        "vision-url"
    }

    fn description(&self) -> &'static str {
        "Describe an image given by URL"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        console::user(&format!("{} [{}]", PROMPT, IMAGE_URL));

        let message = Message::user_blocks(vec![
            ContentBlock::text(PROMPT),
            ContentBlock::image(ImageSource::url(IMAGE_URL)),
        ]);
        let response = ctx.llm.complete(ctx.request(vec![message])).await?;
        console::assistant(response.text()?);
        Ok(())
    }
}
