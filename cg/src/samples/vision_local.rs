use async_trait::async_trait;
use tracing::info;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::{ContentBlock, Message};

pub const LOCAL_IMAGE: &str = "images/sample.png";

const PROMPT: &str = "Describe this image in two sentences.";

/// Describe a local image sent inline as base64
pub struct VisionLocal;

#[async_trait]
impl Sample for VisionLocal {
    fn name(&self) -> &'static str {
        "vision-local"
    }

    fn description(&self) -> &'static str {
        "Describe a local image sent as a base64 data URI"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let image = ctx.resources.image_source(LOCAL_IMAGE)?;
        info!(path = %ctx.resources.path(LOCAL_IMAGE).display(), "VisionLocal: image encoded");
        console::user(&format!("{} [{}]", PROMPT, LOCAL_IMAGE));

        let message = Message::user_blocks(vec![ContentBlock::text(PROMPT), ContentBlock::image(image)]);
        let response = ctx.llm.complete(ctx.request(vec![message])).await?;
        console::assistant(response.text()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{ImageSource, MessageContent};
    use crate::samples::testing::context;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_image_sent_as_data_uri() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join(LOCAL_IMAGE), [0x89, b'P', b'N', b'G']).unwrap();
        let mock = Arc::new(MockLlmClient::replying(&["A tiny image."]));
        let ctx = context(mock.clone(), dir.path());

        VisionLocal.run(&ctx).await.unwrap();

        match &mock.requests()[0].messages[0].content {
            MessageContent::Blocks(blocks) => match &blocks[1] {
                ContentBlock::Image { source } => {
                    assert!(matches!(source, ImageSource::Base64 { .. }));
                    assert_eq!(source.to_url(), "data:image/png;base64,iVBORw==");
                }
                other => panic!("expected image, got {:?}", other),
            },
            other => panic!("expected blocks, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_image_aborts_before_request() {
        let dir = tempdir().unwrap();
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let ctx = context(mock.clone(), dir.path());

        let err = VisionLocal.run(&ctx).await.unwrap_err();
        assert!(matches!(err, SampleError::Resource(ref e) if e.is_not_found()));
        assert_eq!(mock.call_count(), 0);
    }
}
