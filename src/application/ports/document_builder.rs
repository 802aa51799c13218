use async_trait::async_trait;

use crate::domain::Payload;

/// Builds new PDF documents from text blocks or images.
#[async_trait]
pub trait DocumentBuilder: Send + Sync {
    /// One page per block; text is drawn as-is, not reflowed.
    async fn render_text_pages(&self, blocks: &[String]) -> Result<Vec<u8>, DocumentBuilderError>;

    /// One page per image, in input order, each page sized to the image's
    /// native dimensions.
    async fn compose_images(&self, images: &[Payload]) -> Result<Vec<u8>, DocumentBuilderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentBuilderError {
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
}
