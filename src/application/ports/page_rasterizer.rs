use async_trait::async_trait;

#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Renders each page of a PDF to a PNG buffer, in page order.
    async fn rasterize(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, RasterizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
}
