use async_trait::async_trait;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: &[u8]) -> Result<ExtractedDocument, TextExtractorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    /// Full extracted text, pages joined by blank lines.
    pub text: String,
    pub page_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TextExtractorError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("no extractable text: {0}")]
    NoTextFound(String),
}
