use async_trait::async_trait;

use crate::domain::{Payload, ShoppingSuggestion};

/// Boundary around the external generative model. Every call is stateless
/// and single-shot; retries are the caller's decision (currently: none).
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, ModelClientError>;

    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, ModelClientError>;

    /// Returns raw headerless PCM: mono, 24 kHz, 16-bit little-endian.
    /// Wrapping into a playable container is the gateway's job.
    async fn synthesize_speech(&self, text: &str, voice: &str)
        -> Result<Vec<u8>, ModelClientError>;

    /// Zero detected items is a valid, non-error outcome.
    async fn detect_clothing(&self, image: &Payload)
        -> Result<Vec<DetectedItem>, ModelClientError>;

    /// Each returned suggestion carries the `key` of the query it answers so
    /// the caller can pair results without relying on array order.
    async fn shopping_suggestions(
        &self,
        queries: &[ShoppingQuery],
    ) -> Result<Vec<KeyedSuggestion>, ModelClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedItem {
    pub item_type: String,
    pub description: String,
    /// Data URI of the segmented image containing only this item.
    pub segmented_image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingQuery {
    pub key: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedSuggestion {
    pub key: usize,
    pub suggestion: ShoppingSuggestion,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned no usable output")]
    EmptyOutput,
}
