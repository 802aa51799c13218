use async_trait::async_trait;

use crate::domain::Payload;

/// Fetches a remote resource server-side and validates its content type.
/// Fetching happens on the server to avoid cross-origin restrictions on
/// the client.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, url: &str, expected_mime: &str) -> Result<Payload, RemoteFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteFetchError {
    #[error("fetch failed: {0}")]
    RequestFailed(String),
    #[error("unexpected content type: expected {expected}, got {actual}")]
    UnexpectedContentType { expected: String, actual: String },
}
