use async_trait::async_trait;

use crate::domain::Payload;

/// Single-slot cache for the last uploaded document. Last write wins, no
/// eviction policy; acceptable because there is no concurrent writer in a
/// single-user session.
#[async_trait]
pub trait DocumentCache: Send + Sync {
    async fn store(&self, filename: &str, payload: &Payload) -> Result<(), CacheError>;

    async fn load(&self) -> Result<Option<CachedDocument>, CacheError>;

    async fn clear(&self) -> Result<(), CacheError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedDocument {
    pub filename: String,
    pub payload: Payload,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache write failed: {0}")]
    WriteFailed(String),
    #[error("cache read failed: {0}")]
    ReadFailed(String),
}
