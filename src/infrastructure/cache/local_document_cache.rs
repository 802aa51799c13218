use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CacheError, CachedDocument, DocumentCache};
use crate::domain::Payload;

const SLOT_DATA_FILE: &str = "last-document.bin";
const SLOT_META_FILE: &str = "last-document.json";

#[derive(Debug, Serialize, Deserialize)]
struct SlotMeta {
    filename: String,
    mime: String,
}

/// Filesystem-backed single-slot cache: one data file plus a small JSON
/// sidecar with the filename and MIME type. A store replaces whatever was
/// there before.
pub struct LocalDocumentCache {
    dir: PathBuf,
}

impl LocalDocumentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn data_path(&self) -> PathBuf {
        self.dir.join(SLOT_DATA_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join(SLOT_META_FILE)
    }
}

async fn remove_if_present(path: &Path) -> Result<(), CacheError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CacheError::WriteFailed(format!(
            "removing {} failed: {e}",
            path.display()
        ))),
    }
}

#[async_trait]
impl DocumentCache for LocalDocumentCache {
    #[tracing::instrument(skip(self, payload), fields(bytes = payload.size_bytes()))]
    async fn store(&self, filename: &str, payload: &Payload) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CacheError::WriteFailed(format!("creating cache dir failed: {e}")))?;

        let meta = SlotMeta {
            filename: filename.to_string(),
            mime: payload.mime.clone(),
        };
        let meta_json = serde_json::to_vec(&meta)
            .map_err(|e| CacheError::WriteFailed(format!("encoding slot metadata failed: {e}")))?;

        tokio::fs::write(self.data_path(), &payload.bytes)
            .await
            .map_err(|e| CacheError::WriteFailed(format!("writing slot data failed: {e}")))?;
        tokio::fs::write(self.meta_path(), &meta_json)
            .await
            .map_err(|e| CacheError::WriteFailed(format!("writing slot metadata failed: {e}")))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<CachedDocument>, CacheError> {
        let meta_json = match tokio::fs::read(self.meta_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::ReadFailed(format!(
                    "reading slot metadata failed: {e}"
                )));
            }
        };
        let meta: SlotMeta = serde_json::from_slice(&meta_json)
            .map_err(|e| CacheError::ReadFailed(format!("decoding slot metadata failed: {e}")))?;

        let bytes = match tokio::fs::read(self.data_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::ReadFailed(format!(
                    "reading slot data failed: {e}"
                )));
            }
        };

        Ok(Some(CachedDocument {
            filename: meta.filename,
            payload: Payload::new(meta.mime, bytes),
        }))
    }

    async fn clear(&self) -> Result<(), CacheError> {
        remove_if_present(&self.data_path()).await?;
        remove_if_present(&self.meta_path()).await
    }
}
