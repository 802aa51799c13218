use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{RemoteFetcher, RemoteFetchError};
use crate::domain::Payload;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads remote documents over HTTP and checks the advertised content
/// type before handing the bytes to the caller.
pub struct HttpRemoteFetcher {
    client: Client,
}

impl HttpRemoteFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self { client }
    }
}

impl Default for HttpRemoteFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str, expected_mime: &str) -> Result<Payload, RemoteFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteFetchError::RequestFailed(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::RequestFailed(format!(
                "GET {url} returned {status}"
            )));
        }

        // Content-Type may carry parameters ("application/pdf; charset=..."),
        // only the essence is compared.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type != expected_mime {
            return Err(RemoteFetchError::UnexpectedContentType {
                expected: expected_mime.to_string(),
                actual: content_type,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteFetchError::RequestFailed(format!("reading body failed: {e}")))?;

        tracing::info!(bytes = bytes.len(), "Remote document fetched");
        Ok(Payload::new(expected_mime, bytes.to_vec()))
    }
}
