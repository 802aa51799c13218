use async_trait::async_trait;

use crate::application::ports::{
    DetectedItem, KeyedSuggestion, ModelClient, ModelClientError, ShoppingQuery,
};
use crate::domain::{EcommerceLink, Payload, ShoppingSuggestion};

/// Deterministic stand-in used when no API key is configured, so the whole
/// pipeline can be exercised locally without a model endpoint.
#[derive(Default)]
pub struct MockModelClient;

impl MockModelClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn summarize(&self, text: &str) -> Result<String, ModelClientError> {
        let preview: String = text.chars().take(200).collect();
        Ok(format!("Summary of a {} character document: {preview}", text.len()))
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ModelClientError> {
        Ok(format!("[{target_language}] {text}"))
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        _voice: &str,
    ) -> Result<Vec<u8>, ModelClientError> {
        // 100 ms of silence per character, capped; enough for a playable file.
        let samples = (text.len().min(100) + 1) * 2400;
        Ok(vec![0u8; samples * 2])
    }

    async fn detect_clothing(
        &self,
        image: &Payload,
    ) -> Result<Vec<DetectedItem>, ModelClientError> {
        Ok(vec![DetectedItem {
            item_type: "jacket".to_string(),
            description: "A jacket detected in the uploaded photo".to_string(),
            segmented_image: image.to_data_uri(),
        }])
    }

    async fn shopping_suggestions(
        &self,
        queries: &[ShoppingQuery],
    ) -> Result<Vec<KeyedSuggestion>, ModelClientError> {
        Ok(queries
            .iter()
            .map(|q| KeyedSuggestion {
                key: q.key,
                suggestion: ShoppingSuggestion {
                    item: format!("Item {}", q.key),
                    description: q.description.clone(),
                    links: vec![EcommerceLink {
                        platform: "example".to_string(),
                        url: "https://shop.example.com".to_string(),
                    }],
                },
            })
            .collect())
    }
}
