use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    DetectedItem, KeyedSuggestion, ModelClient, ModelClientError, ShoppingQuery,
};
use crate::domain::{EcommerceLink, Payload, ShoppingSuggestion};

const MODEL_TIMEOUT: Duration = Duration::from_secs(300);

/// OpenAI-compatible model client. Every method is a single request with no
/// retry; the caller surfaces failures as job errors.
pub struct OpenAiModelClient {
    client: Client,
    base_url: String,
    chat_model: String,
    speech_model: String,
    api_key: String,
}

impl OpenAiModelClient {
    pub fn new(base_url: &str, chat_model: &str, speech_model: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(MODEL_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_model: chat_model.to_string(),
            speech_model: speech_model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn chat(&self, body: serde_json::Value) -> Result<String, ModelClientError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(format!("chat request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiRequestFailed(format!(
                "model API returned {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(format!("reading response: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            let raw_text = String::from_utf8_lossy(&raw_bytes);
            tracing::error!(raw_response = %raw_text, "Failed to parse model JSON");
            ModelClientError::InvalidResponse(format!("JSON parse error: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ModelClientError::EmptyOutput);
        }
        Ok(content)
    }

    fn text_chat_body(&self, system: &str, user: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.chat_model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "stream": false
        })
    }
}

/// Models often wrap JSON answers in a Markdown code fence despite being
/// told not to.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn summarize(&self, text: &str) -> Result<String, ModelClientError> {
        let body = self.text_chat_body(
            "You summarize documents. Produce a concise summary of the document \
             the user provides, keeping its key points and overall structure.",
            text,
        );
        self.chat(body).await
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.len(), target_language))]
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ModelClientError> {
        let body = self.text_chat_body(
            &format!(
                "Translate the document the user provides into {target_language}. \
                 Preserve paragraph breaks. Output only the translation."
            ),
            text,
        );
        self.chat(body).await
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.len(), voice))]
    async fn synthesize_speech(
        &self,
        text: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ModelClientError> {
        let url = format!("{}/v1/audio/speech", self.base_url);
        let body = serde_json::json!({
            "model": self.speech_model,
            "voice": voice,
            "input": text,
            "response_format": "pcm"
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(format!("speech request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiRequestFailed(format!(
                "speech API returned {status}: {text}"
            )));
        }

        let pcm = response
            .bytes()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(format!("reading audio: {e}")))?;
        Ok(pcm.to_vec())
    }

    #[tracing::instrument(skip(self, image), fields(bytes = image.size_bytes()))]
    async fn detect_clothing(
        &self,
        image: &Payload,
    ) -> Result<Vec<DetectedItem>, ModelClientError> {
        let body = serde_json::json!({
            "model": self.chat_model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": { "url": image.to_data_uri() }
                        },
                        {
                            "type": "text",
                            "text": "Detect every clothing item and accessory worn in this \
                                     image. For each one, also produce a cropped image that \
                                     contains only that item, as a data URI. Respond with a \
                                     JSON array of objects with fields itemType, description \
                                     and segmentedImage. Respond with JSON only, no prose."
                        }
                    ]
                }
            ],
            "stream": false
        });

        let content = self.chat(body).await?;
        let items: Vec<WireDetectedItem> = serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| {
                ModelClientError::InvalidResponse(format!("detection parse error: {e}"))
            })?;

        Ok(items
            .into_iter()
            .map(|w| DetectedItem {
                item_type: w.item_type,
                description: w.description,
                segmented_image: w.segmented_image,
            })
            .collect())
    }

    #[tracing::instrument(skip(self, queries), fields(count = queries.len()))]
    async fn shopping_suggestions(
        &self,
        queries: &[ShoppingQuery],
    ) -> Result<Vec<KeyedSuggestion>, ModelClientError> {
        let listed: Vec<String> = queries
            .iter()
            .map(|q| format!("key {}: {}", q.key, q.description))
            .collect();
        let prompt = format!(
            "For each clothing item below, suggest a comparable product someone \
             could buy online, with links to e-commerce platforms where it can \
             be found. Respond with a JSON object {{\"suggestions\": [...]}} \
             where each entry has fields key (the item's key, copied verbatim), \
             item, description and ecommerceLinks (array of objects with \
             platform and url). Respond with JSON only.\n\n{}",
            listed.join("\n")
        );

        let body = self.text_chat_body("You are a personal shopping assistant.", &prompt);
        let content = self.chat(body).await?;

        let parsed: WireSuggestions = serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| {
                ModelClientError::InvalidResponse(format!("suggestion parse error: {e}"))
            })?;

        Ok(parsed
            .suggestions
            .into_iter()
            .map(|w| KeyedSuggestion {
                key: w.key,
                suggestion: ShoppingSuggestion {
                    item: w.item,
                    description: w.description,
                    links: w
                        .ecommerce_links
                        .into_iter()
                        .map(|l| EcommerceLink {
                            platform: l.platform,
                            url: l.url,
                        })
                        .collect(),
                },
            })
            .collect())
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetectedItem {
    item_type: String,
    description: String,
    segmented_image: String,
}

#[derive(Deserialize)]
struct WireSuggestions {
    suggestions: Vec<WireSuggestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSuggestion {
    key: usize,
    item: String,
    description: String,
    #[serde(default)]
    ecommerce_links: Vec<WireLink>,
}

#[derive(Deserialize)]
struct WireLink {
    platform: String,
    url: String,
}
