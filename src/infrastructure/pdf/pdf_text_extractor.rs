use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{ExtractedDocument, TextExtractor, TextExtractorError};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-page text extraction backed by lopdf, with a whole-document
/// `pdf-extract` pass as the secondary method when the primary finds
/// nothing.
#[derive(Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(data: &[u8]) -> Result<ExtractedDocument, TextExtractorError> {
        let doc = Document::load_mem(data).map_err(|e| {
            TextExtractorError::InvalidDocument(format!("failed to parse PDF: {e}"))
        })?;

        let pages = doc.get_pages();
        let page_count = pages.len();
        if page_count == 0 {
            return Err(TextExtractorError::NoTextFound(
                "document has no pages".to_string(),
            ));
        }

        let mut page_texts: Vec<String> = Vec::with_capacity(page_count);
        for number in pages.keys() {
            let text = doc.extract_text(&[*number]).unwrap_or_default();
            let clean = sanitize_extracted_text(&text);
            if !clean.is_empty() {
                page_texts.push(clean);
            }
        }

        if page_texts.is_empty() {
            // Secondary method; its own failure is only logged before the
            // final failure state.
            match pdf_extract::extract_text_from_mem(data) {
                Ok(text) => {
                    let clean = sanitize_extracted_text(&text);
                    if !clean.is_empty() {
                        return Ok(ExtractedDocument {
                            text: clean,
                            page_count,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Secondary text extraction failed");
                }
            }
            return Err(TextExtractorError::NoTextFound(
                "document contains no extractable text".to_string(),
            ));
        }

        Ok(ExtractedDocument {
            text: page_texts.join("\n\n"),
            page_count,
        })
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract(&self, data: &[u8]) -> Result<ExtractedDocument, TextExtractorError> {
        let owned = data.to_vec();

        let extracted = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocking(&owned)),
        )
        .await
        .map_err(|_| {
            TextExtractorError::InvalidDocument("PDF extraction timed out".to_string())
        })?
        .map_err(|e| TextExtractorError::InvalidDocument(format!("task join error: {e}")))??;

        tracing::info!(page_count = extracted.page_count, "PDF text extraction complete");
        Ok(extracted)
    }
}
