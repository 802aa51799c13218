use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    DocumentBuilder, DocumentBuilderError, ModelClient, ModelClientError, PageRasterizer,
    RasterizeError, RemoteFetchError, RemoteFetcher, ShoppingQuery, TextExtractor,
    TextExtractorError,
};
use crate::domain::{ErrorKind, InputRef, JobError, JobResult, OutfitItem, Payload};

use super::wav::wrap_pcm_in_wav;

/// Extracted text is capped before submission to respect downstream model
/// limits. Content beyond the budget is silently dropped, not chunked.
pub const NARRATION_TEXT_BUDGET: usize = 10_000;
pub const TRANSLATION_TEXT_BUDGET: usize = 15_000;

const PDF_MIME: &str = "application/pdf";

/// Uniform entry point for every remote operation. Stateless, single-shot,
/// non-retrying: failures surface immediately as result objects and each job
/// is manually re-triggerable by the user.
pub struct OperationGateway {
    model: Arc<dyn ModelClient>,
    extractor: Arc<dyn TextExtractor>,
    builder: Arc<dyn DocumentBuilder>,
    rasterizer: Arc<dyn PageRasterizer>,
    fetcher: Arc<dyn RemoteFetcher>,
}

impl OperationGateway {
    pub fn new(
        model: Arc<dyn ModelClient>,
        extractor: Arc<dyn TextExtractor>,
        builder: Arc<dyn DocumentBuilder>,
        rasterizer: Arc<dyn PageRasterizer>,
        fetcher: Arc<dyn RemoteFetcher>,
    ) -> Self {
        Self {
            model,
            extractor,
            builder,
            rasterizer,
            fetcher,
        }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn summarize(&self, input: &InputRef) -> Result<JobResult, OperationError> {
        let document = self.resolve_document(input).await?;
        let extracted = self.extractor.extract(&document.bytes).await?;

        let summary = self.model.summarize(&extracted.text).await?;
        if summary.trim().is_empty() {
            return Err(OperationError::new(
                ErrorKind::ModelFailure,
                "Could not generate summary",
            ));
        }

        tracing::info!(page_count = extracted.page_count, "Summary generated");
        Ok(JobResult::Summary {
            summary,
            page_count: extracted.page_count,
        })
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn translate(
        &self,
        input: &InputRef,
        target_language: &str,
    ) -> Result<JobResult, OperationError> {
        let document = self.resolve_document(input).await?;
        let extracted = self.extractor.extract(&document.bytes).await?;
        let budgeted = truncate_chars(&extracted.text, TRANSLATION_TEXT_BUDGET);

        let translated = self.model.translate(budgeted, target_language).await?;

        // One page per blank-line-separated block. Deliberately not reflowed.
        let blocks: Vec<String> = translated
            .split("\n\n")
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(String::from)
            .collect();
        if blocks.is_empty() {
            return Err(OperationError::new(
                ErrorKind::ModelFailure,
                "Could not generate translation",
            ));
        }

        let pdf_bytes = self.builder.render_text_pages(&blocks).await?;
        tracing::info!(pages = blocks.len(), target_language, "Translated document rendered");
        Ok(JobResult::Translation {
            document: Payload::new(PDF_MIME, pdf_bytes),
            translated_text: translated,
        })
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn narrate(
        &self,
        input: &InputRef,
        voice: &str,
    ) -> Result<JobResult, OperationError> {
        let document = self.resolve_document(input).await?;
        let extracted = self.extractor.extract(&document.bytes).await?;
        let budgeted = truncate_chars(&extracted.text, NARRATION_TEXT_BUDGET);

        // The synthesis capability returns raw headerless PCM; wrap it into
        // a playable WAV container here.
        let pcm = self.model.synthesize_speech(budgeted, voice).await?;
        if pcm.is_empty() {
            return Err(OperationError::new(
                ErrorKind::ModelFailure,
                "Audio generation failed: no media was returned",
            ));
        }

        Ok(JobResult::Narration {
            audio: Payload::new("audio/wav", wrap_pcm_in_wav(&pcm)),
        })
    }

    /// Detection and shopping suggestions as one combined operation. Each
    /// detected item is assigned a correlation key that the suggestion call
    /// echoes back, so pairing never depends on array position.
    #[tracing::instrument(skip(self, image))]
    pub async fn detect_outfit(&self, image: &Payload) -> Result<JobResult, OperationError> {
        let items = self.model.detect_clothing(image).await?;
        if items.is_empty() {
            tracing::info!("No clothing items detected");
            return Ok(JobResult::Outfit(Vec::new()));
        }

        let queries: Vec<ShoppingQuery> = items
            .iter()
            .enumerate()
            .map(|(key, item)| ShoppingQuery {
                key,
                description: item.description.clone(),
            })
            .collect();
        let keyed = self.model.shopping_suggestions(&queries).await?;

        let mut by_key: HashMap<usize, Vec<_>> = HashMap::new();
        for suggestion in keyed {
            by_key
                .entry(suggestion.key)
                .or_default()
                .push(suggestion.suggestion);
        }

        let outfit = items
            .into_iter()
            .enumerate()
            .map(|(key, item)| OutfitItem {
                item_type: item.item_type,
                description: item.description,
                segmented_image: item.segmented_image,
                suggestions: by_key.remove(&key).unwrap_or_default(),
            })
            .collect();
        Ok(JobResult::Outfit(outfit))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn convert_to_images(&self, input: &InputRef) -> Result<JobResult, OperationError> {
        let document = self.resolve_document(input).await?;
        let pages = self.rasterizer.rasterize(&document.bytes).await?;
        if pages.is_empty() {
            return Err(OperationError::new(
                ErrorKind::EmptyDocument,
                "Document has no pages to convert",
            ));
        }

        let images = pages
            .into_iter()
            .map(|png| Payload::new("image/png", png))
            .collect();
        Ok(JobResult::PageImages(images))
    }

    #[tracing::instrument(skip(self, images))]
    pub async fn convert_from_images(&self, images: &[Payload]) -> Result<JobResult, OperationError> {
        if images.is_empty() {
            return Err(OperationError::new(
                ErrorKind::ValidationFailure,
                "No images provided for conversion",
            ));
        }

        let pdf_bytes = self.builder.compose_images(images).await?;
        tracing::info!(pages = images.len(), "Images composed into document");
        Ok(JobResult::Document(Payload::new(PDF_MIME, pdf_bytes)))
    }

    async fn resolve_document(&self, input: &InputRef) -> Result<Payload, OperationError> {
        match input {
            InputRef::Inline(payload) => Ok(payload.clone()),
            InputRef::Remote(url) => Ok(self.fetcher.fetch(url, PDF_MIME).await?),
            InputRef::Batch(_) => Err(OperationError::new(
                ErrorKind::ValidationFailure,
                "Expected a single document input",
            )),
        }
    }
}

/// Cuts `text` to at most `budget` characters. A text of exactly the budget
/// passes through unmodified.
fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Expected failure of a remote operation, surfaced as a value rather than
/// a panic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<OperationError> for JobError {
    fn from(e: OperationError) -> Self {
        JobError::new(e.kind, e.message)
    }
}

impl From<ModelClientError> for OperationError {
    fn from(e: ModelClientError) -> Self {
        Self::new(ErrorKind::ModelFailure, e.to_string())
    }
}

impl From<TextExtractorError> for OperationError {
    fn from(e: TextExtractorError) -> Self {
        Self::new(ErrorKind::ExtractionFailure, e.to_string())
    }
}

impl From<RemoteFetchError> for OperationError {
    fn from(e: RemoteFetchError) -> Self {
        let kind = match &e {
            RemoteFetchError::RequestFailed(_) => ErrorKind::FetchFailure,
            RemoteFetchError::UnexpectedContentType { .. } => ErrorKind::InvalidRemoteContentType,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<DocumentBuilderError> for OperationError {
    fn from(e: DocumentBuilderError) -> Self {
        let kind = match &e {
            DocumentBuilderError::InvalidImage(_) => ErrorKind::InvalidInputType,
            DocumentBuilderError::RenderFailed(_) => ErrorKind::ExtractionFailure,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<RasterizeError> for OperationError {
    fn from(e: RasterizeError) -> Self {
        Self::new(ErrorKind::ExtractionFailure, e.to_string())
    }
}
