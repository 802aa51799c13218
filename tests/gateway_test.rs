use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use docpilot::application::ports::{
    DetectedItem, DocumentBuilder, DocumentBuilderError, ExtractedDocument, KeyedSuggestion,
    ModelClient, ModelClientError, PageRasterizer, RasterizeError, RemoteFetchError,
    RemoteFetcher, ShoppingQuery, TextExtractor, TextExtractorError,
};
use docpilot::application::services::{
    NARRATION_TEXT_BUDGET, OperationGateway, TRANSLATION_TEXT_BUDGET, WAV_SAMPLE_RATE,
};
use docpilot::domain::{
    EcommerceLink, ErrorKind, InputRef, JobResult, Payload, ShoppingSuggestion,
};

#[derive(Default)]
struct RecordingModel {
    summarize_output: Option<String>,
    translate_output: Option<String>,
    pcm_output: Vec<u8>,
    detected: Vec<DetectedItem>,
    suggestions: Vec<KeyedSuggestion>,
    last_text: Mutex<Option<String>>,
    last_queries: Mutex<Vec<ShoppingQuery>>,
}

#[async_trait]
impl ModelClient for RecordingModel {
    async fn summarize(&self, text: &str) -> Result<String, ModelClientError> {
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(self.summarize_output.clone().unwrap_or_default())
    }

    async fn translate(
        &self,
        text: &str,
        _target_language: &str,
    ) -> Result<String, ModelClientError> {
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(self.translate_output.clone().unwrap_or_default())
    }

    async fn synthesize_speech(
        &self,
        text: &str,
        _voice: &str,
    ) -> Result<Vec<u8>, ModelClientError> {
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(self.pcm_output.clone())
    }

    async fn detect_clothing(
        &self,
        _image: &Payload,
    ) -> Result<Vec<DetectedItem>, ModelClientError> {
        Ok(self.detected.clone())
    }

    async fn shopping_suggestions(
        &self,
        queries: &[ShoppingQuery],
    ) -> Result<Vec<KeyedSuggestion>, ModelClientError> {
        *self.last_queries.lock().unwrap() = queries.to_vec();
        Ok(self.suggestions.clone())
    }
}

struct FixedExtractor {
    text: String,
    page_count: usize,
}

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, _data: &[u8]) -> Result<ExtractedDocument, TextExtractorError> {
        Ok(ExtractedDocument {
            text: self.text.clone(),
            page_count: self.page_count,
        })
    }
}

struct FailingExtractor;

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract(&self, _data: &[u8]) -> Result<ExtractedDocument, TextExtractorError> {
        Err(TextExtractorError::InvalidDocument(
            "not a pdf".to_string(),
        ))
    }
}

#[derive(Default)]
struct RecordingBuilder {
    last_blocks: Mutex<Vec<String>>,
    last_image_count: Mutex<usize>,
}

#[async_trait]
impl DocumentBuilder for RecordingBuilder {
    async fn render_text_pages(&self, blocks: &[String]) -> Result<Vec<u8>, DocumentBuilderError> {
        *self.last_blocks.lock().unwrap() = blocks.to_vec();
        Ok(b"%PDF-rendered".to_vec())
    }

    async fn compose_images(&self, images: &[Payload]) -> Result<Vec<u8>, DocumentBuilderError> {
        *self.last_image_count.lock().unwrap() = images.len();
        Ok(b"%PDF-composed".to_vec())
    }
}

struct FixedRasterizer {
    pages: Vec<Vec<u8>>,
}

#[async_trait]
impl PageRasterizer for FixedRasterizer {
    async fn rasterize(&self, _data: &[u8]) -> Result<Vec<Vec<u8>>, RasterizeError> {
        Ok(self.pages.clone())
    }
}

struct RejectingFetcher;

#[async_trait]
impl RemoteFetcher for RejectingFetcher {
    async fn fetch(&self, _url: &str, expected_mime: &str) -> Result<Payload, RemoteFetchError> {
        Err(RemoteFetchError::UnexpectedContentType {
            expected: expected_mime.to_string(),
            actual: "text/html".to_string(),
        })
    }
}

struct NoopFetcher;

#[async_trait]
impl RemoteFetcher for NoopFetcher {
    async fn fetch(&self, _url: &str, _expected_mime: &str) -> Result<Payload, RemoteFetchError> {
        Err(RemoteFetchError::RequestFailed("unexpected fetch".to_string()))
    }
}

struct GatewaySetup {
    model: Arc<RecordingModel>,
    builder: Arc<RecordingBuilder>,
    gateway: OperationGateway,
}

fn gateway_with(model: RecordingModel, extractor: Arc<dyn TextExtractor>) -> GatewaySetup {
    let model = Arc::new(model);
    let builder = Arc::new(RecordingBuilder::default());
    let gateway = OperationGateway::new(
        Arc::clone(&model) as _,
        extractor,
        Arc::clone(&builder) as _,
        Arc::new(FixedRasterizer { pages: Vec::new() }),
        Arc::new(NoopFetcher),
    );
    GatewaySetup {
        model,
        builder,
        gateway,
    }
}

fn inline_pdf() -> InputRef {
    InputRef::Inline(Payload::new("application/pdf", b"%PDF-1.5".to_vec()))
}

#[tokio::test]
async fn given_extractable_document_when_summarized_then_summary_and_page_count_returned() {
    let setup = gateway_with(
        RecordingModel {
            summarize_output: Some("A fine document.".to_string()),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "body text".to_string(),
            page_count: 7,
        }),
    );

    let result = setup.gateway.summarize(&inline_pdf()).await.unwrap();

    assert_eq!(
        result,
        JobResult::Summary {
            summary: "A fine document.".to_string(),
            page_count: 7,
        }
    );
}

#[tokio::test]
async fn given_unreadable_document_when_summarized_then_extraction_failure_returned() {
    let setup = gateway_with(RecordingModel::default(), Arc::new(FailingExtractor));

    let error = setup.gateway.summarize(&inline_pdf()).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::ExtractionFailure);
}

#[tokio::test]
async fn given_empty_summary_when_summarized_then_model_failure_returned() {
    let setup = gateway_with(
        RecordingModel {
            summarize_output: Some("   ".to_string()),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "body".to_string(),
            page_count: 1,
        }),
    );

    let error = setup.gateway.summarize(&inline_pdf()).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::ModelFailure);
}

#[tokio::test]
async fn given_text_at_narration_budget_when_narrated_then_it_passes_unmodified() {
    let text = "a".repeat(NARRATION_TEXT_BUDGET);
    let setup = gateway_with(
        RecordingModel {
            pcm_output: vec![0; 4800],
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: text.clone(),
            page_count: 1,
        }),
    );

    setup.gateway.narrate(&inline_pdf(), "alloy").await.unwrap();

    let sent = setup.model.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(sent.chars().count(), NARRATION_TEXT_BUDGET);
    assert_eq!(sent, text);
}

#[tokio::test]
async fn given_text_above_narration_budget_when_narrated_then_it_is_truncated() {
    let setup = gateway_with(
        RecordingModel {
            pcm_output: vec![0; 4800],
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "b".repeat(NARRATION_TEXT_BUDGET + 1),
            page_count: 1,
        }),
    );

    setup.gateway.narrate(&inline_pdf(), "alloy").await.unwrap();

    let sent = setup.model.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(sent.chars().count(), NARRATION_TEXT_BUDGET);
}

#[tokio::test]
async fn given_pcm_output_when_narrated_then_audio_is_wav_mono_24khz_16bit() {
    let setup = gateway_with(
        RecordingModel {
            pcm_output: vec![1, 2, 3, 4],
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "read me".to_string(),
            page_count: 1,
        }),
    );

    let result = setup.gateway.narrate(&inline_pdf(), "alloy").await.unwrap();

    let JobResult::Narration { audio } = result else {
        panic!("expected a narration result");
    };
    assert_eq!(audio.mime, "audio/wav");
    let bytes = &audio.bytes;
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    // channels at offset 22, sample rate at 24, bits per sample at 34
    assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
    assert_eq!(
        u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
        WAV_SAMPLE_RATE
    );
    assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
    assert_eq!(&bytes[44..], &[1, 2, 3, 4]);
}

#[tokio::test]
async fn given_empty_pcm_when_narrated_then_model_failure_returned() {
    let setup = gateway_with(
        RecordingModel::default(),
        Arc::new(FixedExtractor {
            text: "read me".to_string(),
            page_count: 1,
        }),
    );

    let error = setup
        .gateway
        .narrate(&inline_pdf(), "alloy")
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::ModelFailure);
}

#[tokio::test]
async fn given_translation_with_two_blocks_when_translated_then_two_pages_rendered() {
    let setup = gateway_with(
        RecordingModel {
            translate_output: Some("First paragraph.\n\nSecond paragraph.".to_string()),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "source".to_string(),
            page_count: 1,
        }),
    );

    let result = setup
        .gateway
        .translate(&inline_pdf(), "French")
        .await
        .unwrap();

    let blocks = setup.builder.last_blocks.lock().unwrap().clone();
    assert_eq!(blocks, vec!["First paragraph.", "Second paragraph."]);
    let JobResult::Translation {
        document,
        translated_text,
    } = result
    else {
        panic!("expected a translation result");
    };
    assert_eq!(document.mime, "application/pdf");
    assert_eq!(translated_text, "First paragraph.\n\nSecond paragraph.");
}

#[tokio::test]
async fn given_text_above_translation_budget_when_translated_then_it_is_truncated() {
    let setup = gateway_with(
        RecordingModel {
            translate_output: Some("ok".to_string()),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "c".repeat(TRANSLATION_TEXT_BUDGET + 50),
            page_count: 1,
        }),
    );

    setup
        .gateway
        .translate(&inline_pdf(), "German")
        .await
        .unwrap();

    let sent = setup.model.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(sent.chars().count(), TRANSLATION_TEXT_BUDGET);
}

#[tokio::test]
async fn given_whitespace_translation_when_translated_then_model_failure_returned() {
    let setup = gateway_with(
        RecordingModel {
            translate_output: Some("\n\n  \n\n".to_string()),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: "source".to_string(),
            page_count: 1,
        }),
    );

    let error = setup
        .gateway
        .translate(&inline_pdf(), "French")
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::ModelFailure);
}

#[tokio::test]
async fn given_no_detected_items_when_detecting_outfit_then_empty_result_is_success() {
    let setup = gateway_with(
        RecordingModel::default(),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );
    let image = Payload::new("image/png", vec![0; 16]);

    let result = setup.gateway.detect_outfit(&image).await.unwrap();

    assert_eq!(result, JobResult::Outfit(Vec::new()));
    // No detection means no suggestion call either.
    assert!(setup.model.last_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_suggestions_out_of_order_when_detecting_outfit_then_pairing_follows_keys() {
    let suggestion = |name: &str| ShoppingSuggestion {
        item: name.to_string(),
        description: format!("{name} description"),
        links: vec![EcommerceLink {
            platform: "shop".to_string(),
            url: "https://shop.example.com".to_string(),
        }],
    };
    let setup = gateway_with(
        RecordingModel {
            detected: vec![
                DetectedItem {
                    item_type: "jacket".to_string(),
                    description: "blue jacket".to_string(),
                    segmented_image: "data:image/png;base64,AA==".to_string(),
                },
                DetectedItem {
                    item_type: "shoes".to_string(),
                    description: "white shoes".to_string(),
                    segmented_image: "data:image/png;base64,BB==".to_string(),
                },
            ],
            // Answers arrive in reverse order; keys still pair them right.
            suggestions: vec![
                KeyedSuggestion {
                    key: 1,
                    suggestion: suggestion("shoes match"),
                },
                KeyedSuggestion {
                    key: 0,
                    suggestion: suggestion("jacket match"),
                },
            ],
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );
    let image = Payload::new("image/png", vec![0; 16]);

    let result = setup.gateway.detect_outfit(&image).await.unwrap();

    let JobResult::Outfit(items) = result else {
        panic!("expected an outfit result");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_type, "jacket");
    assert_eq!(items[0].suggestions[0].item, "jacket match");
    assert_eq!(items[1].item_type, "shoes");
    assert_eq!(items[1].suggestions[0].item, "shoes match");
}

#[tokio::test]
async fn given_item_without_suggestion_when_detecting_outfit_then_it_keeps_empty_suggestions() {
    let setup = gateway_with(
        RecordingModel {
            detected: vec![DetectedItem {
                item_type: "hat".to_string(),
                description: "red hat".to_string(),
                segmented_image: "data:image/png;base64,CC==".to_string(),
            }],
            suggestions: Vec::new(),
            ..Default::default()
        },
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );
    let image = Payload::new("image/png", vec![0; 16]);

    let result = setup.gateway.detect_outfit(&image).await.unwrap();

    let JobResult::Outfit(items) = result else {
        panic!("expected an outfit result");
    };
    assert_eq!(items.len(), 1);
    assert!(items[0].suggestions.is_empty());
}

#[tokio::test]
async fn given_three_rendered_pages_when_converting_to_images_then_order_is_preserved() {
    let gateway = OperationGateway::new(
        Arc::new(RecordingModel::default()),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
        Arc::new(RecordingBuilder::default()),
        Arc::new(FixedRasterizer {
            pages: vec![vec![1], vec![2], vec![3]],
        }),
        Arc::new(NoopFetcher),
    );

    let result = gateway.convert_to_images(&inline_pdf()).await.unwrap();

    let JobResult::PageImages(images) = result else {
        panic!("expected page images");
    };
    assert_eq!(images.len(), 3);
    assert!(images.iter().all(|p| p.mime == "image/png"));
    assert_eq!(images[0].bytes, vec![1]);
    assert_eq!(images[2].bytes, vec![3]);
}

#[tokio::test]
async fn given_document_with_no_pages_when_converting_to_images_then_empty_document_error() {
    let gateway = OperationGateway::new(
        Arc::new(RecordingModel::default()),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
        Arc::new(RecordingBuilder::default()),
        Arc::new(FixedRasterizer { pages: Vec::new() }),
        Arc::new(NoopFetcher),
    );

    let error = gateway.convert_to_images(&inline_pdf()).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::EmptyDocument);
}

#[tokio::test]
async fn given_images_when_converting_from_images_then_a_pdf_document_is_produced() {
    let setup = gateway_with(
        RecordingModel::default(),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );
    let images = vec![
        Payload::new("image/png", vec![1]),
        Payload::new("image/jpeg", vec![2]),
    ];

    let result = setup.gateway.convert_from_images(&images).await.unwrap();

    assert_eq!(*setup.builder.last_image_count.lock().unwrap(), 2);
    let JobResult::Document(document) = result else {
        panic!("expected a document result");
    };
    assert_eq!(document.mime, "application/pdf");
}

#[tokio::test]
async fn given_no_images_when_converting_from_images_then_validation_failure_returned() {
    let setup = gateway_with(
        RecordingModel::default(),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );

    let error = setup.gateway.convert_from_images(&[]).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::ValidationFailure);
}

#[tokio::test]
async fn given_remote_input_with_wrong_content_type_when_summarized_then_error_is_mapped() {
    let gateway = OperationGateway::new(
        Arc::new(RecordingModel::default()),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
        Arc::new(RecordingBuilder::default()),
        Arc::new(FixedRasterizer { pages: Vec::new() }),
        Arc::new(RejectingFetcher),
    );
    let input = InputRef::Remote("https://example.com/page".to_string());

    let error = gateway.summarize(&input).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::InvalidRemoteContentType);
}

#[tokio::test]
async fn given_batch_input_when_summarized_then_validation_failure_returned() {
    let setup = gateway_with(
        RecordingModel::default(),
        Arc::new(FixedExtractor {
            text: String::new(),
            page_count: 0,
        }),
    );
    let input = InputRef::Batch(vec![Payload::new("image/png", vec![1])]);

    let error = setup.gateway.summarize(&input).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::ValidationFailure);
}
