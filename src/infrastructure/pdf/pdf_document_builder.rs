use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::application::ports::{DocumentBuilder, DocumentBuilderError};
use crate::domain::Payload;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 50;
const FONT_SIZE: i64 = 12;
const LINE_HEIGHT: i64 = 15;

/// Builds PDFs with lopdf: text pages for translated output, image pages
/// for the images-to-document conversion.
#[derive(Default)]
pub struct PdfDocumentBuilder;

impl PdfDocumentBuilder {
    pub fn new() -> Self {
        Self
    }

    fn build_text_document(blocks: &[String]) -> Result<Vec<u8>, DocumentBuilderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(blocks.len());
        for block in blocks {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
                Operation::new("TL", vec![LINE_HEIGHT.into()]),
                Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - 4 * FONT_SIZE).into()]),
            ];
            for line in block.lines() {
                operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let encoded = content.encode().map_err(|e| {
                DocumentBuilderError::RenderFailed(format!("content encode failed: {e}"))
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            });
            kids.push(page_id.into());
        }

        Self::finish_document(doc, pages_id, kids)
    }

    fn build_image_document(images: &[Payload]) -> Result<Vec<u8>, DocumentBuilderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(images.len());
        for (index, payload) in images.iter().enumerate() {
            let decoded = image::load_from_memory(&payload.bytes).map_err(|e| {
                DocumentBuilderError::InvalidImage(format!("image {index}: {e}"))
            })?;
            let rgb = decoded.to_rgb8();
            let (width, height) = rgb.dimensions();

            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width as i64,
                    "Height" => height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8i64,
                },
                rgb.into_raw(),
            ));

            let name = format!("Im{index}");
            let operations = vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        (width as i64).into(),
                        0.into(),
                        0.into(),
                        (height as i64).into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]),
                Operation::new("Q", vec![]),
            ];
            let content = Content { operations };
            let encoded = content.encode().map_err(|e| {
                DocumentBuilderError::RenderFailed(format!("content encode failed: {e}"))
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            // Page sized to the image's native dimensions.
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! { name => image_id },
                },
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    (width as i64).into(),
                    (height as i64).into(),
                ],
            });
            kids.push(page_id.into());
        }

        Self::finish_document(doc, pages_id, kids)
    }

    fn finish_document(
        mut doc: Document,
        pages_id: lopdf::ObjectId,
        kids: Vec<Object>,
    ) -> Result<Vec<u8>, DocumentBuilderError> {
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes: Vec<u8> = Vec::new();
        doc.save_to(&mut bytes).map_err(|e| {
            DocumentBuilderError::RenderFailed(format!("document save failed: {e}"))
        })?;
        Ok(bytes)
    }
}

#[async_trait]
impl DocumentBuilder for PdfDocumentBuilder {
    #[tracing::instrument(skip(self, blocks), fields(pages = blocks.len()))]
    async fn render_text_pages(&self, blocks: &[String]) -> Result<Vec<u8>, DocumentBuilderError> {
        let owned = blocks.to_vec();
        tokio::task::spawn_blocking(move || Self::build_text_document(&owned))
            .await
            .map_err(|e| DocumentBuilderError::RenderFailed(format!("task join error: {e}")))?
    }

    #[tracing::instrument(skip(self, images), fields(pages = images.len()))]
    async fn compose_images(&self, images: &[Payload]) -> Result<Vec<u8>, DocumentBuilderError> {
        let owned = images.to_vec();
        tokio::task::spawn_blocking(move || Self::build_image_document(&owned))
            .await
            .map_err(|e| DocumentBuilderError::RenderFailed(format!("task join error: {e}")))?
    }
}
