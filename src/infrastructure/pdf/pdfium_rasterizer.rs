use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{PageRasterizer, RasterizeError};

const RENDER_DPI: f32 = 150.0;
const RASTERIZE_TIMEOUT: Duration = Duration::from_secs(60);

/// Renders real page images with pdfium, one PNG per page.
#[derive(Default)]
pub struct PdfiumPageRasterizer;

impl PdfiumPageRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn rasterize_blocking(data: &[u8]) -> Result<Vec<Vec<u8>>, RasterizeError> {
        let pdfium = Pdfium::new(Pdfium::bind_to_system_library().map_err(|e| {
            RasterizeError::RenderFailed(format!("pdfium bind failed: {e}"))
        })?);

        let doc = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| RasterizeError::InvalidDocument(format!("pdfium open failed: {e}")))?;

        let page_count = doc.pages().len() as usize;
        let mut png_buffers: Vec<Vec<u8>> = Vec::with_capacity(page_count);

        for index in 0..page_count {
            let page = doc.pages().get(index as u16).map_err(|e| {
                RasterizeError::RenderFailed(format!("page {index} access failed: {e}"))
            })?;

            let width = (page.width().value * RENDER_DPI / 72.0) as i32;
            let height = (page.height().value * RENDER_DPI / 72.0) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(width)
                        .set_target_height(height),
                )
                .map_err(|e| {
                    RasterizeError::RenderFailed(format!("render page {index} failed: {e}"))
                })?;

            let mut png_bytes: Vec<u8> = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
                .map_err(|e| {
                    RasterizeError::RenderFailed(format!("PNG encode page {index} failed: {e}"))
                })?;

            png_buffers.push(png_bytes);
        }

        Ok(png_buffers)
    }
}

#[async_trait]
impl PageRasterizer for PdfiumPageRasterizer {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn rasterize(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, RasterizeError> {
        let owned = data.to_vec();

        let pages = tokio::time::timeout(
            RASTERIZE_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                std::panic::catch_unwind(|| Self::rasterize_blocking(&owned)).unwrap_or_else(
                    |_| {
                        Err(RasterizeError::RenderFailed(
                            "panic during PDF rasterization".to_string(),
                        ))
                    },
                )
            }),
        )
        .await
        .map_err(|_| RasterizeError::RenderFailed("PDF rasterization timed out".to_string()))?
        .map_err(|e| RasterizeError::RenderFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF rasterization complete");
        Ok(pages)
    }
}
