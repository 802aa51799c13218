mod pdf_document_builder;
mod pdf_text_extractor;
mod pdfium_rasterizer;
mod text_sanitizer;

pub use pdf_document_builder::PdfDocumentBuilder;
pub use pdf_text_extractor::PdfTextExtractor;
pub use pdfium_rasterizer::PdfiumPageRasterizer;
pub use text_sanitizer::sanitize_extracted_text;
