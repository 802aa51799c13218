mod document_builder;
mod document_cache;
mod job_registry;
mod model_client;
mod page_rasterizer;
mod remote_fetcher;
mod text_extractor;

pub use document_builder::{DocumentBuilder, DocumentBuilderError};
pub use document_cache::{CacheError, CachedDocument, DocumentCache};
pub use job_registry::{JobRegistry, RegistryError};
pub use model_client::{
    DetectedItem, KeyedSuggestion, ModelClient, ModelClientError, ShoppingQuery,
};
pub use page_rasterizer::{PageRasterizer, RasterizeError};
pub use remote_fetcher::{RemoteFetchError, RemoteFetcher};
pub use text_extractor::{ExtractedDocument, TextExtractor, TextExtractorError};
