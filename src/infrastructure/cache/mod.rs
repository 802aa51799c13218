mod local_document_cache;

pub use local_document_cache::LocalDocumentCache;
