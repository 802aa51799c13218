use docpilot::application::ports::DocumentCache;
use docpilot::domain::Payload;
use docpilot::infrastructure::cache::LocalDocumentCache;

#[tokio::test]
async fn given_empty_cache_when_loaded_then_nothing_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalDocumentCache::new(dir.path());

    let loaded = cache.load().await.unwrap();

    assert!(loaded.is_none());
}

#[tokio::test]
async fn given_stored_document_when_loaded_then_filename_and_payload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalDocumentCache::new(dir.path());
    let payload = Payload::new("application/pdf", b"%PDF-1.5 body".to_vec());

    cache.store("report.pdf", &payload).await.unwrap();
    let loaded = cache.load().await.unwrap().unwrap();

    assert_eq!(loaded.filename, "report.pdf");
    assert_eq!(loaded.payload, payload);
}

#[tokio::test]
async fn given_two_stores_when_loaded_then_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalDocumentCache::new(dir.path());

    cache
        .store("first.pdf", &Payload::new("application/pdf", vec![1]))
        .await
        .unwrap();
    cache
        .store("second.pdf", &Payload::new("application/pdf", vec![2]))
        .await
        .unwrap();
    let loaded = cache.load().await.unwrap().unwrap();

    assert_eq!(loaded.filename, "second.pdf");
    assert_eq!(loaded.payload.bytes, vec![2]);
}

#[tokio::test]
async fn given_cleared_cache_when_loaded_then_nothing_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalDocumentCache::new(dir.path());
    cache
        .store("report.pdf", &Payload::new("application/pdf", vec![1]))
        .await
        .unwrap();

    cache.clear().await.unwrap();

    assert!(cache.load().await.unwrap().is_none());
}

#[tokio::test]
async fn given_empty_cache_when_cleared_then_no_error_is_raised() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalDocumentCache::new(dir.path());

    cache.clear().await.unwrap();
}
