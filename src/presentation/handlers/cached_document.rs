use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

use super::responses::ErrorResponse;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedDocumentResponse {
    pub filename: String,
    pub data_uri: String,
}

/// Returns the last uploaded document, letting a client re-run another
/// operation on it without uploading again.
#[tracing::instrument(skip(state))]
pub async fn cached_document_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.cache.load().await {
        Ok(Some(doc)) => (
            StatusCode::OK,
            Json(CachedDocumentResponse {
                filename: doc.filename,
                data_uri: doc.payload.to_data_uri(),
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No document in the cache".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read document cache");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read cache: {}", e),
                }),
            )
                .into_response()
        }
    }
}
