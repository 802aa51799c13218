use std::io;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use futures::{StreamExt, TryStreamExt};

use crate::application::services::{IncomingFile, IntakeError};
use crate::domain::JobKind;
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, JobResponse};

/// Receives one or more files for a job kind. Single-file kinds stream the
/// first field; the multi-image kind buffers every field and accepts the
/// valid subset.
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let kind = match JobKind::from_str(&kind) {
        Ok(k) => k,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Unknown job kind: {}", kind),
                }),
            )
                .into_response();
        }
    };

    if kind.is_multi_file() {
        return upload_batch(state, kind, multipart).await;
    }

    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();
    let mime = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let declared_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    tracing::debug!(filename = %filename, mime = %mime, "Processing file upload");

    let stream = field.map_err(io::Error::other).boxed();
    match state
        .intake
        .intake_file(kind, &filename, &mime, stream, declared_len)
        .await
    {
        Ok(job) => (StatusCode::CREATED, Json(JobResponse::from_job(&job))).into_response(),
        Err(e) => intake_error_response(&state, e).await,
    }
}

async fn upload_batch(state: AppState, kind: JobKind, mut multipart: Multipart) -> axum::response::Response {
    let mut files: Vec<IncomingFile> = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = match field.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        };
        files.push(IncomingFile {
            filename,
            mime,
            bytes,
        });
    }

    if files.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No files uploaded".to_string(),
            }),
        )
            .into_response();
    }

    match state.intake.intake_files(kind, files).await {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(JobResponse::from_job(&outcome.job).with_rejected(outcome.rejected)),
        )
            .into_response(),
        Err(e) => intake_error_response(&state, e).await,
    }
}

async fn intake_error_response(state: &AppState, error: IntakeError) -> axum::response::Response {
    match error {
        IntakeError::Rejected(job_error) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(ErrorResponse {
                error: job_error.to_string(),
            }),
        )
            .into_response(),
        IntakeError::Failed { job_id, .. } => {
            // The job exists and carries the failure; return it so the
            // client can render the error state.
            match state.job_service.get(job_id).await {
                Ok(Some(job)) => {
                    (StatusCode::CREATED, Json(JobResponse::from_job(&job))).into_response()
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to load job after read failure".to_string(),
                    }),
                )
                    .into_response(),
            }
        }
        IntakeError::Registry(e) => {
            tracing::error!(error = %e, "Registry failure during intake");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to record job: {}", e),
                }),
            )
                .into_response()
        }
        IntakeError::Transition(e) => {
            tracing::error!(error = %e, "Unexpected job state during intake");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Unexpected job state: {}", e),
                }),
            )
                .into_response()
        }
    }
}
