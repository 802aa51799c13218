use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::services::JobServiceError;
use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, JobResponse};

/// Returns the job to its idle state. Any in-flight operation keeps running
/// but its late result is discarded.
#[tracing::instrument(skip(state))]
pub async fn reset_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let job_id = match JobId::from_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid job ID: {}", id),
                }),
            )
                .into_response();
        }
    };

    match state.job_service.reset(job_id).await {
        Ok(job) => (StatusCode::OK, Json(JobResponse::from_job(&job))).into_response(),
        Err(JobServiceError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reset job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to reset job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
