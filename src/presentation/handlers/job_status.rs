use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, JobResponse};

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
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

    match state.job_service.get(job_id).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobResponse::from_job(&job))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
