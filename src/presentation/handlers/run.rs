use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::services::JobServiceError;
use crate::domain::{JobId, RunParams};
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, JobResponse};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub target_language: Option<String>,
    pub voice: Option<String>,
}

/// Starts a job run. Returns 202: the operation completes asynchronously
/// and the client polls the job for its outcome.
#[tracing::instrument(skip(state, request))]
pub async fn run_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<RunRequest>>,
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

    let Json(request) = request.unwrap_or_default();
    let params = RunParams {
        target_language: request.target_language,
        voice: request.voice,
    };

    match state.job_service.run(job_id, params).await {
        Ok(job) => (StatusCode::ACCEPTED, Json(JobResponse::from_job(&job))).into_response(),
        Err(JobServiceError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", id),
            }),
        )
            .into_response(),
        Err(JobServiceError::Validation(job_error)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: job_error.to_string(),
            }),
        )
            .into_response(),
        Err(JobServiceError::NotRunnable(e)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Job is not runnable: {}", e),
            }),
        )
            .into_response(),
        Err(JobServiceError::Registry(e)) => {
            tracing::error!(error = %e, "Registry failure starting run");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to start job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
