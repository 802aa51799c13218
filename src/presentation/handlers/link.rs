use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::services::IntakeError;
use crate::domain::JobKind;
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, JobResponse};

#[derive(Deserialize)]
pub struct LinkRequest {
    pub url: String,
}

/// Creates a job from a remote document URL. The document itself is fetched
/// server-side when the job runs.
#[tracing::instrument(skip(state, request))]
pub async fn link_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<LinkRequest>,
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

    match state.intake.intake_remote(kind, request.url.trim()).await {
        Ok(job) => (StatusCode::CREATED, Json(JobResponse::from_job(&job))).into_response(),
        Err(IntakeError::Rejected(job_error)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: job_error.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Remote intake failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to record job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
