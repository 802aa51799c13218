use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    cached_document_handler, health_handler, job_status_handler, link_handler, reset_handler,
    run_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/intake/{kind}/upload", post(upload_handler))
        .route("/api/v1/intake/{kind}/link", post(link_handler))
        .route("/api/v1/jobs/{id}", get(job_status_handler))
        .route("/api/v1/jobs/{id}/run", post(run_handler))
        .route("/api/v1/jobs/{id}/reset", post(reset_handler))
        .route("/api/v1/documents/last", get(cached_document_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
