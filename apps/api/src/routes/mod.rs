pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs", post(handlers::handle_create_job))
        .route("/api/v1/jobs/:id", get(handlers::handle_get_job))
        .route("/api/v1/candidates", post(handlers::handle_create_candidate))
        .route(
            "/api/v1/candidates/upload",
            post(handlers::handle_upload_candidate),
        )
        .route("/api/v1/candidates/:id", get(handlers::handle_get_candidate))
        .route(
            "/api/v1/analyses/preview",
            post(handlers::handle_preview_analysis),
        )
        .route("/api/v1/analyses", post(handlers::handle_create_analysis))
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .with_state(state)
}
