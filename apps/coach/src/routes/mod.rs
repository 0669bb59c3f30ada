pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(form::handle_index))
        .route("/resume", post(form::handle_upload))
        .route("/job-description", post(form::handle_job_description))
        .route("/analyze", post(form::handle_analyze))
        .route("/export", get(form::handle_export))
        .route("/health", get(health::health_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
