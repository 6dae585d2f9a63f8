pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::review::handlers;
use crate::state::AppState;

/// Room for the job description and multipart framing on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form
        .route("/", get(handlers::handle_index))
        .route("/review", post(handlers::handle_review_form))
        // Machine clients
        .route("/api/v1/review/:action", post(handlers::handle_review_api))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
