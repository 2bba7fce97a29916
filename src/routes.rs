use crate::app::AppState;
use crate::handlers::{not_found, question_handler, status_handler};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/chatgpt/question", post(question_handler))
        .route("/chatgpt/status", get(status_handler))
        .fallback(not_found)
}
