use crate::app::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{QuestionRequest, StatusResponse};
use crate::question::{DebugParams, filter_question};
use axum::{
    extract::{Json, Query, State, rejection::JsonRejection},
    http::Uri,
    response::Json as ResponseJson,
};
use tracing::{debug, info};

/// Status handler
/// Always reports the service as up
pub async fn status_handler() -> ResponseJson<StatusResponse> {
    debug!("Status endpoint called");
    ResponseJson(StatusResponse::ok())
}

/// Question handler
/// Forwards the (optionally suffixed) question to the answering capability
/// and returns its answer as the response body, untouched.
pub async fn question_handler(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> AppResult<String> {
    // An undecodable query string only switches debug output off.
    let debug_enabled = Query::<DebugParams>::try_from_uri(&uri)
        .map(|Query(params)| params.enabled())
        .unwrap_or(false);

    let Json(payload) = payload?;
    debug!("Question endpoint called");

    let question = filter_question(&payload.question, state.options.append_suffix);
    if debug_enabled {
        info!("Question received");
        info!("Filtered question: {}", question);
    }

    let answer = state.answerer.ask(&question).await?;

    if debug_enabled {
        info!("Answer: {}", answer);
    }
    Ok(answer)
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
