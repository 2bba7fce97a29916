use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::answering::AnswerError;

/// Custom error type for the application
#[derive(Debug)]
pub enum AppError {
    MalformedRequest(String),
    DelegationFailure(String),
    DelegationTimeout(String),
    NotFound,
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::MalformedRequest(msg) => {
                warn!("Rejected malformed request: {}", msg);
                (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST", msg)
            }
            AppError::DelegationFailure(msg) => {
                error!("Delegation failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "DELEGATION_FAILURE", msg)
            }
            AppError::DelegationTimeout(msg) => {
                error!("Delegation timed out: {}", msg);
                (StatusCode::GATEWAY_TIMEOUT, "DELEGATION_TIMEOUT", msg)
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "route not found".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<AnswerError> for AppError {
    fn from(err: AnswerError) -> Self {
        match err {
            AnswerError::TimedOut(_) => AppError::DelegationTimeout(err.to_string()),
            AnswerError::Failed(_) => AppError::DelegationFailure(err.to_string()),
        }
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
