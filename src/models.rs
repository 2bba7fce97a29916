use serde::{Deserialize, Serialize};

/// Request payload for the question endpoint
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Response payload for the status endpoint
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Per-process switches for the question endpoint
#[derive(Debug, Clone, Copy)]
pub struct GatewayOptions {
    pub append_suffix: bool,
}
