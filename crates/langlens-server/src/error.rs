//! API error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use langlens_ai::DetectError;
use serde_json::json;

/// API error: an HTTP status plus a human-readable `detail` message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.detail }));
        (self.status, body).into_response()
    }
}

impl From<DetectError> for ApiError {
    fn from(err: DetectError) -> Self {
        match &err {
            // The one fault the caller can fix.
            DetectError::EmptySnippet => ApiError::bad_request("Code snippet cannot be empty"),
            // Everything downstream of input validation is a server fault;
            // the message is surfaced so callers can report it.
            _ => ApiError::internal(format!("Error processing request: {err}")),
        }
    }
}
