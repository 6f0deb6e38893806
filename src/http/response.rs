use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::queue::QueueError;

pub const BAD_REQUEST_MESSAGE: &str = "Bad Request";
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_message: String,
}

/// Errors surfaced to HTTP clients.
///
/// The reason carried by `BadRequest` is logged, not sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(reason) => {
                tracing::warn!(%reason, "rejected request");
                (StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE)
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        };

        let body = ErrorResponse {
            error_message: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueueError> for ApiError {
    fn from(e: QueueError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
