//! Error types for the bridge.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failures surfaced by the dispatch layer.
///
/// Upstream failures are never retried or reinterpreted; the status and body
/// the inference API returned are carried through to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("upstream request failed: {0}")]
    Request(String),

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("media payload error: {0}")]
    Media(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Request(_) => (StatusCode::BAD_GATEWAY, "upstream_unreachable"),
            Error::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
            Error::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "invalid_upstream_response"),
            Error::Media(_) => (StatusCode::INTERNAL_SERVER_ERROR, "media_error"),
        };

        let upstream_status = match &self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
                "upstream_status": upstream_status
            }
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
