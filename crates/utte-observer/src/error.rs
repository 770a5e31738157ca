//! Error types for the observer server.
//!
//! [`ObserverError`] covers the HTTP surface and converts into an Axum
//! response via its [`IntoResponse`](axum::response::IntoResponse)
//! implementation. [`StreamError`] is the terminal failure of one stream
//! connection.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// No route matches the request.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Terminal failure of a single stream connection. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Reading the next inbound frame failed.
    #[error("receive failed: {0}")]
    Receive(String),

    /// Writing an outbound frame failed.
    #[error("send failed: {0}")]
    Send(String),

    /// An outbound snapshot could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
