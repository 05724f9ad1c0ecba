//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No locale serves the requested path.
    #[error("No locale for path: {0}")]
    LocaleNotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::LocaleNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "No locale for path", "path": path}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
