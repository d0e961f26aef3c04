//! Error types for the log API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logbook_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur in the log API server.
///
/// Cache failures never appear here: the read path treats them as misses
/// and keeps going, so only store failures and logical absences reach the
/// caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Resource not found.
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Durable store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::NotFound(_, _) => (StatusCode::NOT_FOUND, "not_found"),
            Self::BindFailed(_, _) | Self::Config(_) | Self::Store(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (
            status,
            [("content-type", "application/json")],
            json,
        )
            .into_response()
    }
}
