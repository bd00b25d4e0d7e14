//! Application error types for the Tunetaste server.
//!
//! Provides a unified error type that implements `IntoResponse` for Axum.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tunetaste_session::QueryError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading/parsing errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Neither artist nor title was given
    #[error("missing search terms")]
    MissingSearchTerms,

    /// Invalid request data
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The catalog search could not be completed
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// The analysis service could not be reached or rejected the favorites
    #[error("Relay failed: {0}")]
    RelayFailed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::MissingSearchTerms => AppError::MissingSearchTerms,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration error".to_string())
            }
            AppError::MissingSearchTerms => {
                (StatusCode::BAD_REQUEST, "missing search terms".to_string())
            }
            // Bad request messages are safe to expose (client-caused errors)
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::SearchFailed(detail) => {
                tracing::error!("Search failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "search failed".to_string())
            }
            AppError::RelayFailed(detail) => {
                tracing::error!("Relay failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "relay failed".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
