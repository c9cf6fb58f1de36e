//! Error types for the reference table service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

// == Reference Error Enum ==
/// Unified error type for the reference table service.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// Storage could not be opened or migrated (fatal at startup)
    #[error("Failed to initialize storage: {0}")]
    StorageInit(#[source] rusqlite::Error),

    /// Cache lookup failed
    #[error("Failed to query storage: {0}")]
    StorageQuery(#[source] rusqlite::Error),

    /// Cache insert failed
    #[error("Failed to write to storage: {0}")]
    StorageWrite(#[source] rusqlite::Error),

    /// Upstream request failed at the transport level
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream body was not a list of table references
    #[error("Failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Upstream returned an empty list
    #[error("Upstream returned no reference tables")]
    EmptyUpstreamResponse,

    /// Request method other than GET
    #[error("Invalid request method: {0}")]
    MethodNotAllowed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReferenceError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ReferenceError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short plain-text reason sent to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            ReferenceError::MethodNotAllowed(_) => "Invalid request method.",
            ReferenceError::StorageInit(_)
            | ReferenceError::StorageQuery(_)
            | ReferenceError::StorageWrite(_) => "Internal server error: storage unavailable",
            ReferenceError::Transport(_) => "Internal server error: upstream unreachable",
            ReferenceError::Parse(_) => "Internal server error: malformed upstream response",
            ReferenceError::EmptyUpstreamResponse => {
                "Internal server error: upstream returned no reference tables"
            }
            ReferenceError::Internal(_) => "Internal server error",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ReferenceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, self.public_message()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the reference table service.
pub type Result<T> = std::result::Result<T, ReferenceError>;
