//! Error types for the cache cluster
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache and routing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key absent from the cache, or present but expired
    #[error("Key {0} not found")]
    NotFound(String),

    /// Add against a key that is still live
    #[error("Key {0} already exists")]
    AlreadyExists(String),

    /// Routing to a namespace with no registered node
    #[error("Node not found: {0}")]
    NamespaceNotFound(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    // == Status Code ==
    /// HTTP status the failure class maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            CacheError::NamespaceNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache cluster.
pub type Result<T> = std::result::Result<T, CacheError>;
