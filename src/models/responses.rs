//! Response DTOs for the cluster and node APIs
//!
//! Defines the success payload for each operation and the shared error
//! body.

use serde::{Deserialize, Serialize};

/// Success payload for the GET operation
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Timestamp of the last access (Unix milliseconds)
    pub last_used: u64,
    /// Expiration deadline (Unix milliseconds), null when none
    pub expire_at: Option<u64>,
}

/// Success payload for the ADD operation
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// The key that was created
    pub key: String,
    /// The stored value
    pub value: String,
    /// Whether the entry was created
    pub created: bool,
}

/// Success payload for the SET operation
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// The key that was updated
    pub key: String,
    /// The new value
    pub value: String,
    /// Timestamp of the update (Unix milliseconds)
    pub last_used: u64,
}

/// Success payload for the REMOVE operation
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// The key that was deleted
    pub key: String,
    /// Whether the entry was removed
    pub removed: bool,
}

/// Success payload for the INFO operation
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    /// Current live-entry count
    pub size: usize,
    /// Maximum number of live entries
    pub capacity: usize,
    /// Number of entries carrying an expiration deadline
    pub expiring: usize,
}

/// Success payload for the FLUSH operation
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Always true; flush never fails
    pub done: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all failure conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
