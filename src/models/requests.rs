//! Request DTOs for the cluster API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the write operations (POST/PUT `/v1/:namespace/:key`)
///
/// # Fields
/// - `value`: The value to store under the key taken from the path
/// - `expire`: Optional TTL offset in whole seconds
#[derive(Debug, Clone, Deserialize)]
pub struct WriteRequest {
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub expire: Option<u64>,
}
