//! Command and reply types for node dispatch
//!
//! A `Command` is the unit of work routed from the cluster to a node; a
//! `CommandReply` is the structured result flowing back. Both cross the
//! wire in distributed mode, so they carry serde derives.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CacheError;
use crate::models::responses::ErrorResponse;

// == Command ==
/// A cache operation addressed to a single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    /// Retrieve a value and its bookkeeping fields
    Get { key: String },
    /// Insert a new entry, optionally with a TTL in whole seconds
    Add {
        key: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expire: Option<u64>,
    },
    /// Overwrite an existing entry, optionally refreshing its TTL
    Set {
        key: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expire: Option<u64>,
    },
    /// Delete an existing entry
    Remove { key: String },
    /// Report size, capacity and expiring-entry count
    Info,
    /// Drop every entry
    Flush,
}

impl Command {
    /// Operation name, for logging.
    pub fn op(&self) -> &'static str {
        match self {
            Command::Get { .. } => "get",
            Command::Add { .. } => "add",
            Command::Set { .. } => "set",
            Command::Remove { .. } => "remove",
            Command::Info => "info",
            Command::Flush => "flush",
        }
    }
}

// == Command Reply ==
/// Structured result of executing a command.
///
/// Callers always receive a reply value, never a raw error: failures are
/// carried as a message plus the status code their class maps to.
#[derive(Debug, Clone)]
pub enum CommandReply {
    /// Success payload, shaped per operation
    Success(Value),
    /// Failure message with its response-status classification
    Failure { error: String, code: u16 },
}

impl CommandReply {
    /// Builds a failure reply from a domain error.
    pub fn failure(err: CacheError) -> Self {
        Self::Failure {
            error: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success payload, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Success(body) => Some(body),
            Self::Failure { .. } => None,
        }
    }
}

impl From<crate::error::Result<Value>> for CommandReply {
    fn from(result: crate::error::Result<Value>) -> Self {
        match result {
            Ok(body) => Self::Success(body),
            Err(err) => Self::failure(err),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CommandReply {
    fn into_response(self) -> Response {
        match self {
            Self::Success(body) => Json(body).into_response(),
            Self::Failure { error, code } => {
                let status =
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(ErrorResponse::new(error))).into_response()
            }
        }
    }
}
