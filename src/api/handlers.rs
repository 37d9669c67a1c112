//! API Handlers
//!
//! HTTP request handlers for the cluster endpoints and the node command
//! endpoint. Every cache handler returns a `CommandReply`, so callers
//! always see a structured body with the failure class carried in the
//! status code.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cluster::{Cluster, LocalExecutor};
use crate::models::{Command, CommandReply, HealthResponse, WriteRequest};

/// Handler for GET /v1/:namespace/:key
pub async fn get_handler(
    State(cluster): State<Arc<Cluster>>,
    Path((namespace, key)): Path<(String, String)>,
) -> CommandReply {
    cluster.route(&namespace, Command::Get { key }).await
}

/// Handler for POST /v1/:namespace/:key
///
/// Adds a new entry; conflicts with a live entry are rejected.
pub async fn add_handler(
    State(cluster): State<Arc<Cluster>>,
    Path((namespace, key)): Path<(String, String)>,
    Json(req): Json<WriteRequest>,
) -> CommandReply {
    let command = Command::Add {
        key,
        value: req.value,
        expire: req.expire,
    };
    cluster.route(&namespace, command).await
}

/// Handler for PUT /v1/:namespace/:key
///
/// Overwrites an existing entry.
pub async fn set_handler(
    State(cluster): State<Arc<Cluster>>,
    Path((namespace, key)): Path<(String, String)>,
    Json(req): Json<WriteRequest>,
) -> CommandReply {
    let command = Command::Set {
        key,
        value: req.value,
        expire: req.expire,
    };
    cluster.route(&namespace, command).await
}

/// Handler for DELETE /v1/:namespace/:key
pub async fn remove_handler(
    State(cluster): State<Arc<Cluster>>,
    Path((namespace, key)): Path<(String, String)>,
) -> CommandReply {
    cluster.route(&namespace, Command::Remove { key }).await
}

/// Handler for GET /v1/manage/:namespace/info
pub async fn info_handler(
    State(cluster): State<Arc<Cluster>>,
    Path(namespace): Path<String>,
) -> CommandReply {
    cluster.route(&namespace, Command::Info).await
}

/// Handler for POST /v1/manage/:namespace/flush
pub async fn flush_handler(
    State(cluster): State<Arc<Cluster>>,
    Path(namespace): Path<String>,
) -> CommandReply {
    cluster.route(&namespace, Command::Flush).await
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /v1/ on a node endpoint
///
/// Accepts a serialized command from the cluster and executes it against
/// the locally hosted engine.
pub async fn execute_handler(
    State(executor): State<LocalExecutor>,
    Json(command): Json<Command>,
) -> CommandReply {
    executor.execute(command).await
}
