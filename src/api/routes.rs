//! API Routes
//!
//! Configures the Axum routers for the cluster surface and for a node's
//! command endpoint.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, execute_handler, flush_handler, get_handler, health_handler, info_handler,
    remove_handler, set_handler,
};
use crate::cluster::{Cluster, LocalExecutor};

/// Creates the cluster router.
///
/// # Endpoints
/// - `GET    /v1/:namespace/:key` - Retrieve a value
/// - `POST   /v1/:namespace/:key` - Add a new entry
/// - `PUT    /v1/:namespace/:key` - Overwrite an entry
/// - `DELETE /v1/:namespace/:key` - Remove an entry
/// - `GET    /v1/manage/:namespace/info` - Cache info
/// - `POST   /v1/manage/:namespace/flush` - Drop all entries
/// - `GET    /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn cluster_router(cluster: Arc<Cluster>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/v1/:namespace/:key",
            get(get_handler)
                .post(add_handler)
                .put(set_handler)
                .delete(remove_handler),
        )
        .route("/v1/manage/:namespace/info", get(info_handler))
        .route("/v1/manage/:namespace/flush", post(flush_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(cluster)
}

/// Creates the command endpoint router for a locally hosted node.
///
/// Serves `POST /v1/` accepting a serialized command, used by the cluster
/// in distributed mode.
pub fn node_router(executor: LocalExecutor) -> Router {
    Router::new()
        .route("/v1/", post(execute_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(executor)
}
