//! API Module
//!
//! HTTP handlers and routing for the cluster REST surface and the node
//! command endpoint.
//!
//! # Cluster endpoints
//! - `GET    /v1/:namespace/:key` - Retrieve a value
//! - `POST   /v1/:namespace/:key` - Add a new entry
//! - `PUT    /v1/:namespace/:key` - Overwrite an entry
//! - `DELETE /v1/:namespace/:key` - Remove an entry
//! - `GET    /v1/manage/:namespace/info` - Cache info
//! - `POST   /v1/manage/:namespace/flush` - Drop all entries
//! - `GET    /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use routes::{cluster_router, node_router};
