//! nscache - A namespace-partitioned in-memory cache server
//!
//! Each namespace owns an independent bounded cache with LRU eviction and
//! TTL expiration; a cluster registry routes commands to the owning node,
//! in-process or over HTTP.

pub mod api;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::{cluster_router, node_router};
pub use cache::CacheEngine;
pub use cluster::{Cluster, Node};
pub use config::Config;
