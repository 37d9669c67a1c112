//! Cluster Module
//!
//! Nodes owning per-namespace engines, the executor indirection between
//! mono and distributed mode, and the registry routing commands by
//! namespace.

mod node;
mod registry;

// Re-export public types
pub use node::{Executor, LocalExecutor, Node, RemoteExecutor, DEFAULT_NODE_HOST, DEFAULT_NODE_PORT};
pub use registry::Cluster;
