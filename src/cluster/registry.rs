//! Cluster Registry Module
//!
//! Maps namespace names to nodes and routes commands to the owner.

use std::collections::HashMap;

use tracing::info;

use crate::cluster::Node;
use crate::error::CacheError;
use crate::models::{Command, CommandReply};

// == Cluster ==
/// Registry of nodes keyed by namespace name.
///
/// Built once at startup; registration is the only mutation. No node is
/// removed or re-routed at runtime.
#[derive(Default)]
pub struct Cluster {
    nodes: HashMap<String, Node>,
}

impl Cluster {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Node ==
    /// Registers a node under its namespace name.
    ///
    /// A later registration under the same name overwrites the earlier
    /// one.
    pub fn add_node(&mut self, node: Node) {
        info!("registering node {}", node.name());
        self.nodes.insert(node.name().to_string(), node);
    }

    /// Looks up the node owning `namespace`.
    #[allow(dead_code)]
    pub fn node(&self, namespace: &str) -> Option<&Node> {
        self.nodes.get(namespace)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // == Route ==
    /// Routes a command to the node owning `namespace` and returns its
    /// reply unchanged. An unregistered namespace yields a structured
    /// failure, never a raw error.
    pub async fn route(&self, namespace: &str, command: Command) -> CommandReply {
        match self.nodes.get(namespace) {
            Some(node) => node.send_command(command).await,
            None => CommandReply::failure(CacheError::NamespaceNotFound(namespace.to_string())),
        }
    }
}
