//! nscache - A namespace-partitioned in-memory cache server
//!
//! Boots the cluster from a JSON config file: one cache engine per
//! namespace, executed in-process in mono mode or served over per-node
//! HTTP endpoints in distributed mode.

mod api;
mod cache;
mod cluster;
mod config;
mod error;
mod models;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{cluster_router, node_router};
use cache::CacheEngine;
use cluster::{Cluster, LocalExecutor, Node, DEFAULT_NODE_PORT};
use config::Config;

/// Main entry point for the nscache cluster server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load the cluster configuration file
/// 3. Register one node per configured namespace; in distributed mode,
///    serve locally hosted nodes on their own ports
/// 4. Serve the cluster router on the configured port
/// 5. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nscache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting nscache cluster server");

    let config_path = Config::path_from_env();
    let config = Config::load(&config_path)?;
    info!(
        "Configuration loaded from {}: mono={}, port={}, nodes={}",
        config_path.display(),
        config.mono,
        config.port,
        config.nodes.len()
    );

    let mut cluster = Cluster::new();
    for node_config in &config.nodes {
        if config.mono {
            let engine = Arc::new(RwLock::new(CacheEngine::new(node_config.capacity)));
            cluster.add_node(Node::local(&node_config.name, engine));
            continue;
        }

        // Distributed mode: a node without a host is hosted by this
        // process and served on its own port; the cluster reaches every
        // node, local or not, over HTTP.
        if node_config.host.is_none() {
            let engine = Arc::new(RwLock::new(CacheEngine::new(node_config.capacity)));
            let app = node_router(LocalExecutor::new(engine));
            let port = node_config.port.unwrap_or(DEFAULT_NODE_PORT);
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding node {} to {}", node_config.name, addr))?;
            info!("Node {} listening on http://{}", node_config.name, addr);

            let name = node_config.name.clone();
            tokio::spawn(async move {
                if let Err(err) = axum::serve(listener, app).await {
                    error!("Node {} server failed: {}", name, err);
                }
            });
        }
        cluster.add_node(Node::remote(
            &node_config.name,
            node_config.host.as_deref(),
            node_config.port,
        ));
    }

    let app = cluster_router(Arc::new(cluster));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding cluster to {}", addr))?;
    info!("Cluster listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving cluster")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
