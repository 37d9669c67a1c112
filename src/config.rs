//! Configuration Module
//!
//! Loads the cluster topology from a JSON file at startup. The loaded
//! value is passed into the constructors explicitly; nothing reads it
//! from ambient state afterwards.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

/// Default cluster listen port.
const DEFAULT_PORT: u16 = 8080;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Per-namespace node settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Namespace name, unique within the cluster
    pub name: String,
    /// Maximum number of live entries in the node's cache
    pub capacity: usize,
    /// Node host, e.g. "http://10.0.0.2"; None means hosted by this process
    #[serde(default)]
    pub host: Option<String>,
    /// Node listen port (default 12345)
    #[serde(default)]
    pub port: Option<u16>,
}

/// Cluster configuration.
///
/// # File format
/// ```json
/// {
///   "mono": true,
///   "port": 8080,
///   "nodes": [
///     { "name": "users", "capacity": 1000 },
///     { "name": "sessions", "capacity": 500, "port": 12346 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Execute every node in-process instead of over the network
    #[serde(default)]
    pub mono: bool,
    /// Cluster listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Namespaces served by this cluster
    pub nodes: Vec<NodeConfig>,
}

impl Config {
    /// Loads and validates the configuration from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(raw).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    /// Config file path: `NSCACHE_CONFIG` env var, or `config.json`.
    pub fn path_from_env() -> PathBuf {
        env::var("NSCACHE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.nodes.is_empty() {
            bail!("config declares no nodes");
        }
        for node in &self.nodes {
            if node.capacity == 0 {
                bail!("node {} has zero capacity", node.name);
            }
        }
        Ok(())
    }
}
