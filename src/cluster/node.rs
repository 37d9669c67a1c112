//! Node Module
//!
//! A node owns one cache engine and exposes a uniform command-execution
//! contract. In mono mode commands run in-process; in distributed mode
//! they are forwarded to the node's HTTP endpoint. Engine semantics are
//! identical either way.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::CacheEngine;
use crate::error::{CacheError, Result};
use crate::models::{
    AddResponse, Command, CommandReply, ErrorResponse, FlushResponse, GetResponse, InfoResponse,
    RemoveResponse, SetResponse,
};
use crate::tasks::spawn_sweep;

// == Defaults ==
/// Host used for nodes configured without one.
pub const DEFAULT_NODE_HOST: &str = "http://localhost";
/// Port used for nodes configured without one.
pub const DEFAULT_NODE_PORT: u16 = 12345;

/// Connection timeout for node-to-node requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Request timeout for node-to-node requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn to_body<T: Serialize>(payload: T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|err| CacheError::Internal(err.to_string()))
}

// == Local Executor ==
/// Executes commands in-process against an owned engine.
///
/// Also serves as the request handler state when the engine is exposed
/// over the node endpoint in distributed mode.
#[derive(Clone)]
pub struct LocalExecutor {
    engine: Arc<RwLock<CacheEngine>>,
}

impl LocalExecutor {
    pub fn new(engine: Arc<RwLock<CacheEngine>>) -> Self {
        Self { engine }
    }

    /// Dispatches a command to the engine and converts every failure into
    /// a structured reply. Raw errors never escape this boundary.
    pub async fn execute(&self, command: Command) -> CommandReply {
        self.try_execute(command).await.into()
    }

    async fn try_execute(&self, command: Command) -> Result<Value> {
        match command {
            Command::Get { key } => {
                let mut engine = self.engine.write().await;
                let value = engine.get(&key)?;
                let stat = engine.stat(&key)?;
                to_body(GetResponse {
                    key,
                    value,
                    last_used: stat.last_used,
                    expire_at: stat.expire_at,
                })
            }
            Command::Add { key, value, expire } => {
                let due = {
                    let mut engine = self.engine.write().await;
                    engine.add(&key, value.clone(), expire)?;
                    engine.should_sweep()
                };
                // Fire-and-forget: the sweep runs on a later scheduler
                // turn, after this operation's lock is released.
                if due {
                    let _ = spawn_sweep(self.engine.clone());
                }
                to_body(AddResponse {
                    key,
                    value,
                    created: true,
                })
            }
            Command::Set { key, value, expire } => {
                let mut engine = self.engine.write().await;
                engine.set(&key, value.clone(), expire)?;
                let stat = engine.stat(&key)?;
                to_body(SetResponse {
                    key,
                    value,
                    last_used: stat.last_used,
                })
            }
            Command::Remove { key } => {
                let mut engine = self.engine.write().await;
                engine.remove(&key)?;
                to_body(RemoveResponse { key, removed: true })
            }
            Command::Info => {
                let engine = self.engine.read().await;
                to_body(InfoResponse {
                    size: engine.size(),
                    capacity: engine.capacity(),
                    expiring: engine.expiring(),
                })
            }
            Command::Flush => {
                let mut engine = self.engine.write().await;
                engine.flush();
                to_body(FlushResponse { done: true })
            }
        }
    }
}

// == Remote Executor ==
/// Forwards commands to a node's HTTP endpoint.
#[derive(Clone)]
pub struct RemoteExecutor {
    client: Client,
    url: String,
}

impl RemoteExecutor {
    pub fn new(host: Option<&str>, port: Option<u16>) -> Self {
        let host = host.unwrap_or(DEFAULT_NODE_HOST);
        let port = port.unwrap_or(DEFAULT_NODE_PORT);
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: format!("{host}:{port}/v1/"),
        }
    }

    /// Endpoint the executor forwards to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POSTs the command and reconstructs the structured reply from the
    /// response status and body. Transport failures surface as the
    /// internal-failure class.
    pub async fn execute(&self, command: &Command) -> CommandReply {
        let response = match self.client.post(&self.url).json(command).send().await {
            Ok(response) => response,
            Err(err) => return CommandReply::failure(CacheError::Internal(err.to_string())),
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<Value>().await {
                Ok(body) => CommandReply::Success(body),
                Err(err) => CommandReply::failure(CacheError::Internal(err.to_string())),
            }
        } else {
            let error = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            CommandReply::Failure {
                error,
                code: status.as_u16(),
            }
        }
    }
}

// == Executor ==
/// How a node runs commands: in-process or over the network.
///
/// Selected per node at construction time, so routing stays agnostic to
/// the deployment mode.
#[derive(Clone)]
pub enum Executor {
    Local(LocalExecutor),
    Remote(RemoteExecutor),
}

// == Node ==
/// A named namespace bound to a command executor.
#[derive(Clone)]
pub struct Node {
    name: String,
    executor: Executor,
}

impl Node {
    /// Creates a node executing commands in-process against `engine`.
    pub fn local(name: impl Into<String>, engine: Arc<RwLock<CacheEngine>>) -> Self {
        Self {
            name: name.into(),
            executor: Executor::Local(LocalExecutor::new(engine)),
        }
    }

    /// Creates a node forwarding commands to `host:port`.
    pub fn remote(name: impl Into<String>, host: Option<&str>, port: Option<u16>) -> Self {
        Self {
            name: name.into(),
            executor: Executor::Remote(RemoteExecutor::new(host, port)),
        }
    }

    /// Namespace this node owns.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs a command through the node's executor and returns its
    /// structured reply.
    pub async fn send_command(&self, command: Command) -> CommandReply {
        debug!(node = %self.name, op = command.op(), "dispatching command");
        match &self.executor {
            Executor::Local(local) => local.execute(command).await,
            Executor::Remote(remote) => remote.execute(&command).await,
        }
    }
}
