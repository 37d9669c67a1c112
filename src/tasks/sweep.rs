//! Active-Expiration Sweep Task
//!
//! One-shot background task that removes expired entries from a single
//! engine. Scheduled fire-and-forget by the insertion path whenever the
//! engine's sweep cooldown has elapsed and expiring entries exist.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheEngine;

/// Spawns a detached task that runs one active-expiration sweep.
///
/// The task runs on a later turn of the scheduler, never synchronously
/// inside the call that triggered it, and takes the engine's write lock,
/// so it cannot interleave with a foreground mutation on the same engine.
///
/// # Arguments
/// * `engine` - Shared handle to the engine to sweep
///
/// # Returns
/// A JoinHandle for the spawned task, useful for awaiting it in tests.
pub fn spawn_sweep(engine: Arc<RwLock<CacheEngine>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let removed = {
            let mut engine = engine.write().await;
            engine.sweep()
        };

        if removed > 0 {
            info!("expiration sweep removed {} entries", removed);
        } else {
            debug!("expiration sweep found nothing to remove");
        }
    })
}
