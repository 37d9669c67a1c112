//! Cache Module
//!
//! Per-namespace bounded cache with LRU eviction and TTL expiration.

mod engine;
mod entry;


// Re-export public types
pub use engine::{CacheEngine, EntryStat};
pub use entry::{current_timestamp_ms, CacheEntry};

// == Public Constants ==
/// Cooldown between active-expiration sweeps, in milliseconds.
pub const EXPIRE_INTERVAL_MS: u64 = 30_000;
