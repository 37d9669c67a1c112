//! Background Tasks Module
//!
//! Contains detached tasks spawned during normal operation.
//!
//! # Tasks
//! - Expiration sweep: one-shot pass removing expired entries from an
//!   engine, triggered by the insertion path when the cooldown elapses

mod sweep;

pub use sweep::spawn_sweep;
