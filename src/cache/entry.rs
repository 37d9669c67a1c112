//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL bookkeeping.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry with recency and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Timestamp of the last successful access or promotion (Unix milliseconds)
    pub last_used: u64,
    /// Expiration deadline (Unix milliseconds), None = no expiration
    pub expire_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry without an expiration deadline.
    pub fn new(value: String, now: u64) -> Self {
        Self {
            value,
            last_used: now,
            expire_at: None,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's deadline has passed.
    ///
    /// An entry is expired when it has a deadline and that deadline is
    /// strictly before `now`. Entries without a deadline never expire.
    pub fn is_expired(&self, now: u64) -> bool {
        match self.expire_at {
            Some(deadline) => deadline < now,
            None => false,
        }
    }

    // == Set Deadline ==
    /// Installs an expiration deadline `ttl_seconds` from `now`.
    ///
    /// Returns true when the entry previously had no deadline.
    pub fn set_deadline(&mut self, now: u64, ttl_seconds: u64) -> bool {
        let fresh = self.expire_at.is_none();
        self.expire_at = Some(now.saturating_add(ttl_seconds.saturating_mul(1000)));
        fresh
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_deadline() {
        let now = current_timestamp_ms();
        let entry = CacheEntry::new("test_value".to_string(), now);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.last_used, now);
        assert!(entry.expire_at.is_none());
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_entry_with_deadline() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new("test_value".to_string(), now);

        assert!(entry.set_deadline(now, 60));
        assert_eq!(entry.expire_at, Some(now + 60_000));
        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + 60_000));
    }

    #[test]
    fn test_expiration_is_strict() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new("test".to_string(), now);
        entry.set_deadline(now, 1);

        // Expired only once the deadline is strictly in the past
        assert!(!entry.is_expired(now + 1000));
        assert!(entry.is_expired(now + 1001));
    }

    #[test]
    fn test_set_deadline_reports_first_install() {
        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new("test".to_string(), now);

        assert!(entry.set_deadline(now, 10));
        // Second install overwrites but is no longer fresh
        assert!(!entry.set_deadline(now, 20));
        assert_eq!(entry.expire_at, Some(now + 20_000));
    }

    #[test]
    fn test_no_deadline_never_expires() {
        let entry = CacheEntry::new("test".to_string(), 0);
        assert!(!entry.is_expired(u64::MAX));
    }
}
