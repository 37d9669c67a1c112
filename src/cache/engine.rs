//! Cache Engine Module
//!
//! Bounded key/value store for one namespace, combining LRU capacity
//! eviction with lazy and active TTL expiration.

use lru::LruCache;

use crate::cache::{current_timestamp_ms, CacheEntry, EXPIRE_INTERVAL_MS};
use crate::error::{CacheError, Result};

// == Entry Stat ==
/// Bookkeeping fields of a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    /// Timestamp of the last access or promotion (Unix milliseconds)
    pub last_used: u64,
    /// Expiration deadline (Unix milliseconds), None = no expiration
    pub expire_at: Option<u64>,
}

// == Cache Engine ==
/// Bounded cache with recency ordering and TTL bookkeeping.
///
/// Entries live in a recency-ordered map (hash map over an intrusive
/// doubly linked list), so lookup, promotion and least-recently-used
/// eviction are all O(1). The map is kept unbounded and capacity is
/// enforced by the engine itself, because eviction must happen before
/// insertion and must stay visible to the engine's accounting.
pub struct CacheEngine {
    /// Maximum number of live entries
    capacity: usize,
    /// Entries ordered by recency, LRU end first when iterated in reverse
    entries: LruCache<String, CacheEntry>,
    /// Number of entries carrying an expiration deadline
    expiring: usize,
    /// Timestamp of the last active-expiration sweep (Unix milliseconds)
    last_sweep: u64,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: LruCache::unbounded(),
            expiring: 0,
            last_sweep: current_timestamp_ms(),
        }
    }

    // == Lookup ==
    /// Finds a live entry, promoting it to most-recently-used and
    /// refreshing `last_used`.
    ///
    /// An entry whose deadline is strictly in the past is treated as
    /// absent and physically removed here, decrementing the expiring
    /// counter. Every public operation that needs a live entry goes
    /// through this lookup, so the lazy-expiration side effect and the
    /// promotion side effect apply uniformly.
    fn lookup(&mut self, key: &str) -> Result<&mut CacheEntry> {
        let now = current_timestamp_ms();
        let expired = match self.entries.peek(key) {
            Some(entry) => entry.is_expired(now),
            None => return Err(CacheError::NotFound(key.to_string())),
        };

        if expired {
            if let Some(entry) = self.entries.pop(key) {
                if entry.expire_at.is_some() {
                    self.expiring = self.expiring.saturating_sub(1);
                }
            }
            return Err(CacheError::NotFound(key.to_string()));
        }

        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = now;
                Ok(entry)
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Get ==
    /// Returns the value stored under `key`.
    ///
    /// Fails with `NotFound` if the key is absent or expired. A hit
    /// promotes the entry to most-recently-used.
    pub fn get(&mut self, key: &str) -> Result<String> {
        Ok(self.lookup(key)?.value.clone())
    }

    // == Stat ==
    /// Returns the bookkeeping fields of a live entry.
    ///
    /// Same lookup and lazy-expiration semantics as `get`.
    pub fn stat(&mut self, key: &str) -> Result<EntryStat> {
        let entry = self.lookup(key)?;
        Ok(EntryStat {
            last_used: entry.last_used,
            expire_at: entry.expire_at,
        })
    }

    // == Add ==
    /// Inserts a new entry, failing with `AlreadyExists` if a live entry
    /// for `key` is present.
    ///
    /// The existence check is the same lazy-expiring lookup as `get`, so
    /// a conflicting live entry is promoted even though the add fails.
    /// When the cache is full, the single least-recently-used entry is
    /// evicted unconditionally, even if a more-recently-used entry is
    /// already expired: the LRU slot is known in O(1) while finding an
    /// expired victim would require a scan.
    pub fn add(&mut self, key: &str, value: String, expire: Option<u64>) -> Result<()> {
        if self.lookup(key).is_ok() {
            return Err(CacheError::AlreadyExists(key.to_string()));
        }

        if self.entries.len() >= self.capacity {
            // Plain delete: the expiring counter is only adjusted by the
            // expiration paths (see module notes on remove()).
            self.entries.pop_lru();
        }

        let now = current_timestamp_ms();
        let mut entry = CacheEntry::new(value, now);
        if let Some(ttl) = expire.filter(|&ttl| ttl > 0) {
            entry.set_deadline(now, ttl);
            self.expiring += 1;
        }
        self.entries.put(key.to_string(), entry);
        Ok(())
    }

    // == Set ==
    /// Overwrites the value of a live entry, failing with `NotFound`
    /// otherwise. Promotes the entry and installs a new deadline when
    /// `expire` is positive.
    pub fn set(&mut self, key: &str, value: String, expire: Option<u64>) -> Result<()> {
        let now = current_timestamp_ms();
        let newly_expiring = {
            let entry = self.lookup(key)?;
            entry.value = value;
            match expire.filter(|&ttl| ttl > 0) {
                Some(ttl) => entry.set_deadline(now, ttl),
                None => false,
            }
        };
        if newly_expiring {
            self.expiring += 1;
        }
        Ok(())
    }

    // == Remove ==
    /// Deletes a live entry, failing with `NotFound` otherwise.
    ///
    /// Removing a live entry that still carries a deadline does not
    /// decrement the expiring counter; only the expiration paths do. The
    /// counter may therefore run high, which the sweep tolerates by
    /// clamping its removal target to it.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.lookup(key)?;
        self.entries.pop(key);
        Ok(())
    }

    // == Flush ==
    /// Unconditionally clears all entries and resets the expiring counter.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.expiring = 0;
    }

    // == Size ==
    /// Current live-entry count. May transiently include entries whose
    /// deadline has passed but which no lookup has visited yet.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries counted as carrying an expiration deadline.
    pub fn expiring(&self) -> usize {
        self.expiring
    }

    // == Sweep Scheduling ==
    /// Whether an active-expiration sweep is due.
    ///
    /// True when at least one entry carries a deadline and the cooldown
    /// since the last sweep has elapsed. Checked on the insertion path;
    /// the owner schedules the sweep as a detached task so the caller of
    /// the triggering operation is never blocked by it.
    pub fn should_sweep(&self) -> bool {
        self.expiring > 0
            && current_timestamp_ms().saturating_sub(self.last_sweep) >= EXPIRE_INTERVAL_MS
    }

    /// Overrides the last-sweep timestamp. Lets tests force the cooldown
    /// to look stale without waiting out the interval.
    pub(crate) fn set_last_sweep(&mut self, timestamp_ms: u64) {
        self.last_sweep = timestamp_ms;
    }

    // == Sweep ==
    /// Active-expiration pass over the cache.
    ///
    /// Stamps the sweep time first, then walks the recency order from the
    /// least-recently-used end, removing expired entries until
    /// `min(capacity / 3, expiring)` removals happened. The walk stops at
    /// the target, so expired entries beyond the stopping point stay in
    /// place until a later lookup or sweep visits them.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let now = current_timestamp_ms();
        self.last_sweep = now;

        let target = (self.capacity / 3).min(self.expiring);
        if target == 0 {
            return 0;
        }

        let mut stale: Vec<String> = Vec::with_capacity(target);
        for (key, entry) in self.entries.iter().rev() {
            if entry.is_expired(now) {
                stale.push(key.clone());
                if stale.len() >= target {
                    break;
                }
            }
        }

        for key in &stale {
            if self.entries.pop(key).is_some() {
                self.expiring = self.expiring.saturating_sub(1);
            }
        }
        stale.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_engine_new() {
        let engine = CacheEngine::new(10);
        assert_eq!(engine.capacity(), 10);
        assert_eq!(engine.size(), 0);
        assert_eq!(engine.expiring(), 0);
    }

    #[test]
    fn test_get_missing_key() {
        let mut engine = CacheEngine::new(2);
        assert_eq!(
            engine.get("t1"),
            Err(CacheError::NotFound("t1".to_string()))
        );
    }

    #[test]
    fn test_add_and_get() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), None).unwrap();
        assert_eq!(engine.size(), 1);
        assert_eq!(engine.get("t1").unwrap(), "test");
    }

    #[test]
    fn test_add_existing_fails_and_keeps_value() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), None).unwrap();
        let result = engine.add("t1", "other".to_string(), None);

        assert_eq!(result, Err(CacheError::AlreadyExists("t1".to_string())));
        assert_eq!(engine.get("t1").unwrap(), "test");
    }

    #[test]
    fn test_add_caps_at_capacity() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), None).unwrap();
        engine.add("t3", "c".to_string(), None).unwrap();

        assert_eq!(engine.size(), 2);
    }

    #[test]
    fn test_evicts_lru_first() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), None).unwrap();
        engine.add("t3", "c".to_string(), None).unwrap();

        assert_eq!(
            engine.get("t1"),
            Err(CacheError::NotFound("t1".to_string()))
        );
        assert_eq!(engine.get("t2").unwrap(), "b");
        assert_eq!(engine.get("t3").unwrap(), "c");
    }

    #[test]
    fn test_get_promotes_recency() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), None).unwrap();
        engine.get("t1").unwrap();
        engine.add("t3", "c".to_string(), None).unwrap();

        assert_eq!(engine.get("t1").unwrap(), "a");
        assert_eq!(
            engine.get("t2"),
            Err(CacheError::NotFound("t2".to_string()))
        );
        assert_eq!(engine.get("t3").unwrap(), "c");
    }

    #[test]
    fn test_failed_add_promotes_conflicting_key() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), None).unwrap();
        // Conflict on t1 still promotes it past t2
        let _ = engine.add("t1", "a".to_string(), None);
        engine.add("t3", "c".to_string(), None).unwrap();

        assert!(engine.get("t1").is_ok());
        assert_eq!(
            engine.get("t2"),
            Err(CacheError::NotFound("t2".to_string()))
        );
        assert!(engine.get("t3").is_ok());
    }

    #[test]
    fn test_remove() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), None).unwrap();
        engine.remove("t1").unwrap();

        assert_eq!(engine.size(), 0);
        assert_eq!(
            engine.get("t1"),
            Err(CacheError::NotFound("t1".to_string()))
        );
    }

    #[test]
    fn test_set_overwrites_value() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), None).unwrap();
        engine.set("t1", "testing".to_string(), None).unwrap();

        assert_eq!(engine.get("t1").unwrap(), "testing");
    }

    #[test]
    fn test_set_and_remove_require_live_entry() {
        let mut engine = CacheEngine::new(2);

        assert_eq!(
            engine.set("t1", "testing".to_string(), None),
            Err(CacheError::NotFound("t1".to_string()))
        );
        assert_eq!(
            engine.remove("t1"),
            Err(CacheError::NotFound("t1".to_string()))
        );
    }

    #[test]
    fn test_lazy_expiration() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), Some(1)).unwrap();
        assert_eq!(engine.expiring(), 1);

        sleep(Duration::from_millis(1100));

        assert_eq!(
            engine.get("t1"),
            Err(CacheError::NotFound("t1".to_string()))
        );
        assert_eq!(engine.expiring(), 0);
        assert_eq!(engine.size(), 0);
    }

    #[test]
    fn test_add_over_expired_entry() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), Some(1)).unwrap();
        sleep(Duration::from_millis(1100));

        engine.add("t1", "test".to_string(), None).unwrap();
        assert!(engine.get("t1").is_ok());
    }

    #[test]
    fn test_stat_returns_bookkeeping() {
        let mut engine = CacheEngine::new(2);

        let before = current_timestamp_ms();
        engine.add("t1", "test".to_string(), Some(60)).unwrap();
        let stat = engine.stat("t1").unwrap();

        assert!(stat.last_used >= before);
        assert!(stat.expire_at.unwrap() >= before + 60_000);
    }

    #[test]
    fn test_get_refreshes_last_used() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), None).unwrap();
        let first = engine.stat("t1").unwrap().last_used;

        sleep(Duration::from_millis(20));
        engine.get("t1").unwrap();
        let second = engine.stat("t1").unwrap().last_used;

        assert!(second >= first + 20);
    }

    #[test]
    fn test_remove_keeps_expiring_counter() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "test".to_string(), Some(60)).unwrap();
        assert_eq!(engine.expiring(), 1);

        engine.remove("t1").unwrap();
        // Counter is left as-is on plain removal; only expiration paths
        // decrement it.
        assert_eq!(engine.expiring(), 1);
    }

    #[test]
    fn test_flush() {
        let mut engine = CacheEngine::new(3);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), Some(60)).unwrap();
        engine.flush();

        assert_eq!(engine.size(), 0);
        assert_eq!(engine.expiring(), 0);
    }

    #[test]
    fn test_set_updates_deadline_and_counter_once() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.set("t1", "b".to_string(), Some(60)).unwrap();
        assert_eq!(engine.expiring(), 1);

        // A second deadline overwrites the first without recounting
        engine.set("t1", "c".to_string(), Some(120)).unwrap();
        assert_eq!(engine.expiring(), 1);
    }

    #[test]
    fn test_should_sweep_requires_expiring_and_stale_cooldown() {
        let mut engine = CacheEngine::new(3);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.set_last_sweep(0);
        // No entry carries a deadline
        assert!(!engine.should_sweep());

        engine.add("t2", "b".to_string(), Some(60)).unwrap();
        assert!(engine.should_sweep());

        engine.set_last_sweep(current_timestamp_ms());
        assert!(!engine.should_sweep());
    }

    #[test]
    fn test_sweep_removes_expired_and_spares_lru_survivor() {
        let mut engine = CacheEngine::new(3);

        engine.add("t1", "a".to_string(), None).unwrap();
        engine.add("t2", "b".to_string(), Some(1)).unwrap();
        sleep(Duration::from_millis(1100));

        let removed = engine.sweep();
        assert_eq!(removed, 1);
        assert_eq!(engine.expiring(), 0);

        // The sweep, not LRU eviction, reclaimed the slot: t1 survives the
        // next insertions even though it is the oldest entry.
        engine.add("t3", "c".to_string(), None).unwrap();
        engine.add("t4", "d".to_string(), None).unwrap();
        assert!(engine.get("t1").is_ok());
    }

    #[test]
    fn test_sweep_stops_at_target() {
        let mut engine = CacheEngine::new(9);

        for i in 0..6 {
            engine
                .add(&format!("t{i}"), "v".to_string(), Some(1))
                .unwrap();
        }
        sleep(Duration::from_millis(1100));

        // target = min(9 / 3, 6) = 3, so half of the expired entries stay
        let removed = engine.sweep();
        assert_eq!(removed, 3);
        assert_eq!(engine.size(), 3);
        assert_eq!(engine.expiring(), 3);
    }

    #[test]
    fn test_sweep_with_tiny_capacity_removes_nothing() {
        let mut engine = CacheEngine::new(2);

        engine.add("t1", "a".to_string(), Some(1)).unwrap();
        sleep(Duration::from_millis(1100));

        // target = min(2 / 3, 1) = 0
        assert_eq!(engine.sweep(), 0);
        assert_eq!(engine.size(), 1);
    }

    #[test]
    fn test_sweep_stamps_cooldown() {
        let mut engine = CacheEngine::new(3);

        engine.add("t1", "a".to_string(), Some(60)).unwrap();
        engine.set_last_sweep(0);
        assert!(engine.should_sweep());

        engine.sweep();
        assert!(!engine.should_sweep());
    }
}
