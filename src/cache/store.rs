//! Cache Store Module
//!
//! The unsynchronized map behind `TimedCache`. Every method here runs while
//! the caller holds the cache lock.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry mapping plus its counters.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and reap counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamping it with `now`.
    ///
    /// Replacing resets the entry's age.
    pub fn add(&mut self, key: String, value: Bytes, now: Instant) {
        self.entries.insert(key, CacheEntry::new_at(value, now));
        self.stats.record_insert();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a view of the stored bytes, regardless of the entry's age.
    ///
    /// Staleness is only acted on by [`CacheStore::reap`].
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry strictly older than `interval` at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, now: Instant, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, interval));
        let removed = before - self.entries.len();

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
