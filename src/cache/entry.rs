//! Cache Entry Module
//!
//! Defines the structure for individual cache entries: an opaque byte value
//! plus the instant it was added.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value and its insertion time.
///
/// Entries are never mutated in place; re-adding a key replaces the whole
/// entry, timestamp included.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    pub value: Bytes,
    /// When the entry was added
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::new_at(value, Instant::now())
    }

    /// Creates a new entry with an explicit creation instant.
    pub fn new_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between creation and `now`, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Whether the entry is strictly older than `interval` at `now`.
    ///
    /// An entry exactly `interval` old is still fresh.
    pub fn is_stale(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) > interval
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        assert_eq!(entry.value, Bytes::from_static(b"payload"));
        assert!(entry.age(Instant::now()) < Duration::from_secs(1));
    }

    #[test]
    fn test_empty_value_is_legal() {
        let entry = CacheEntry::new(Bytes::new());
        assert!(entry.value.is_empty());
    }

    #[test]
    fn test_stale_boundary_is_exclusive() {
        let start = Instant::now();
        let interval = Duration::from_millis(100);
        let entry = CacheEntry::new_at(Bytes::from_static(b"v"), start);

        assert!(!entry.is_stale(start, interval));
        assert!(!entry.is_stale(start + interval, interval));
        assert!(entry.is_stale(start + interval + Duration::from_millis(1), interval));
    }

    #[test]
    fn test_age_saturates_for_earlier_now() {
        let start = Instant::now();
        let entry = CacheEntry::new_at(Bytes::from_static(b"v"), start + Duration::from_secs(5));

        assert_eq!(entry.age(start), Duration::ZERO);
    }
}
