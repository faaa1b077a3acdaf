//! Cache Module
//!
//! Provides a thread-safe in-memory byte cache whose entries are removed by a
//! periodic background reaper.

mod entry;
mod stats;
mod store;
mod timed;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use timed::TimedCache;
