//! Timed Cache - A thread-safe in-memory byte cache
//!
//! Memoizes response bodies keyed by request identifier for a fixed interval,
//! with a background reaper that drops stale entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::TimedCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::CachedFetcher;
