//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing JSON response bodies. Cached values
//! themselves are returned as raw bytes, not through these types.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for storing an entry (PUT /entries/*key)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// Stored value size in bytes
    pub size: usize,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>, size: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached successfully", key),
            key,
            size,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of adds, overwrites included
    pub inserts: u64,
    /// Number of entries removed by the reaper
    pub reaped: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Cache interval in seconds
    pub interval_secs: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot
    pub fn new(stats: &CacheStats, interval_secs: f64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            reaped: stats.reaped,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            interval_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
