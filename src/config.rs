//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache interval in seconds: both entry lifetime and reaper period
    pub cache_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Upstream request timeout in seconds for the fetch-through layer
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_SECS` - Entry lifetime and reap period (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FETCH_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: parse_var("CACHE_INTERVAL_SECS").unwrap_or(defaults.cache_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            fetch_timeout: parse_var("FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
        }
    }

    /// Cache interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// Fetch timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 300,
            server_port: 3000,
            fetch_timeout: 10,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
