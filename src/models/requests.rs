//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

/// Query string for the fetch-through endpoint (GET /fetch?url=...)
#[derive(Debug, Clone, Deserialize)]
pub struct FetchQuery {
    /// Upstream URL, also used as the cache key
    pub url: String,
}

impl FetchQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("url cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Some(format!("url must be http or https: {}", self.url));
        }
        None
    }
}
