//! Error types for the cache
//!
//! Provides unified error handling using thiserror. The core `add`/`get`
//! operations never fail; these errors come from construction and the
//! fetch/HTTP layers built on top of the cache.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its outer layers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache interval must be non-zero and fit the clock
    #[error("Invalid interval: cache interval must be greater than zero and not overflow the clock")]
    InvalidInterval,

    /// The reaper needs a tokio runtime to run on
    #[error("No tokio runtime available to spawn the reaper task")]
    NoRuntime,

    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream answered with a non-success status
    #[error("Upstream {url} responded with status {status}")]
    Upstream { url: String, status: u16 },

    /// Transport failure talking to upstream
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Upstream body is not the JSON the caller asked for
    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Upstream { .. } | CacheError::Fetch(_) | CacheError::Decode { .. } => {
                StatusCode::BAD_GATEWAY
            }
            CacheError::InvalidInterval | CacheError::NoRuntime | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
