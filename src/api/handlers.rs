//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::TimedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetch::CachedFetcher;
use crate::models::{FetchQuery, HealthResponse, PutResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// `TimedCache` is already a shared handle, so the state clones cheaply.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache
    pub cache: TimedCache,
    /// Fetch-through client backed by the same cache
    pub fetcher: CachedFetcher,
}

impl AppState {
    /// Creates a new AppState around `cache`.
    pub fn new(cache: TimedCache, fetch_timeout: Duration) -> Result<Self> {
        let fetcher = CachedFetcher::new(cache.clone(), fetch_timeout)?;
        Ok(Self { cache, fetcher })
    }

    /// Creates a new AppState from configuration.
    ///
    /// Must be called inside a tokio runtime, which hosts the cache reaper.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = TimedCache::new(config.interval())?;
        Self::new(cache, config.timeout())
    }
}

fn octet_stream(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/octet-stream")], body).into_response()
}

/// Handler for PUT /entries/*key
///
/// Caches the raw request body under `key`.
pub async fn put_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Json<PutResponse> {
    let size = body.len();
    state.cache.add(key.clone(), body).await;

    Json(PutResponse::new(key, size))
}

/// Handler for GET /entries/*key
///
/// Returns the cached bytes, or 404 on a miss.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    match state.cache.get(&key).await {
        Some(value) => Ok(octet_stream(value)),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /fetch?url=...
///
/// Serves the upstream body for `url` through the cache.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Response> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let body = state.fetcher.fetch(&query.url).await?;
    Ok(octet_stream(body))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;

    Json(StatsResponse::new(
        &stats,
        state.cache.interval().as_secs_f64(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
