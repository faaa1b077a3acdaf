//! Fetch-Through Layer
//!
//! Serves HTTP GET bodies from a [`TimedCache`], going upstream only on a miss.
//! The request URL is the cache key.

use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::TimedCache;
use crate::error::{CacheError, Result};

// == Cached Fetcher ==
/// HTTP client that memoizes successful response bodies in a cache.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    cache: TimedCache,
    client: reqwest::Client,
}

impl CachedFetcher {
    /// Builds a fetcher over `cache` whose upstream requests time out after `timeout`.
    pub fn new(cache: TimedCache, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { cache, client })
    }

    /// The cache backing this fetcher.
    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    // == Fetch ==
    /// Returns the body for `url`, from the cache when present.
    ///
    /// On a miss the body is fetched, cached and returned. Responses with a
    /// status above 299 are reported as [`CacheError::Upstream`] and not cached.
    /// Two concurrent misses for the same URL both go upstream; the later
    /// `add` wins.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url).await {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching upstream");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.as_u16() > 299 {
            warn!(url, status = status.as_u16(), "Upstream request failed");
            return Err(CacheError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone()).await;
        Ok(body)
    }

    // == Fetch JSON ==
    /// Like [`CachedFetcher::fetch`], then decodes the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        serde_json::from_slice(&body).map_err(|source| CacheError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
