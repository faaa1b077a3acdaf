//! Timed Cache Module
//!
//! The public, thread-safe cache handle. Owns the entry map behind a single
//! mutex and one background reaper task per instance.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Reaper Guard ==
/// Stops the reaper once the last cache handle is gone.
#[derive(Debug)]
struct ReaperGuard {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl Drop for ReaperGuard {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// == Timed Cache ==
/// In-memory byte cache whose entries are reaped once they outlive `interval`.
///
/// Cloning is cheap and every clone shares the same entries, lock and reaper.
/// `get` never checks age: an entry stays visible until a reaper pass finds it
/// strictly older than `interval`, so entries live between `interval` and
/// roughly `2 * interval`.
///
/// There is no bound on the number of keys. Callers that add distinct keys
/// faster than they age out grow the map without limit.
///
/// # Example
/// ```ignore
/// let cache = TimedCache::new(Duration::from_secs(300))?;
/// cache.add("https://pokeapi.co/api/v2/location-area/", body).await;
/// if let Some(cached) = cache.get("https://pokeapi.co/api/v2/location-area/").await {
///     // use cached
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TimedCache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    reaper: Arc<ReaperGuard>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// # Errors
    /// - [`CacheError::InvalidInterval`] if `interval` is zero or so large that
    ///   the first reap deadline overflows the clock
    /// - [`CacheError::NoRuntime`] if called outside a tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval);
        }
        let first_tick = Instant::now()
            .checked_add(interval)
            .ok_or(CacheError::InvalidInterval)?;
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let shutdown = CancellationToken::new();
        let handle = spawn_reaper(
            &runtime,
            Arc::downgrade(&store),
            first_tick,
            interval,
            shutdown.clone(),
        );

        info!(?interval, "Timed cache created");

        Ok(Self {
            store,
            interval,
            reaper: Arc::new(ReaperGuard { shutdown, handle }),
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry and its age.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let (key, value) = (key.into(), value.into());
        let mut store = self.store.lock().await;
        store.add(key, value, Instant::now());
    }

    // == Get ==
    /// Returns the bytes stored under `key`, or `None` on a miss.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        self.store.lock().await.get(key)
    }

    /// Entry lifetime and reaper period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    // == Stop ==
    /// Stops the reaper. Entries already cached stay readable but no longer age out.
    pub fn stop(&self) {
        if !self.reaper.shutdown.is_cancelled() {
            info!("Stopping cache reaper");
            self.reaper.shutdown.cancel();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.reaper.shutdown.is_cancelled()
    }

    /// Whether the reaper task is still alive.
    pub fn is_reaper_running(&self) -> bool {
        !self.reaper.handle.is_finished()
    }
}
