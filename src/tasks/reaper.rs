//! Reaper Task
//!
//! Background task that periodically removes stale cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reaper for one cache instance.
///
/// Every `interval`, starting at `first_tick`, the task locks the store and
/// drops entries strictly older than `interval`.
/// Ticks missed while the lock was contended are skipped, not replayed.
///
/// The task holds only a weak reference to the store. It exits when
/// `shutdown` is cancelled or when the store has been dropped.
///
/// # Arguments
/// * `runtime` - Runtime to spawn the task on
/// * `store` - Weak reference to the cache's entry map
/// * `first_tick` - Deadline of the first pass, normally one interval from now
/// * `interval` - Reap period and entry lifetime
/// * `shutdown` - Token that stops the loop when cancelled
pub fn spawn_reaper(
    runtime: &Handle,
    store: Weak<Mutex<CacheStore>>,
    first_tick: Instant,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    let mut ticker = time::interval_at(first_tick, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    runtime.spawn(async move {
        debug!(?interval, "Reaper task started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let Some(store) = store.upgrade() else {
                break;
            };

            let (removed, remaining) = {
                let mut guard = store.lock().await;
                let now = Instant::now();
                let removed = guard.reap(now, interval);
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Reaped stale cache entries");
            } else {
                debug!(remaining, "Reaper pass found no stale entries");
            }
        }

        debug!("Reaper task stopped");
    })
}
