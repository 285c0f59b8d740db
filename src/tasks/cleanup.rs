//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired entries out of the
//! in-memory cache. Reads already treat expired entries as misses; the sweep
//! only reclaims memory for keys nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::InMemoryCache;

/// Spawns a background task that periodically removes expired cache entries.
///
/// # Arguments
/// * `cache` - Handle to the in-memory cache adapter
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: InMemoryCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
