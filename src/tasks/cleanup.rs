//! TTL Cleanup Task
//!
//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that calls [`CacheStore::cleanup_expired`] every
/// `cleanup_interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            "Starting cache cleanup task"
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "Cache cleanup removed expired entries");
            } else {
                debug!("Cache cleanup found nothing to remove");
            }
        }
    })
}
