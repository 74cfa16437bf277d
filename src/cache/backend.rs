//! Cache Backend Module
//!
//! The port the record service uses to reach a cache, and its in-process
//! implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

/// A best-effort string key/value cache.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Returns the value under `key`, or None on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
}

// == Memory Cache ==
/// [`CacheBackend`] backed by a process-local [`CacheStore`].
///
/// Clones share the same underlying store.
#[derive(Clone, Debug)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    /// Creates an empty cache holding at most `max_entries` entries, each
    /// living for `ttl` when set.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries, ttl))),
        }
    }

    /// Shared handle on the underlying store, used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    /// Snapshot of hit/miss/eviction counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store
            .write()
            .await
            .set(key.to_string(), value.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: a read updates LRU order and stats.
        Ok(self.store.write().await.get(key))
    }
}
