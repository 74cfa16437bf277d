//! Record Service
//!
//! Reads go cache first and fall back to the store, backfilling the cache on
//! a store hit. Creates commit to the store first and only then write the
//! cache. The cache is never authoritative: any cache failure is logged and
//! the operation carries on against the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::cache::CacheBackend;
use crate::config::Config;
use crate::error::{CacheError, Result, ServiceError, StorageError};
use crate::models::Record;
use crate::service::validate_name;
use crate::store::RecordStore;

/// Per-call deadlines for the two backends.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub store: Duration,
    pub cache: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            store: Duration::from_millis(2000),
            cache: Duration::from_millis(250),
        }
    }
}

impl From<&Config> for Timeouts {
    fn from(config: &Config) -> Self {
        Self {
            store: config.store_timeout,
            cache: config.cache_timeout,
        }
    }
}

// == Record Service ==
/// Cache-aside front for a [`RecordStore`].
///
/// Holds no state of its own beyond the two shared handles, so clones are
/// cheap and can be handed to every request.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn CacheBackend>,
    timeouts: Timeouts,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        cache: Arc<dyn CacheBackend>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            store,
            cache,
            timeouts,
        }
    }

    // == Create ==
    /// Inserts a new record, then shadows it in the cache.
    ///
    /// # Errors
    /// - `InvalidInput` if the name is rejected
    /// - `Conflict` if the name is already taken
    /// - `Storage` if the store fails or times out
    #[instrument(skip(self))]
    pub async fn create_record(&self, name: &str) -> Result<Record> {
        validate_name(name)?;

        let record = self.store_call(self.store.insert(name)).await?;
        info!(id = record.id, "Record created");

        self.populate_cache(&record).await;
        Ok(record)
    }

    // == Get ==
    /// Returns the record named `name`, from the cache when possible.
    ///
    /// # Errors
    /// - `InvalidInput` if the name is rejected
    /// - `NotFound` if no such record exists
    /// - `Storage` if the store fails or times out on a cache miss
    #[instrument(skip(self))]
    pub async fn get_record(&self, name: &str) -> Result<Record> {
        validate_name(name)?;

        if let Some(record) = self.cached(name).await {
            debug!("Served from cache");
            return Ok(record);
        }

        let record = self
            .store_call(self.store.find_by_name(name))
            .await?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;
        debug!(id = record.id, "Served from store");

        self.populate_cache(&record).await;
        Ok(record)
    }

    // == Cache Helpers ==
    /// Reads the shadow for `name`. Anything other than a well-formed shadow
    /// of the same name counts as a miss.
    async fn cached(&self, name: &str) -> Option<Record> {
        let value = match self.cache_call(self.cache.get(name)).await {
            Ok(value) => value?,
            Err(err) => {
                warn!(error = %err, "Cache read failed, falling back to store");
                return None;
            }
        };

        match Record::from_cache_value(&value) {
            Ok(record) if record.name == name => Some(record),
            Ok(record) => {
                warn!(cached = %record.name, "Cache shadow belongs to another record");
                None
            }
            Err(err) => {
                warn!(error = %err, "Undecodable cache shadow");
                None
            }
        }
    }

    /// Writes the shadow for `record`. Failures are logged and dropped.
    async fn populate_cache(&self, record: &Record) {
        let value = match record.to_cache_value() {
            Ok(value) => value,
            Err(err) => {
                warn!(name = %record.name, error = %err, "Could not encode cache shadow");
                return;
            }
        };

        if let Err(err) = self.cache_call(self.cache.set(&record.name, &value)).await {
            warn!(name = %record.name, error = %err, "Cache write failed");
        }
    }

    // == Deadlines ==
    async fn store_call<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, StorageError>>,
    ) -> std::result::Result<T, StorageError> {
        tokio::time::timeout(self.timeouts.store, call)
            .await
            .map_err(|_| StorageError::Timeout(self.timeouts.store))?
    }

    async fn cache_call<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, CacheError>>,
    ) -> std::result::Result<T, CacheError> {
        tokio::time::timeout(self.timeouts.cache, call)
            .await
            .map_err(|_| CacheError::Timeout(self.timeouts.cache))?
    }
}
