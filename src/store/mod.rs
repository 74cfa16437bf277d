//! Durable Store Module
//!
//! The authoritative side of the cache-aside pair. [`RecordStore`] is the port
//! the record service depends on; [`SqliteRecordStore`] implements it on a
//! `sqlx` SQLite pool.

mod sqlite;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::Record;

pub use sqlite::{SqliteRecordStore, StoreConfig};

/// Persistent record repository keyed by unique name.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a new record and returns it as committed.
    ///
    /// Fails with [`StorageError::Duplicate`] when the name is already taken.
    async fn insert(&self, name: &str) -> Result<Record, StorageError>;

    /// Looks a record up by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Record>, StorageError>;
}
