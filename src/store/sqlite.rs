//! SQLite Record Store
//!
//! [`RecordStore`] over a `sqlx` connection pool. Every call checks a
//! connection out of the pool and returns it when the call ends, whatever
//! the outcome.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::Record;
use crate::store::RecordStore;

const CREATE_RECORDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)";

// == Store Config ==
/// Connection settings for [`SqliteRecordStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// sqlx connection URL, e.g. `sqlite://records.db` or `sqlite::memory:`
    pub database_url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// How long a call waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://records.db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// A private in-memory database, gone once the store is dropped.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

// == SQLite Record Store ==
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Opens the pool and creates the `records` table if needed.
    #[instrument(skip(config), fields(url = %config.database_url))]
    pub async fn connect(config: &StoreConfig) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        // An in-memory database lives only as long as its connection.
        if config.is_in_memory() {
            pool_options = pool_options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        sqlx::query(CREATE_RECORDS_TABLE).execute(&pool).await?;

        info!(
            max_connections = config.max_connections,
            "Record store ready"
        );
        Ok(Self { pool })
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        info!("Closing record store");
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self))]
    async fn insert(&self, name: &str) -> Result<Record, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("INSERT INTO records (name) VALUES (?)")
            .bind(name)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(db) = &err {
                    if db.is_unique_violation() {
                        return StorageError::Duplicate(name.to_string());
                    }
                }
                StorageError::from(err)
            })?;

        let record = Record::new(result.last_insert_rowid(), name);
        debug!(id = record.id, "Record inserted");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Record>, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, Record>("SELECT id, name FROM records WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(record)
    }
}
