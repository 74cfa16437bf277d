//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::store::StoreConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx URL of the durable store
    pub database_url: String,
    /// Upper bound on pooled store connections
    pub db_max_connections: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// Lifetime of cache entries in seconds, None = no expiry
    pub cache_ttl: Option<u64>,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Deadline for a single store call
    pub store_timeout: Duration,
    /// Deadline for a single cache call
    pub cache_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - Store URL (default: sqlite://records.db)
    /// - `DB_MAX_CONNECTIONS` - Store pool size (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Cache entry lifetime in seconds (default: unset, no expiry)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `STORE_TIMEOUT_MS` - Store call deadline (default: 2000)
    /// - `CACHE_TIMEOUT_MS` - Cache call deadline (default: 250)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl: parse_var("CACHE_TTL").filter(|ttl| *ttl > 0),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            store_timeout: parse_var("STORE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.store_timeout),
            cache_timeout: parse_var("CACHE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_timeout),
        }
    }

    /// Connection settings for the record store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            ..StoreConfig::default()
        }
    }

    /// Cache entry lifetime, if any.
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://records.db".to_string(),
            db_max_connections: 5,
            server_port: 3000,
            cache_max_entries: 1000,
            cache_ttl: None,
            cleanup_interval: 1,
            store_timeout: Duration::from_millis(2000),
            cache_timeout: Duration::from_millis(250),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
