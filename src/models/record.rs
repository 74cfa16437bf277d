//! Record Module
//!
//! The persisted entity and its cache encoding.

use serde::{Deserialize, Serialize};

/// A named record. `name` is the natural key; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    /// Surrogate key assigned on insert
    pub id: i64,
    /// Unique record name
    pub name: String,
}

impl Record {
    /// Creates a Record from its parts.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    // == Cache Encoding ==
    /// Serializes the full record as the cache value for its name.
    pub fn to_cache_value(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a cached value.
    pub fn from_cache_value(value: &str) -> serde_json::Result<Self> {
        serde_json::from_str(value)
    }
}
