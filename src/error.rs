//! Error types for the record service
//!
//! One `thiserror` enum per layer: the durable store, the cache store and the
//! service boundary. Only [`ServiceError`] ever reaches the HTTP layer.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Storage Error Enum ==
/// Failures raised by a durable record store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A record with this name already exists
    #[error("Record already exists: {0}")]
    Duplicate(String),

    /// The store could not be reached (pool closed, IO failure)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer in time
    #[error("Store timed out after {0:?}")]
    Timeout(Duration),

    /// Any other query failure
    #[error("Query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StorageError::Unavailable("connection pool timed out".into())
            }
            sqlx::Error::PoolClosed => StorageError::Unavailable("connection pool closed".into()),
            sqlx::Error::Io(e) => StorageError::Unavailable(e.to_string()),
            other => StorageError::Query(other.to_string()),
        }
    }
}

// == Cache Error Enum ==
/// Failures raised by a cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid key or value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Cache could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Cache did not answer in time
    #[error("Cache timed out after {0:?}")]
    Timeout(Duration),
}

// == Service Error Enum ==
/// Errors surfaced by [`crate::service::RecordService`] to its callers.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The record name was rejected before touching any store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record with this name exists
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record with this name already exists
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// The durable store failed or timed out
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(name) => ServiceError::Conflict(name),
            other => ServiceError::Storage(other),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Record not found".to_string()),
            ServiceError::Conflict(name) => (
                StatusCode::CONFLICT,
                format!("Record '{}' already exists", name),
            ),
            ServiceError::Storage(cause) => {
                // The cause stays in the logs; callers only learn the lookup failed.
                error!(error = %cause, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
