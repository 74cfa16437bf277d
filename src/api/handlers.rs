//! API Handlers
//!
//! HTTP request handlers. Each one parses its path, calls the record service
//! and serializes the outcome.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::MemoryCache;
use crate::error::Result;
use crate::models::{CreateRecordResponse, HealthResponse, MessageResponse, Record, StatsResponse};
use crate::service::{RecordService, Timeouts};
use crate::store::RecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside record operations
    pub records: RecordService,
    /// The cache behind `records`, kept for `/stats`
    pub cache: MemoryCache,
}

impl AppState {
    /// Creates a new AppState from an already wired service.
    pub fn new(records: RecordService, cache: MemoryCache) -> Self {
        Self { records, cache }
    }

    /// Wires a [`RecordService`] over `store` and `cache`.
    pub fn with_backends(
        store: Arc<dyn RecordStore>,
        cache: MemoryCache,
        timeouts: Timeouts,
    ) -> Self {
        let records = RecordService::new(store, Arc::new(cache.clone()), timeouts);
        Self::new(records, cache)
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}

/// Handler for GET /hello/:name
pub async fn hello_handler(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello {}", name)))
}

/// Handler for POST /create_user/:name
///
/// Creates a record and returns it along with a confirmation message.
pub async fn create_record_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CreateRecordResponse>> {
    let record = state.records.create_record(&name).await?;
    Ok(Json(CreateRecordResponse::new(record)))
}

/// Handler for GET /user/:name
///
/// Returns the record with the same shape whether it came from the cache or
/// the store.
pub async fn get_record_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Record>> {
    let record = state.records.get_record(&name).await?;
    Ok(Json(record))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
