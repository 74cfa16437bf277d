//! Integration Tests for API Endpoints
//!
//! Drives the full router against an in-memory SQLite store and the
//! in-process cache.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use record_cache::{
    api::create_router,
    cache::MemoryCache,
    service::Timeouts,
    store::{SqliteRecordStore, StoreConfig},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

async fn create_test_app() -> (Router, MemoryCache, Arc<SqliteRecordStore>) {
    let store = Arc::new(
        SqliteRecordStore::connect(&StoreConfig::in_memory())
            .await
            .unwrap(),
    );
    let cache = MemoryCache::new(100, None);
    let state = AppState::with_backends(store.clone(), cache.clone(), Timeouts::default());
    (create_router(state), cache, store)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Greeting Endpoints ==

#[tokio::test]
async fn test_root_endpoint() {
    let (app, _, _) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello World");
}

#[tokio::test]
async fn test_hello_endpoint() {
    let (app, _, _) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/hello/bob").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello bob");
}

// == Create Endpoint ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let (app, _, _) = create_test_app().await;

    let (status, json) = send(&app, "POST", "/create_user/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "User alice created");
    assert_eq!(json["record"]["name"], "alice");
    assert!(json["record"]["id"].is_i64());
}

#[tokio::test]
async fn test_create_endpoint_duplicate() {
    let (app, _, _) = create_test_app().await;

    let (first, _) = send(&app, "POST", "/create_user/alice").await;
    let (second, json) = send(&app, "POST", "/create_user/alice").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("alice"));
}

#[tokio::test]
async fn test_create_endpoint_rejects_blank_name() {
    let (app, _, _) = create_test_app().await;

    let (status, json) = send(&app, "POST", "/create_user/%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == Lookup Endpoint ==

#[tokio::test]
async fn test_get_endpoint_hit_and_miss_share_shape() {
    let (app, cache, _) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/create_user/alice").await;

    // Served from the shadow written by create.
    let (status, from_cache) = send(&app, "GET", "/user/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(from_cache, created["record"]);
    assert_eq!(cache.stats().await.hits, 1);
}

#[tokio::test]
async fn test_get_endpoint_backfills_from_store() {
    let (app, cache, store) = create_test_app().await;

    // Present in the store only.
    let seeded = record_cache::store::RecordStore::insert(store.as_ref(), "carol")
        .await
        .unwrap();

    let (status, first) = send(&app, "GET", "/user/carol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], seeded.id);
    assert_eq!(first["name"], "carol");

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.total_entries, 1);

    let (_, second) = send(&app, "GET", "/user/carol").await;
    assert_eq!(second, first);
    assert_eq!(cache.stats().await.hits, 1);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let (app, cache, _) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/user/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Record not found");
    assert_eq!(cache.stats().await.total_entries, 0);
}

#[tokio::test]
async fn test_get_endpoint_store_down() {
    let (app, _, store) = create_test_app().await;
    store.close().await;

    let (status, json) = send(&app, "GET", "/user/alice").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Database error");
}

// == Stats and Health ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _, _) = create_test_app().await;

    send(&app, "POST", "/create_user/alice").await;
    send(&app, "GET", "/user/alice").await;
    send(&app, "GET", "/user/ghost").await;

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
