//! API Routes
//!
//! Configures the Axum router with all record service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_record_handler, get_record_handler, health_handler, hello_handler, root_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Greeting
/// - `GET /hello/:name` - Personal greeting
/// - `POST /create_user/:name` - Create a record
/// - `GET /user/:name` - Look a record up
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/hello/:name", get(hello_handler))
        .route("/create_user/:name", post(create_record_handler))
        .route("/user/:name", get(get_record_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
