//! API Module
//!
//! HTTP handlers and routing for the record service REST API.
//!
//! # Endpoints
//! - `GET /` and `GET /hello/:name` - Greetings
//! - `POST /create_user/:name` - Create a record
//! - `GET /user/:name` - Look a record up
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
