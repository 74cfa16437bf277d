//! Record Cache - a record lookup service with cache-aside reads
//!
//! Records live in a SQLite store; an in-process cache shadows them so
//! repeated lookups skip the database.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::RecordService;
pub use tasks::spawn_cleanup_task;
