//! Cache Module
//!
//! The cache side of the cache-aside pair: the [`CacheBackend`] port the
//! record service talks to, and [`MemoryCache`], an in-process implementation
//! with LRU eviction and optional TTL.

mod backend;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, MemoryCache};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
