//! Cache Module
//!
//! Cache backends shared by the listing cache and the page cache: an in-process
//! store with TTL expiration and LRU eviction, and a Redis-backed store.

mod backend;
mod entry;
mod local;
mod lru;
mod redis;
mod stats;
mod store;


// Re-export public types
pub use backend::CacheBackend;
pub use entry::CacheEntry;
pub use local::LocalCache;
pub use lru::LruTracker;
pub use self::redis::{RedisCache, RedisConnections, DEFAULT_ALIAS};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 32 * 1024 * 1024; // 32 MiB
