//! Cache Backend Trait
//!
//! The two capabilities every cache layer relies on.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A key-value cache holding serialized payloads with a per-entry TTL.
///
/// Implementations are shared across requests behind an `Arc` and never
/// coordinate concurrent writers: the last `store` for a key wins.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live payload under `key`, None on a miss.
    async fn fetch(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, expiring `ttl` after the write.
    async fn store(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
