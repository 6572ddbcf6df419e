//! In-process cache backend
//!
//! Wraps a `CacheStore` in `Arc<RwLock<_>>` so handlers, the listing cache and
//! the cleanup task can share it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheStats, CacheStore};
use crate::error::Result;
use crate::metrics::{ServerInfo, StatsSource};

#[derive(Debug, Clone)]
pub struct LocalCache {
    store: Arc<RwLock<CacheStore>>,
}

impl LocalCache {
    /// Creates an empty cache bounded to `max_entries`.
    pub fn new(max_entries: usize) -> Self {
        Self::from_store(CacheStore::new(max_entries))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn time_to_live(&self, key: &str) -> Option<Duration> {
        self.store.read().await.time_to_live(key)
    }

    /// Purges expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }
}

#[async_trait]
impl CacheBackend for LocalCache {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        // Write lock: a read updates recency and counters.
        Ok(self.store.write().await.get(key))
    }

    async fn store(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.store
            .write()
            .await
            .set(key.to_string(), value, Some(ttl))
    }
}

#[async_trait]
impl StatsSource for LocalCache {
    async fn server_info(&self) -> Result<ServerInfo> {
        Ok(ServerInfo::parse(&self.stats().await.to_info_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_and_store() {
        let cache = LocalCache::new(10);

        assert_eq!(cache.fetch("all_properties").await.unwrap(), None);

        cache
            .store("all_properties", "[]".to_string(), Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(
            cache.fetch("all_properties").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(cache.time_to_live("all_properties").await.is_some());
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = LocalCache::new(10);
        let other = cache.clone();

        cache
            .store("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(other.fetch("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_server_info_reports_counters() {
        let cache = LocalCache::new(10);
        cache
            .store("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        cache.fetch("k").await.unwrap();
        cache.fetch("missing").await.unwrap();

        let info = cache.server_info().await.unwrap();
        assert_eq!(info.counter("keyspace_hits").unwrap(), 1);
        assert_eq!(info.counter("keyspace_misses").unwrap(), 1);
    }
}
