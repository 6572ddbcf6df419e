//! Listing Cache
//!
//! Read-through cache of the full property collection under `all_properties`.
//!
//! There is no invalidation path: writes to the `properties` table stay
//! invisible until the entry expires. Concurrent misses are not coordinated,
//! each one queries the repository and rewrites the entry.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::CacheBackend;
use crate::db::PropertyRepository;
use crate::error::Result;
use crate::models::Property;

/// Cache key of the property collection.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// Default lifetime of the cached collection: one hour.
pub const LISTING_TTL: Duration = Duration::from_secs(3600);

#[derive(Clone)]
pub struct ListingCache {
    cache: Arc<dyn CacheBackend>,
    repository: Arc<dyn PropertyRepository>,
    ttl: Duration,
}

impl ListingCache {
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        repository: Arc<dyn PropertyRepository>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            ttl,
        }
    }

    /// Returns every property, from cache when present, else from the repository.
    ///
    /// Repository, cache and decoding errors all propagate.
    pub async fn get_all_properties(&self) -> Result<Vec<Property>> {
        if let Some(cached) = self.cache.fetch(ALL_PROPERTIES_KEY).await? {
            let properties: Vec<Property> = serde_json::from_str(&cached)?;
            info!("Properties fetched from cache");
            return Ok(properties);
        }

        let properties = self.repository.all().await?;
        self.cache
            .store(
                ALL_PROPERTIES_KEY,
                serde_json::to_string(&properties)?,
                self.ttl,
            )
            .await?;
        info!(
            count = properties.len(),
            "Properties fetched from database and cached"
        );

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LocalCache;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Repository over a mutable vector that counts reads.
    #[derive(Default)]
    struct CountingRepository {
        rows: Mutex<Vec<Property>>,
        reads: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PropertyRepository for CountingRepository {
        async fn all(&self) -> Result<Vec<Property>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.rows.lock().await.clone())
        }
    }

    /// LocalCache wrapper that counts writes.
    struct CountingCache {
        inner: LocalCache,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl CacheBackend for CountingCache {
        async fn fetch(&self, key: &str) -> Result<Option<String>> {
            self.inner.fetch(key).await
        }

        async fn store(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.store(key, value, ttl).await
        }
    }

    fn property(id: i64) -> Property {
        Property {
            id,
            title: format!("Listing {}", id),
            description: "Two bedrooms".to_string(),
            price: 1_000.0 * id as f64,
            location: "Nantes".to_string(),
            created_at: "2024-05-01T08:00:00Z".parse().unwrap(),
        }
    }

    fn setup(rows: Vec<Property>) -> (ListingCache, Arc<CountingRepository>, Arc<CountingCache>) {
        let repository = Arc::new(CountingRepository {
            rows: Mutex::new(rows),
            ..Default::default()
        });
        let cache = Arc::new(CountingCache {
            inner: LocalCache::new(100),
            writes: AtomicUsize::new(0),
        });
        let listing = ListingCache::new(cache.clone(), repository.clone(), LISTING_TTL);
        (listing, repository, cache)
    }

    #[tokio::test]
    async fn test_cold_cache_reads_once_and_writes_once() {
        let (listing, repository, cache) = setup(vec![property(1), property(2)]);

        let properties = listing.get_all_properties().await.unwrap();

        assert_eq!(properties, vec![property(1), property(2)]);
        assert_eq!(repository.reads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_warm_cache_skips_repository() {
        let (listing, repository, cache) = setup(vec![property(1)]);

        listing.get_all_properties().await.unwrap();
        let again = listing.get_all_properties().await.unwrap();

        assert_eq!(again, vec![property(1)]);
        assert_eq!(repository.reads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_entry_uses_listing_ttl() {
        let (listing, _, cache) = setup(vec![property(1)]);

        listing.get_all_properties().await.unwrap();

        let remaining = cache.inner.time_to_live(ALL_PROPERTIES_KEY).await.unwrap();
        assert!(remaining <= LISTING_TTL);
        assert!(remaining > LISTING_TTL - Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_cached_collection_goes_stale() {
        let (listing, repository, _) = setup(vec![property(1)]);

        listing.get_all_properties().await.unwrap();
        repository.rows.lock().await.push(property(2));

        assert_eq!(listing.get_all_properties().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let repository = Arc::new(CountingRepository {
            rows: Mutex::new(vec![property(1)]),
            ..Default::default()
        });
        let listing = ListingCache::new(
            Arc::new(LocalCache::new(10)),
            repository.clone(),
            Duration::from_millis(30),
        );

        listing.get_all_properties().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        listing.get_all_properties().await.unwrap();

        assert_eq!(repository.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_collection_is_cached() {
        let (listing, repository, _) = setup(Vec::new());

        assert!(listing.get_all_properties().await.unwrap().is_empty());
        assert!(listing.get_all_properties().await.unwrap().is_empty());
        assert_eq!(repository.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repository_failure_propagates_and_caches_nothing() {
        let repository = Arc::new(CountingRepository {
            fail: true,
            ..Default::default()
        });
        let cache = LocalCache::new(10);
        let listing = ListingCache::new(Arc::new(cache.clone()), repository, LISTING_TTL);

        let result = listing.get_all_properties().await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(cache.fetch(ALL_PROPERTIES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_entry_propagates() {
        let cache = LocalCache::new(10);
        cache
            .store(ALL_PROPERTIES_KEY, "{not json".to_string(), LISTING_TTL)
            .await
            .unwrap();
        let listing = ListingCache::new(
            Arc::new(cache),
            Arc::new(CountingRepository::default()),
            LISTING_TTL,
        );

        let result = listing.get_all_properties().await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
