//! API Handlers
//!
//! HTTP request handlers and the state they share.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};

use crate::cache::{CacheBackend, LocalCache};
use crate::config::Config;
use crate::db::PropertyRepository;
use crate::error::Result;
use crate::listing::ListingCache;
use crate::metrics::{CacheMetrics, MetricsReporter, StatsSource};
use crate::models::{HealthResponse, PropertyListResponse};

/// Application state shared across all handlers.
///
/// The cache backend is injected; the listing cache and the page cache share it.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn CacheBackend>,
    pub listing: ListingCache,
    pub metrics: MetricsReporter,
    /// Lifetime of cached listing pages
    pub page_ttl: Duration,
}

impl AppState {
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        repository: Arc<dyn PropertyRepository>,
        stats: Arc<dyn StatsSource>,
        config: &Config,
    ) -> Self {
        Self {
            listing: ListingCache::new(cache.clone(), repository, config.listing_ttl()),
            metrics: MetricsReporter::new(stats),
            page_ttl: config.page_ttl(),
            cache,
        }
    }

    /// State backed by an in-process cache, which also feeds the metrics.
    ///
    /// The returned `LocalCache` handle is what the cleanup task sweeps.
    pub fn with_local_cache(
        repository: Arc<dyn PropertyRepository>,
        config: &Config,
    ) -> (Self, LocalCache) {
        let local = LocalCache::new(config.max_entries);
        let state = Self::new(
            Arc::new(local.clone()),
            repository,
            Arc::new(local.clone()),
            config,
        );
        (state, local)
    }
}

/// Handler for GET /properties/
///
/// Lists every property as `{"data": [...]}`. Served behind the page cache.
pub async fn property_list(State(state): State<AppState>) -> Result<Json<PropertyListResponse>> {
    let properties = state.listing.get_all_properties().await?;
    Ok(Json(PropertyListResponse::from_properties(properties)))
}

/// Handler for GET /cache/metrics
///
/// Always answers 200; failures show up in the snapshot's `error` field.
pub async fn cache_metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.metrics.get_redis_cache_metrics().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
