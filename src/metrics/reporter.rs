//! Cache metrics reporter
//!
//! Turns keyspace hit/miss counters into a hit-ratio snapshot. Failures never
//! escape: they come back as a zeroed snapshot carrying the error text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

use crate::error::Result;
use crate::metrics::ServerInfo;

/// Anything that can report server statistics in `INFO stats` form.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn server_info(&self) -> Result<ServerInfo>;
}

// == Cache Metrics ==
/// Point-in-time hit/miss snapshot, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    /// hits / total_requests, 0 when no lookups happened
    pub hit_ratio: f64,
    /// hit_ratio as a percentage rounded to two decimals
    pub hit_ratio_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    pub fn from_counters(hits: u64, misses: u64) -> Self {
        let total_requests = hits.saturating_add(misses);
        let hit_ratio = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };

        Self {
            hits,
            misses,
            total_requests,
            hit_ratio,
            hit_ratio_percentage: round2(hit_ratio * 100.0),
            error: None,
        }
    }

    /// Zeroed snapshot carrying the failure description.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::from_counters(0, 0)
        }
    }
}

/// Two-decimal rounding with ties to even on the exact binary value, so
/// `3.125` becomes `3.12`.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

// == Metrics Reporter ==
#[derive(Clone)]
pub struct MetricsReporter {
    source: Arc<dyn StatsSource>,
}

impl MetricsReporter {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self { source }
    }

    /// Reads the store's keyspace counters and derives the hit ratio.
    pub async fn get_redis_cache_metrics(&self) -> CacheMetrics {
        match self.collect().await {
            Ok(metrics) => {
                info!(
                    "Redis Cache Metrics - Hits: {}, Misses: {}, Hit Ratio: {}%",
                    metrics.hits, metrics.misses, metrics.hit_ratio_percentage
                );
                metrics
            }
            Err(e) => {
                error!("Error retrieving Redis cache metrics: {}", e);
                CacheMetrics::failed(e.to_string())
            }
        }
    }

    async fn collect(&self) -> Result<CacheMetrics> {
        let info = self.source.server_info().await?;
        let hits = info.counter("keyspace_hits")?;
        let misses = info.counter("keyspace_misses")?;

        Ok(CacheMetrics::from_counters(hits, misses))
    }
}
