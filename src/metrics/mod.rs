//! Metrics Module
//!
//! Derives cache hit/miss metrics from key-value store server statistics.

mod info;
mod redis_info;
mod reporter;

pub use info::ServerInfo;
pub use redis_info::RedisInfoSource;
pub use reporter::{CacheMetrics, MetricsReporter, StatsSource};
