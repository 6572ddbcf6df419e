//! Property Cache - cached property listing service
//!
//! Serves a property listing through a read-through cache and a page cache,
//! and reports key-value store hit/miss metrics.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};
pub use listing::ListingCache;
pub use metrics::{CacheMetrics, MetricsReporter};
pub use tasks::spawn_cleanup_task;
