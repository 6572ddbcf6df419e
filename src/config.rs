//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::api::PAGE_TTL;
use crate::listing::LISTING_TTL;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Redis URL for the "default" connection; None selects the in-process cache
    pub redis_url: Option<String>,
    /// Redis connect timeout in seconds
    pub redis_timeout: u64,
    /// Maximum number of entries the in-process cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// TTL in seconds of the cached property collection
    pub listing_ttl: u64,
    /// TTL in seconds of cached listing pages
    pub page_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DATABASE_URL` - SQLite URL (default: sqlite:properties.db)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process cache)
    /// - `REDIS_TIMEOUT` - Redis connect timeout in seconds (default: 5)
    /// - `CACHE_MAX_ENTRIES` - In-process cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `LISTING_CACHE_TTL` - Property collection TTL in seconds (default: 3600)
    /// - `PAGE_CACHE_TTL` - Listing page TTL in seconds (default: 900)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            redis_timeout: parse_env("REDIS_TIMEOUT").unwrap_or(defaults.redis_timeout),
            max_entries: parse_env("CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_env("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            listing_ttl: parse_env("LISTING_CACHE_TTL").unwrap_or(defaults.listing_ttl),
            page_ttl: parse_env("PAGE_CACHE_TTL").unwrap_or(defaults.page_ttl),
        }
    }

    pub fn listing_ttl(&self) -> Duration {
        Duration::from_secs(self.listing_ttl)
    }

    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl)
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            database_url: "sqlite:properties.db".to_string(),
            database_max_connections: 5,
            redis_url: None,
            redis_timeout: 5,
            max_entries: 1000,
            cleanup_interval: 1,
            listing_ttl: LISTING_TTL.as_secs(),
            page_ttl: PAGE_TTL.as_secs(),
        }
    }
}

/// Reads and parses an environment variable, None if unset or unparsable.
fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
