//! Redis cache backend
//!
//! Connection factory keyed by logical alias, and a `CacheBackend` over
//! `GET` / `SET EX`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, MultiplexedConnection};
use redis::AsyncCommands;

use crate::cache::CacheBackend;
use crate::error::{AppError, Result};

/// Alias of the connection configured by `REDIS_URL`.
pub const DEFAULT_ALIAS: &str = "default";

// == Connection Factory ==
/// Redis clients registered under logical aliases.
#[derive(Debug, Clone)]
pub struct RedisConnections {
    clients: HashMap<String, redis::Client>,
    timeout: Duration,
}

impl RedisConnections {
    /// Creates an empty factory; connection attempts give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            clients: HashMap::new(),
            timeout,
        }
    }

    /// Registers `url` under `alias`. The URL is validated, nothing is dialed yet.
    pub fn with_connection(mut self, alias: &str, url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        self.clients.insert(alias.to_string(), client);
        Ok(self)
    }

    fn client(&self, alias: &str) -> Result<&redis::Client> {
        self.clients
            .get(alias)
            .ok_or_else(|| AppError::UnknownConnection(alias.to_string()))
    }

    // == Get Connection ==
    /// Opens a fresh connection to the server registered under `alias`.
    pub async fn get_connection(&self, alias: &str) -> Result<MultiplexedConnection> {
        let client = self.client(alias)?;

        tokio::time::timeout(self.timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| AppError::Timeout(format!("connecting to Redis '{}'", alias)))?
            .map_err(AppError::from)
    }

    /// Opens an auto-reconnecting connection for long-lived use.
    pub async fn connection_manager(&self, alias: &str) -> Result<ConnectionManager> {
        let client = self.client(alias)?.clone();

        tokio::time::timeout(self.timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| AppError::Timeout(format!("connecting to Redis '{}'", alias)))?
            .map_err(AppError::from)
    }
}

// == Redis Cache ==
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(connections: &RedisConnections, alias: &str) -> Result<Self> {
        Ok(Self {
            conn: connections.connection_manager(alias).await?,
        })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn store(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        // EX takes whole seconds and rejects 0
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = RedisConnections::new(Duration::from_secs(1))
            .with_connection(DEFAULT_ALIAS, "not a redis url");
        assert!(matches!(result, Err(AppError::Redis(_))));
    }

    #[tokio::test]
    async fn test_unknown_alias() {
        let connections = RedisConnections::new(Duration::from_secs(1));

        let result = connections.get_connection("sessions").await;
        assert!(matches!(result, Err(AppError::UnknownConnection(alias)) if alias == "sessions"));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        let connections = RedisConnections::new(Duration::from_secs(2))
            .with_connection(DEFAULT_ALIAS, "redis://127.0.0.1:1/")
            .unwrap();

        assert!(connections.get_connection(DEFAULT_ALIAS).await.is_err());
    }
}
