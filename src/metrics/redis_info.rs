//! Redis statistics source
//!
//! Issues `INFO stats` over a fresh connection from the connection factory.

use async_trait::async_trait;
use redis::InfoDict;

use crate::cache::RedisConnections;
use crate::error::Result;
use crate::metrics::{ServerInfo, StatsSource};

#[derive(Debug, Clone)]
pub struct RedisInfoSource {
    connections: RedisConnections,
    alias: String,
}

impl RedisInfoSource {
    pub fn new(connections: RedisConnections, alias: impl Into<String>) -> Self {
        Self {
            connections,
            alias: alias.into(),
        }
    }
}

#[async_trait]
impl StatsSource for RedisInfoSource {
    async fn server_info(&self) -> Result<ServerInfo> {
        let mut conn = self.connections.get_connection(&self.alias).await?;
        let info: InfoDict = redis::cmd("INFO").arg("stats").query_async(&mut conn).await?;
        Ok(ServerInfo::from(info))
    }
}
