//! Server statistics snapshot
//!
//! Wraps the `INFO` reply as parsed by the redis client and reads its
//! counters, rejecting values that are not numbers.

use redis::{FromRedisValue, InfoDict};

use crate::error::{AppError, Result};

#[derive(Debug)]
pub struct ServerInfo(InfoDict);

impl ServerInfo {
    /// Parses a raw `INFO` reply. Section headers and blank lines are skipped.
    pub fn parse(raw: &str) -> Self {
        Self(InfoDict::new(raw))
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.0.get(name)
    }

    /// Reads a numeric counter. Absent counters read as 0.
    pub fn counter(&self, name: &str) -> Result<u64> {
        match self.0.find(&name) {
            None => Ok(0),
            Some(value) => u64::from_redis_value(value).map_err(|_| {
                AppError::InvalidResponse(format!("{} is not a counter: {:?}", name, value))
            }),
        }
    }
}

impl From<InfoDict> for ServerInfo {
    fn from(info: InfoDict) -> Self {
        Self(info)
    }
}
