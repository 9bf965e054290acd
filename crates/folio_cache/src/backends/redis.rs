use async_trait::async_trait;
use folio_core::{Error, KvCache, Result};
use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client, RedisError};
use std::fmt;
use std::time::Duration;
use crate::{CacheBackend, CacheConfig};

fn cache_error(e: RedisError) -> Error {
    Error::Cache(e.to_string())
}

/// Cache backed by a Redis server speaking the native protocol.
///
/// The connection manager reconnects on its own; cloning it is cheap and
/// every command works on a clone.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    pub async fn open(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(cache_error)?;
        let manager = client.get_connection_manager().await.map_err(cache_error)?;
        Ok(Self { manager })
    }
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    fn get_error_message() -> &'static str {
        "Redis should be reachable at FOLIO_CACHE_URL"
    }

    async fn connect(config: &CacheConfig) -> Result<Self> {
        Self::open(config.require_url("Redis")?).await
    }
}

#[async_trait]
impl KvCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.manager.clone();
        con.get::<_, Option<String>>(key).await.map_err(cache_error)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut con = self.manager.clone();
        match ttl {
            Some(ttl) => con
                .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await
                .map_err(cache_error),
            None => con.set::<_, _, ()>(key, value).await.map_err(cache_error),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut con = self.manager.clone();
        con.incr::<_, _, i64>(key, 1).await.map_err(cache_error)
    }
}
