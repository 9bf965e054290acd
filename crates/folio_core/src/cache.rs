use async_trait::async_trait;
use std::time::Duration;
use crate::Result;

pub const PING_KEY: &str = "test_key";
pub const PING_VALUE: &str = "hello";
pub const PING_TTL: Duration = Duration::from_secs(60);

#[async_trait]
pub trait KvCache: Send + Sync {
    /// Read a value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, optionally expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Atomically increment an integer counter, returning the new value
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Round-trip a short-lived test key
    async fn ping(&self) -> Result<String> {
        self.set(PING_KEY, PING_VALUE, Some(PING_TTL)).await?;
        self.get(PING_KEY)
            .await?
            .ok_or_else(|| crate::Error::Cache(format!("{} missing right after set", PING_KEY)))
    }
}
