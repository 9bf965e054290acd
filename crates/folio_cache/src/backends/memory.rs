use async_trait::async_trait;
use folio_core::{Error, KvCache, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use crate::{CacheBackend, CacheConfig};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Writes also sweep out whatever has expired, so the map stays bounded
    /// by the live keys.
    pub fn set(&mut self, key: &str, value: &str, ttl: Option<Duration>) {
        self.purge();
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    pub fn incr(&mut self, key: &str) -> Result<i64> {
        let now = Instant::now();
        let entry = self.entries.entry(key.to_string()).or_insert(Entry {
            value: "0".to_string(),
            expires_at: None,
        });
        if !entry.is_live(now) {
            entry.value = "0".to_string();
            entry.expires_at = None;
        }
        let current: i64 = entry
            .value
            .parse()
            .map_err(|_| Error::Cache(format!("value at {} is not an integer", key)))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::Cache(format!("increment would overflow value at {}", key)))?;
        entry.value = next.to_string();
        Ok(next)
    }

    /// Drop expired entries
    pub fn purge(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.is_live(now));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-local cache, mostly for development and tests.
#[derive(Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn purge(&self) {
        self.store.write().await.purge();
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    fn get_error_message() -> &'static str {
        "Memory cache should be available"
    }

    async fn connect(_config: &CacheConfig) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.store.read().await;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.set(key, value, ttl);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut store = self.store.write().await;
        store.incr(key)
    }
}
