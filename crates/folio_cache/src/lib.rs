use async_trait::async_trait;
use folio_core::{Error, KvCache, Result};
use std::fmt;
use std::sync::Arc;

pub mod backends;

pub use backends::*;

pub const CACHE_URL_ENV: &str = "FOLIO_CACHE_URL";
pub const CACHE_TOKEN_ENV: &str = "FOLIO_CACHE_TOKEN";

#[async_trait]
pub trait CacheBackend: KvCache {
    fn get_error_message() -> &'static str;
    async fn connect(config: &CacheConfig) -> Result<Self> where Self: Sized;
}

/// Where the cache lives and how to authenticate to it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl CacheConfig {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            token,
        }
    }

    pub fn from_env() -> Self {
        Self {
            url: std::env::var(CACHE_URL_ENV).ok().filter(|s| !s.is_empty()),
            token: std::env::var(CACHE_TOKEN_ENV).ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub(crate) fn require_url(&self, backend: &str) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| Error::Cache(format!("{} cache needs {} to be set", backend, CACHE_URL_ENV)))
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Cache backends selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Memory,
    Rest,
    Redis,
}

impl std::str::FromStr for CacheKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheKind::Memory),
            "rest" | "upstash" => Ok(CacheKind::Rest),
            "redis" => Ok(CacheKind::Redis),
            other => Err(Error::Cache(format!("Unknown cache backend: {}", other))),
        }
    }
}

async fn connect<T: CacheBackend + 'static>(config: &CacheConfig) -> Result<Arc<dyn KvCache>> {
    match T::connect(config).await {
        Ok(cache) => Ok(Arc::new(cache)),
        Err(e) => {
            tracing::error!("{}: {}", T::get_error_message(), e);
            Err(e)
        }
    }
}

pub async fn create_cache(kind: CacheKind, config: &CacheConfig) -> Result<Arc<dyn KvCache>> {
    match kind {
        CacheKind::Memory => connect::<MemoryCache>(config).await,
        CacheKind::Rest => connect::<RestCache>(config).await,
        #[cfg(feature = "redis")]
        CacheKind::Redis => connect::<RedisCache>(config).await,
        #[cfg(not(feature = "redis"))]
        CacheKind::Redis => Err(Error::Cache(
            "Redis support not compiled in, rebuild with the `redis` feature".to_string(),
        )),
    }
}

pub mod prelude {
    pub use super::{create_cache, CacheBackend, CacheConfig, CacheKind};
    pub use super::backends::*;
    pub use folio_core::KvCache;
}
