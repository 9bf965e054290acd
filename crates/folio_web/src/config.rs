use folio_cache::{CacheConfig, CacheKind};
use folio_core::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;

pub const ADDR_ENV: &str = "FOLIO_ADDR";
pub const CACHE_KIND_ENV: &str = "FOLIO_CACHE";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub api_base: String,
    pub cache_kind: CacheKind,
    pub cache: CacheConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            addr: try_load(ADDR_ENV, DEFAULT_ADDR)?,
            api_base: load_or(folio_client::API_BASE_ENV, DEFAULT_API_BASE),
            cache_kind: try_load(CACHE_KIND_ENV, "memory")?,
            cache: CacheConfig::from_env(),
        })
    }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
}

fn try_load<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    load_or(key, default)
        .parse()
        .map_err(|e| Error::Validation(format!("Invalid {key} value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_to_default() {
        let addr: SocketAddr = try_load("FOLIO_TEST_UNSET_ADDR", DEFAULT_ADDR).unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_try_load_rejects_garbage_default() {
        let err = try_load::<SocketAddr>("FOLIO_TEST_UNSET_ADDR", "nowhere").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
