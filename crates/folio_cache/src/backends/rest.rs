use async_trait::async_trait;
use folio_core::{Error, KvCache, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use crate::{CacheBackend, CacheConfig};

/// Reply envelope of the REST cache: exactly one of the two is set.
#[derive(Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Value,
    error: Option<String>,
}

/// Cache reached over HTTP: every command is a JSON array of strings
/// POSTed to the base URL, e.g. `["SET", "k", "v", "EX", "60"]`.
pub struct RestCache {
    client: Arc<Client>,
    base_url: String,
    token: Option<String>,
}

impl RestCache {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;
        Ok(Self {
            client: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn command(&self, args: &[&str]) -> Result<Value> {
        tracing::debug!("cache command {}", args.first().unwrap_or(&""));
        let mut request = self.client.post(&self.base_url).json(&args);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let reply = response.json::<CommandReply>().await;

        match reply {
            Ok(CommandReply { error: Some(message), .. }) => Err(Error::Cache(message)),
            Ok(reply) if status.is_success() => Ok(reply.result),
            _ => Err(Error::Status {
                status: status.as_u16(),
                url: self.base_url.clone(),
            }),
        }
    }
}

impl fmt::Debug for RestCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestCache")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl CacheBackend for RestCache {
    fn get_error_message() -> &'static str {
        "REST cache should be reachable at FOLIO_CACHE_URL"
    }

    async fn connect(config: &CacheConfig) -> Result<Self> {
        let url = config.require_url("REST")?;
        Self::new(url, config.token.clone())
    }
}

#[async_trait]
impl KvCache for RestCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        match ttl {
            Some(ttl) => {
                let secs = ttl.as_secs().max(1).to_string();
                self.command(&["SET", key, value, "EX", secs.as_str()]).await?;
            }
            None => {
                self.command(&["SET", key, value]).await?;
            }
        }
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        match self.command(&["INCR", key]).await? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::Cache(format!("INCR {} returned {}", key, n))),
            other => Err(Error::Cache(format!("INCR {} returned {}", key, other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_sends_expiry_and_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/")
                    .header("authorization", "Bearer sekrit")
                    .json_body(json!(["SET", "test_key", "hello", "EX", "60"]));
                then.status(200).json_body(json!({ "result": "OK" }));
            })
            .await;

        let cache = RestCache::new(server.base_url(), Some("sekrit".to_string())).unwrap();
        cache
            .set("test_key", "hello", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_maps_null_to_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!(["GET", "absent"]));
                then.status(200).json_body(json!({ "result": null }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!(["GET", "present"]));
                then.status(200).json_body(json!({ "result": "value" }));
            })
            .await;

        let cache = RestCache::new(server.base_url(), None).unwrap();
        assert_eq!(cache.get("absent").await.unwrap(), None);
        assert_eq!(cache.get("present").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_incr_and_error_reply() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!(["INCR", "reads:gold"]));
                then.status(200).json_body(json!({ "result": 7 }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!(["INCR", "title"]));
                then.status(400)
                    .json_body(json!({ "error": "ERR value is not an integer or out of range" }));
            })
            .await;

        let cache = RestCache::new(server.base_url(), None).unwrap();
        assert_eq!(cache.incr("reads:gold").await.unwrap(), 7);

        let err = cache.incr("title").await.unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[tokio::test]
    async fn test_unexpected_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(502).body("bad gateway");
            })
            .await;

        let cache = RestCache::new(server.base_url(), None).unwrap();
        match cache.get("anything").await {
            Err(Error::Status { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(RestCache::new("not a url", None).is_err());
    }
}
