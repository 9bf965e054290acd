use async_trait::async_trait;
use folio_core::{AnalyticsSink, Error, ReadEvent, Result};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;

/// Posts read events to the analytics endpoint. The response body is ignored.
pub struct AnalyticsClient {
    client: Arc<Client>,
    endpoint: String,
}

impl AnalyticsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Arc::new(Client::new()), base_url)
    }

    pub fn with_client(client: Arc<Client>, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: format!("{}/api/analytics", crate::normalize_base(base_url)?),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for AnalyticsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsClient")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl AnalyticsSink for AnalyticsClient {
    async fn track(&self, event: &ReadEvent) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(event).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url: self.endpoint.clone(),
            });
        }
        tracing::debug!("Tracked {} for {}", event.kind.as_str(), event.slug);
        Ok(())
    }
}
