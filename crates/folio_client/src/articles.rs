use async_trait::async_trait;
use folio_core::{ArticleListing, ArticleSource, Error, ListingQuery, Result};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Client for the articles listing endpoint.
pub struct ArticlesClient {
    client: Arc<Client>,
    base_url: String,
}

impl ArticlesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Arc::new(Client::new()),
            base_url: crate::normalize_base(base_url)?,
        })
    }

    pub fn with_client(client: Arc<Client>, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: crate::normalize_base(base_url)?,
        })
    }

    /// `GET /api/articles` with `q`, `category`, `trending` and `page`.
    ///
    /// `q` is sent even when empty; `category` only when set.
    pub fn listing_url(&self, query: &ListingQuery) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/api/articles", self.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &query.q);
            if !query.category.is_empty() {
                pairs.append_pair("category", &query.category);
            }
            pairs.append_pair("trending", if query.trending { "true" } else { "false" });
            pairs.append_pair("page", &query.page.to_string());
        }
        Ok(url)
    }
}

impl fmt::Debug for ArticlesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticlesClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ArticleSource for ArticlesClient {
    async fn fetch_listing(&self, query: &ListingQuery) -> Result<ArticleListing> {
        let url = self.listing_url(query)?;
        tracing::debug!("Fetching articles from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let listing = response.json::<ArticleListing>().await?;
        tracing::debug!("Fetched {} articles ({} pages)", listing.items.len(), listing.total_pages);
        Ok(listing)
    }
}
