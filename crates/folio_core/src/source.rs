use async_trait::async_trait;
use crate::listing::ListingQuery;
use crate::types::{ArticleListing, ReadEvent};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch one page of articles matching the query
    async fn fetch_listing(&self, query: &ListingQuery) -> Result<ArticleListing>;

    /// Fetch a listing, falling back to an empty single page on any failure
    async fn list_or_default(&self, query: &ListingQuery) -> ArticleListing {
        match self.fetch_listing(query).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!("Error fetching articles: {}", e);
                ArticleListing::empty()
            }
        }
    }
}

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Deliver a single analytics event
    async fn track(&self, event: &ReadEvent) -> Result<()>;
}
