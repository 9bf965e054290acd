use std::sync::Arc;
use std::time::Duration;
use folio_core::{ArticleSource, KvCache};

/// How long a fetched listing is served from the cache.
pub const LISTING_TTL: Duration = Duration::from_secs(60);

pub struct AppState {
    pub articles: Arc<dyn ArticleSource>,
    pub cache: Arc<dyn KvCache>,
    pub listing_ttl: Duration,
}

impl AppState {
    pub fn new(articles: Arc<dyn ArticleSource>, cache: Arc<dyn KvCache>) -> Self {
        Self {
            articles,
            cache,
            listing_ttl: LISTING_TTL,
        }
    }
}
