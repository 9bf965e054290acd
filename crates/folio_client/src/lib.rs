pub mod analytics;
pub mod articles;

pub use analytics::AnalyticsClient;
pub use articles::ArticlesClient;

pub const API_BASE_ENV: &str = "FOLIO_API_BASE";

pub(crate) fn normalize_base(base_url: &str) -> folio_core::Result<String> {
    url::Url::parse(base_url)?;
    Ok(base_url.trim_end_matches('/').to_string())
}

pub mod prelude {
    pub use super::{AnalyticsClient, ArticlesClient};
    pub use folio_core::{AnalyticsSink, ArticleListing, ArticleSource, Error, ListingQuery, ReadEvent, Result};
}
