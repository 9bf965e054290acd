pub mod cache;
pub mod error;
pub mod html;
pub mod listing;
pub mod logging;
pub mod pagination;
pub mod source;
pub mod types;

pub use cache::KvCache;
pub use error::{Error, Result};
pub use listing::{ListingQuery, QueryParams, Tab};
pub use pagination::page_numbers;
pub use source::{AnalyticsSink, ArticleSource};
pub use types::{ArticleListing, ArticleRef, EventKind, PageMarker, ReadEvent};
