use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An article as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "isTrending", default)]
    pub is_trending: bool,
}

/// One page of articles plus the paging totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListing {
    #[serde(default)]
    pub items: Vec<ArticleRef>,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "totalPages", default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

impl ArticleListing {
    /// What a page shows when the listing endpoint can't be reached.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 1,
        }
    }
}

impl Default for ArticleListing {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single entry in a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageMarker {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PageMarker::Page(n) => s.serialize_u32(*n),
            PageMarker::Ellipsis => s.serialize_str(Self::ELLIPSIS),
        }
    }
}

impl PageMarker {
    pub const ELLIPSIS: &'static str = "...";

    pub fn page(&self) -> Option<u32> {
        match self {
            PageMarker::Page(n) => Some(*n),
            PageMarker::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{}", n),
            PageMarker::Ellipsis => f.write_str(Self::ELLIPSIS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Read,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Read => "read",
        }
    }
}

/// Payload of the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEvent {
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl ReadEvent {
    pub fn read(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            kind: EventKind::Read,
        }
    }
}
