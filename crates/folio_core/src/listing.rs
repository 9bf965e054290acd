//! The articles listing page: its query string, category tabs and links.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const ARTICLES_PATH: &str = "/articles";
pub const ALL: &str = "All";
pub const TRENDING: &str = "Trending";

pub const CATEGORIES: [&str; 8] = [
    "Market Analysis & Trends",
    "IPO & Listing Insights",
    "Sector Deep Dives",
    "Growth Companies",
    "Personal Finance & Wealth Creation",
    "Commodities & Alternative Assets",
    "Geopolitics & Macroeconomics",
    "Financial Literacy & Basics",
];

/// An ordered, mutable query string.
///
/// `set` replaces the first occurrence of a key in place (dropping any
/// repeats) or appends it; `delete` removes every occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(i) => {
                self.pairs[i].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `path` with this query appended, or just `path` when empty.
    pub fn href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

/// A tab above the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    All,
    Category(&'static str),
    Trending,
}

impl Tab {
    pub fn label(&self) -> &str {
        match self {
            Tab::All => ALL,
            Tab::Category(name) => name,
            Tab::Trending => TRENDING,
        }
    }
}

pub fn tabs() -> Vec<Tab> {
    std::iter::once(Tab::All)
        .chain(CATEGORIES.into_iter().map(Tab::Category))
        .chain(std::iter::once(Tab::Trending))
        .collect()
}

/// What the listing page was asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub q: String,
    pub category: String,
    pub trending: bool,
    pub page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            category: ALL.to_string(),
            trending: false,
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn from_params(
        q: Option<&str>,
        category: Option<&str>,
        trending: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        Self {
            q: q.unwrap_or_default().to_string(),
            category: category.filter(|c| !c.is_empty()).unwrap_or(ALL).to_string(),
            trending: trending == Some("true"),
            page: parse_page(page),
        }
    }

    pub fn from_query_string(query: &str) -> Self {
        let params = QueryParams::parse(query);
        Self::from_params(
            params.get("q"),
            params.get("category"),
            params.get("trending"),
            params.get("page"),
        )
    }

    fn is_all(&self) -> bool {
        self.category.is_empty() || self.category == ALL
    }

    pub fn is_active(&self, tab: &Tab) -> bool {
        match tab {
            Tab::Trending => self.trending,
            Tab::All => !self.trending && self.is_all(),
            Tab::Category(name) => !self.trending && self.category == *name,
        }
    }

    /// Link for a category tab; switching tabs always starts on page 1.
    pub fn tab_href(&self, tab: &Tab) -> String {
        let mut qs = QueryParams::new();
        if !self.q.is_empty() {
            qs.set("q", self.q.as_str());
        }
        match tab {
            Tab::Trending => qs.set("trending", "true"),
            Tab::Category(name) => qs.set("category", *name),
            Tab::All => {}
        }
        qs.set("page", "1");
        qs.href(ARTICLES_PATH)
    }

    /// Link to another page of the current selection.
    pub fn page_href(&self, page: u32) -> String {
        let mut qs = QueryParams::new();
        if !self.q.is_empty() {
            qs.set("q", self.q.as_str());
        }
        if !self.is_all() {
            qs.set("category", self.category.as_str());
        }
        if self.trending {
            qs.set("trending", "true");
        }
        qs.set("page", page.to_string());
        qs.href(ARTICLES_PATH)
    }

    /// Stable key for caching the listing this query produces.
    ///
    /// Each field is form-encoded, so no two distinct queries share a key.
    pub fn cache_key(&self) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.q)
            .append_pair("category", &self.category)
            .append_pair("trending", if self.trending { "true" } else { "false" })
            .append_pair("page", &self.page.to_string())
            .finish();
        format!("articles:{}", encoded)
    }
}

/// Parses a `page` parameter the lenient way browsers do: leading digits
/// win, anything unparseable or below 1 becomes page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else { return 1 };
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 1;
    }
    digits[..end].parse::<u32>().unwrap_or(u32::MAX).max(1)
}
