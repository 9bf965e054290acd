use axum::{
    routing::{get, post},
    Router,
};
use folio_client::ArticlesClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use config::Config;
pub use state::{AppState, LISTING_TTL};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/articles", get(handlers::articles_page))
        .route("/api/analytics", post(handlers::track_read))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Connects the configured collaborators and serves until the process stops.
pub async fn serve(config: Config) -> folio_core::Result<()> {
    let articles = ArticlesClient::new(&config.api_base)?;
    let cache = folio_cache::create_cache(config.cache_kind, &config.cache).await?;
    let app = create_app(AppState::new(Arc::new(articles), cache));

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState, Config};
    pub use folio_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use folio_cache::MemoryCache;
    use folio_core::{ArticleListing, ArticleRef, ArticleSource, Error, KvCache, ListingQuery};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct FakeSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl ArticleSource for FakeSource {
        async fn fetch_listing(&self, query: &ListingQuery) -> folio_core::Result<ArticleListing> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Status {
                    status: 503,
                    url: "http://api.test/api/articles".to_string(),
                });
            }
            Ok(ArticleListing {
                items: vec![ArticleRef {
                    id: "1".to_string(),
                    title: format!("Result for '{}' in '{}'", query.q, query.category),
                    slug: "rates-outlook".to_string(),
                    excerpt: String::new(),
                    published_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                    category: "Market Analysis".to_string(),
                    is_trending: false,
                }],
                total: 25,
                total_pages: 3,
            })
        }
    }

    fn app(source: Arc<FakeSource>, cache: Arc<MemoryCache>) -> Router {
        create_app(AppState::new(source, cache))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn analytics_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analytics")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(FakeSource::new(false), Arc::new(MemoryCache::new()))
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_listing_is_rendered_and_cached() {
        let source = FakeSource::new(false);
        let cache = Arc::new(MemoryCache::new());

        let first = app(source.clone(), cache.clone())
            .oneshot(get_request("/articles?q=rates&page=2"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let html = body_string(first).await;
        assert!(html.contains("Result for &#39;rates&#39; in &#39;All&#39;"));
        assert!(html.contains("aria-label=\"Pagination\""));

        let second = app(source.clone(), cache.clone())
            .oneshot(get_request("/articles?q=rates&page=2"))
            .await
            .unwrap();
        assert_eq!(body_string(second).await, html);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let key = ListingQuery::from_query_string("q=rates&page=2").cache_key();
        assert!(cache.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_distinct_queries_do_not_share_cache_entries() {
        let source = FakeSource::new(false);
        let cache = Arc::new(MemoryCache::new());

        let first = app(source.clone(), cache.clone())
            .oneshot(get_request("/articles?q=a%3Ab&category=c"))
            .await
            .unwrap();
        assert!(body_string(first).await.contains("Result for &#39;a:b&#39; in &#39;c&#39;"));

        let second = app(source.clone(), cache.clone())
            .oneshot(get_request("/articles?q=a&category=b%3Ac"))
            .await
            .unwrap();
        let html = body_string(second).await;
        assert!(html.contains("Result for &#39;a&#39; in &#39;b:c&#39;"));
        assert!(!html.contains("Result for &#39;a:b&#39;"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_and_is_not_cached() {
        let source = FakeSource::new(true);
        let cache = Arc::new(MemoryCache::new());

        let response = app(source.clone(), cache.clone())
            .oneshot(get_request("/articles"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(page::EMPTY_STATE));
        assert!(!html.contains("aria-label=\"Pagination\""));

        let key = ListingQuery::default().cache_key();
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_track_read_increments_counter() {
        let cache = Arc::new(MemoryCache::new());
        let router = app(FakeSource::new(false), cache.clone());

        for expected in 1..=2 {
            let response = router
                .clone()
                .oneshot(analytics_request(r#"{"slug":"rates-outlook","type":"read"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body, serde_json::json!({ "ok": true, "reads": expected }));
        }
        assert_eq!(cache.get("reads:rates-outlook").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_track_read_malformed_body_gets_json_error() {
        let response = app(FakeSource::new(false), Arc::new(MemoryCache::new()))
            .oneshot(analytics_request(r#"{"slug": "#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn test_track_read_rejects_empty_slug() {
        let response = app(FakeSource::new(false), Arc::new(MemoryCache::new()))
            .oneshot(analytics_request(r#"{"slug":"  ","type":"read"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "Missing slug");
        assert_eq!(body["status"], 400);
    }
}
