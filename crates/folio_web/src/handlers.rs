use axum::{
    extract::{rejection::JsonRejection, RawQuery, State},
    response::{Html, IntoResponse},
    Json,
};
use folio_core::{ArticleListing, ListingQuery, ReadEvent};
use serde_json::json;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::page;
use crate::AppState;

pub async fn articles_page(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let query = ListingQuery::from_query_string(raw.as_deref().unwrap_or_default());
    let listing = load_listing(&state, &query).await;
    Html(page::articles_page(&query, &listing))
}

/// Serves a listing from the cache, fetching and caching it on a miss.
/// Degraded (empty fallback) listings are never cached.
async fn load_listing(state: &AppState, query: &ListingQuery) -> ArticleListing {
    let key = query.cache_key();

    match state.cache.get(&key).await {
        Ok(Some(raw)) => match serde_json::from_str::<ArticleListing>(&raw) {
            Ok(listing) => {
                tracing::debug!("Cache hit for {}", key);
                return listing;
            }
            Err(e) => tracing::warn!("Discarding unreadable cache entry {}: {}", key, e),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
    }

    let listing = match state.articles.fetch_listing(query).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!("Error fetching articles: {}", e);
            return ArticleListing::empty();
        }
    };

    match serde_json::to_string(&listing) {
        Ok(raw) => {
            if let Err(e) = state.cache.set(&key, &raw, Some(state.listing_ttl)).await {
                tracing::warn!("Cache write failed for {}: {}", key, e);
            }
        }
        Err(e) => tracing::warn!("Could not encode listing for cache: {}", e),
    }
    listing
}

pub async fn track_read(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReadEvent>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(event) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let slug = event.slug.trim();
    if slug.is_empty() {
        return Err(ApiError::BadRequest("Missing slug".to_string()));
    }

    let reads = state.cache.incr(&format!("reads:{}", slug)).await?;
    tracing::info!("Recorded {} read of {} (total {})", event.kind.as_str(), slug, reads);
    Ok(Json(json!({ "ok": true, "reads": reads })))
}

pub async fn health() -> &'static str {
    "ok"
}
