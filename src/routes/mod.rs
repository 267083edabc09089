//! HTTP routes

pub mod catalog;
pub mod orders;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::cache::CacheStats;
use crate::AppState;

/// All application routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .merge(catalog::router())
        .merge(orders::router())
        .merge(crate::pricing::router())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
