//! Language school storefront service.
//!
//! Browses the course and tutor catalog, prices bookings and manages orders
//! on top of the school REST API.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::api::SchoolApiClient;
use crate::cache::CatalogCache;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: SchoolApiClient,
    pub cache: CatalogCache,
}

impl AppState {
    pub fn new(config: Config, api: SchoolApiClient, cache: CatalogCache) -> Self {
        Self {
            config: Arc::new(config),
            api,
            cache,
        }
    }
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
