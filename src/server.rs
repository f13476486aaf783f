//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{load_catalog, InMemoryCatalog, MatchService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MatchService>,
    pub catalog: Arc<InMemoryCatalog>,
    pub asset_loader: Arc<AssetLoader>,
}

impl FromRef<AppState> for Arc<MatchService> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

impl FromRef<AppState> for Arc<AssetLoader> {
    fn from_ref(state: &AppState) -> Self {
        state.asset_loader.clone()
    }
}

/// Create application state from an asset loader.
///
/// Fails only when no paint at all could be loaded; partial catalog
/// errors are logged and the remaining paints are served.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));

    let loaded = load_catalog(&asset_loader);
    if !loaded.has_any_paints() {
        anyhow::bail!(
            "No paints could be loaded from {}: {}",
            asset_loader.catalog_source(),
            loaded.errors.join("; ")
        );
    }
    let catalog = Arc::new(InMemoryCatalog::new(loaded.into_snapshot()));
    let service = Arc::new(MatchService::new(catalog.clone(), config));

    Ok(AppState {
        service,
        catalog,
        asset_loader,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Catalog browsing
        .route("/api/brands", get(api::handle_brands))
        .route("/api/paints/search", get(api::handle_search))
        .route("/api/paints/:stable_id", get(api::handle_paint))
        .route("/api/catalog/reload", post(api::handle_reload))
        // Matching
        .route("/api/match/similar", post(api::handle_similar))
        .route("/api/match/recipes", post(api::handle_recipes))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
