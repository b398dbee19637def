//! bookshelf library - book catalog service
//!
//! Re-exposes the legacy BooksService surface as a small HTTP API: four
//! record kinds (authors, categories, publishers, books) plus the derived
//! detailed-book view, served from a swappable record store.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

use crate::catalog::Catalog;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Composite resolver over the configured record store
    pub catalog: Catalog,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::authors::routes())
        .merge(api::categories::routes())
        .merge(api::publishers::routes())
        .merge(api::books::routes())
        .merge(api::health::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
