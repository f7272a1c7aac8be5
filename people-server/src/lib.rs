//! people-server library - HTTP CRUD service for person records

use std::sync::Arc;

use axum::Router;
use people_common::PersonRepository;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage backend; handlers only see the repository contract
    pub repo: Arc<dyn PersonRepository>,
}

impl AppState {
    /// Create new application state
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::people_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
