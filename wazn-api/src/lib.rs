//! wazn-api library: HTTP service for the meter matcher
//!
//! Serves line analysis, the rule heuristic, the weight list and a small
//! embedded UI over one read-only corpus loaded at startup.

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wazn_common::config::MatchingConfig;
use wazn_common::Corpus;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded once, never mutated
    pub corpus: Arc<Corpus>,
    /// Thresholds and metric weights for every analysis call
    pub matching: Arc<MatchingConfig>,
}

impl AppState {
    pub fn new(corpus: Arc<Corpus>, matching: MatchingConfig) -> Self {
        Self {
            corpus,
            matching: Arc::new(matching),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/analyze", post(api::analyze))
        .route("/api/analyze/rules", post(api::analyze_rules))
        .route("/api/weights", get(api::list_weights))
        .route("/api/buildinfo", get(api::get_build_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
