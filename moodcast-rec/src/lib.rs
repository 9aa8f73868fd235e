//! moodcast-rec library interface
//!
//! Exposes the router, state and pipeline for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod types;

pub use crate::config::ServiceConfig;
pub use crate::error::{ApiError, ApiResult};
pub use crate::orchestrator::{RecommendError, RecommendationOrchestrator, RecommendationResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
///
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation pipeline
    pub orchestrator: RecommendationOrchestrator,
    /// Resolved configuration (read-only)
    pub config: Arc<ServiceConfig>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: RecommendationOrchestrator, config: ServiceConfig) -> Self {
        Self {
            orchestrator,
            config: Arc::new(config),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::recommend_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
