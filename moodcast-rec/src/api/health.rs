//! Health check endpoint
//!
//! Reports which providers back the pipeline and whether each one has the
//! API key it needs. Nothing here depends on earlier requests.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::services::gemini_client::DEFAULT_GEMINI_MODEL;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    /// Weather, mood inference and song providers, in pipeline order
    pub providers: Vec<ProviderHealth>,
    /// Model used for mood inference
    pub inference_model: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderHealth {
    pub role: &'static str,
    pub name: &'static str,
    /// API key resolved at startup
    pub configured: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    let config = &state.config;
    let [weather, inference, songs] = state.orchestrator.provider_names();

    // Song lookup degrades to the fallback song, so the service stays usable
    // without a Last.fm key
    let ready = config.openweather_api_key.is_some() && config.gemini_api_key.is_some();

    Json(HealthResponse {
        status: if ready { "ok" } else { "degraded" },
        service: "moodcast-rec",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        providers: vec![
            ProviderHealth {
                role: "weather",
                name: weather,
                configured: config.openweather_api_key.is_some(),
            },
            ProviderHealth {
                role: "mood_inference",
                name: inference,
                configured: config.gemini_api_key.is_some(),
            },
            ProviderHealth {
                role: "songs",
                name: songs,
                configured: config.lastfm_api_key.is_some(),
            },
        ],
        inference_model: config
            .gemini_model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
