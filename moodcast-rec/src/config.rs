//! Service configuration for moodcast-rec
//!
//! Resolved once at startup from the TOML file and environment, then shared
//! read-only through [`crate::AppState`].

use crate::orchestrator::RecommendationOrchestrator;
use crate::services::{GeminiClient, LastFmClient, OpenWeatherClient};
use anyhow::{Context, Result};
use moodcast_common::config::{resolve_api_key, ApiKeyKind, TomlConfig};
use std::sync::Arc;

/// Default tracing filter when neither RUST_LOG nor the TOML file sets one
pub const DEFAULT_LOG_FILTER: &str = "moodcast_rec=info,tower_http=info";

/// Resolved service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub openweather_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub lastfm_api_key: Option<String>,
}

impl ServiceConfig {
    /// Resolve API keys (ENV → TOML) and provider settings
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        Self {
            openweather_api_key: resolve_api_key(ApiKeyKind::OpenWeather, toml_config),
            gemini_api_key: resolve_api_key(ApiKeyKind::Gemini, toml_config),
            gemini_model: toml_config
                .gemini_model
                .as_ref()
                .map(|model| model.trim().to_string())
                .filter(|model| !model.is_empty()),
            lastfm_api_key: resolve_api_key(ApiKeyKind::LastFm, toml_config),
        }
    }

    /// Build the orchestrator backed by the real HTTP clients
    pub fn build_orchestrator(&self) -> Result<RecommendationOrchestrator> {
        let weather = OpenWeatherClient::new(self.openweather_api_key.clone())
            .context("Failed to create OpenWeatherMap client")?;
        let inference = GeminiClient::new(self.gemini_api_key.clone(), self.gemini_model.clone())
            .context("Failed to create Gemini client")?;
        let songs = LastFmClient::new(self.lastfm_api_key.clone())
            .context("Failed to create Last.fm client")?;

        Ok(RecommendationOrchestrator::new(
            Arc::new(weather),
            Arc::new(inference),
            Arc::new(songs),
        ))
    }
}
