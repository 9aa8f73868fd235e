//! Core types and provider traits for moodcast-rec
//!
//! The recommendation pipeline talks to three external collaborators:
//! - **WeatherProvider:** city → current weather observation
//! - **MoodInferenceProvider:** weather observation → mood prediction
//! - **SongProvider:** mood tag → song
//!
//! Weather and mood inference return explicit `Result`s so the orchestrator
//! can tell the failure causes apart by type. Song lookup cannot fail from the
//! caller's point of view: implementations substitute a fallback song.

use async_trait::async_trait;
use moodcast_common::api::Song;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Data Types
// ============================================================================

/// Current weather for one city
///
/// Units: temperatures in °C, humidity in %, wind speed in m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// City name as the user supplied it (for display)
    pub city: String,
    /// Primary condition tag (e.g. "Clouds", "Rain")
    pub main_condition: String,
    /// Human-readable description (e.g. "scattered clouds")
    pub description: String,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Weather-grounded mood prediction
///
/// All three fields are required. A response missing any of them never
/// becomes a `MoodPrediction`; see [`RawMoodPrediction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPrediction {
    /// General climate of the city (free text)
    pub climate: String,
    /// Predicted mood label, original case
    pub mood: String,
    /// Why this mood was predicted (free text)
    pub reason: String,
}

/// Prediction as decoded from an inference response, before validation
#[derive(Debug, Default, Deserialize)]
pub struct RawMoodPrediction {
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl TryFrom<RawMoodPrediction> for MoodPrediction {
    type Error = InferenceError;

    fn try_from(raw: RawMoodPrediction) -> Result<Self, Self::Error> {
        Ok(MoodPrediction {
            climate: raw.climate.ok_or(InferenceError::MissingField("climate"))?,
            mood: raw.mood.ok_or(InferenceError::MissingField("mood"))?,
            reason: raw.reason.ok_or(InferenceError::MissingField("reason"))?,
        })
    }
}

// ============================================================================
// Provider Errors
// ============================================================================

/// Weather lookup errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Mood inference errors
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Gemini API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// Response decoded but a required key was absent
    #[error("Response missing required field: {0}")]
    MissingField(&'static str),
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Current weather lookup
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn current_weather(&self, city: &str) -> Result<WeatherObservation, WeatherError>;
}

/// Mood prediction from weather
#[async_trait]
pub trait MoodInferenceProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn predict_mood(
        &self,
        weather: &WeatherObservation,
    ) -> Result<MoodPrediction, InferenceError>;
}

/// Song selection by mood tag
///
/// Implementations absorb their own failures and return a fallback song.
#[async_trait]
pub trait SongProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn recommend_song(&self, mood_tag: &str) -> Song;
}

/// Song returned whenever a lookup yields no usable candidate
pub fn fallback_song() -> Song {
    Song::new(FALLBACK_SONG_TITLE, FALLBACK_SONG_ARTIST)
}

pub const FALLBACK_SONG_TITLE: &str = "Bohemian Rhapsody";
pub const FALLBACK_SONG_ARTIST: &str = "Queen";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_raw_prediction_converts() {
        let raw: RawMoodPrediction = serde_json::from_str(
            r#"{"climate": "Temperate", "mood": "Calm", "reason": "A calm day."}"#,
        )
        .unwrap();

        let prediction = MoodPrediction::try_from(raw).unwrap();
        assert_eq!(prediction.climate, "Temperate");
        assert_eq!(prediction.mood, "Calm");
        assert_eq!(prediction.reason, "A calm day.");
    }

    #[test]
    fn test_partial_raw_prediction_rejected() {
        let raw: RawMoodPrediction =
            serde_json::from_str(r#"{"climate": "Temperate", "mood": "Calm"}"#).unwrap();

        let result = MoodPrediction::try_from(raw);
        assert!(matches!(result, Err(InferenceError::MissingField("reason"))));
    }

    #[test]
    fn test_empty_raw_prediction_reports_first_missing_field() {
        let result = MoodPrediction::try_from(RawMoodPrediction::default());
        assert!(matches!(result, Err(InferenceError::MissingField("climate"))));
    }

    #[test]
    fn test_fallback_song() {
        let song = fallback_song();
        assert_eq!(song.title, "Bohemian Rhapsody");
        assert_eq!(song.artist, "Queen");
    }
}
