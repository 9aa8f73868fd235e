//! Recommendation pipeline
//!
//! One call to [`RecommendationOrchestrator::recommend`] runs, in order:
//! 1. Input validation (before any external call)
//! 2. Weather lookup for the city
//! 3. Mood inference from the weather
//! 4. Comparison of stated and predicted mood
//! 5. Song lookup for the **stated** mood
//! 6. Result assembly
//!
//! Steps 2 and 3 are fatal: the first failure is returned and nothing after it
//! runs. Song lookup never fails outward. No partial results are returned.

use crate::types::{MoodInferenceProvider, SongProvider, WeatherProvider};
use moodcast_common::api::{RecommendResponse, Song};
use moodcast_common::mood::MoodSimilarityGraph;
use moodcast_common::{MoodComparison, MoodLabel};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal pipeline failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    /// Mood or city missing/blank
    #[error("both fields are required")]
    Validation,

    /// Weather lookup failed or the city could not be resolved
    #[error("weather unavailable for {0}")]
    WeatherUnavailable(String),

    /// Mood inference failed or returned an incomplete prediction
    #[error("mood inference unavailable")]
    MoodInferenceUnavailable,
}

/// Outcome of one successful pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub analysis: String,
    /// Canonical lower-case predicted mood
    pub predicted_mood: MoodLabel,
    pub reason_for_prediction: String,
    pub song_recommendation: Song,
}

impl From<RecommendationResult> for RecommendResponse {
    fn from(result: RecommendationResult) -> Self {
        RecommendResponse {
            analysis: result.analysis,
            predicted_mood: result.predicted_mood.into_string(),
            reason_for_prediction: result.reason_for_prediction,
            song_recommendation: result.song_recommendation,
        }
    }
}

/// Sequences the weather, mood inference and song providers
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    weather: Arc<dyn WeatherProvider>,
    inference: Arc<dyn MoodInferenceProvider>,
    songs: Arc<dyn SongProvider>,
    similarity: &'static MoodSimilarityGraph,
}

impl RecommendationOrchestrator {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        inference: Arc<dyn MoodInferenceProvider>,
        songs: Arc<dyn SongProvider>,
    ) -> Self {
        Self {
            weather,
            inference,
            songs,
            similarity: MoodSimilarityGraph::standard(),
        }
    }

    /// Provider names in pipeline order: weather, inference, songs
    pub fn provider_names(&self) -> [&'static str; 3] {
        [self.weather.name(), self.inference.name(), self.songs.name()]
    }

    /// Run the full pipeline for one request
    pub async fn recommend(
        &self,
        mood: &str,
        city: &str,
    ) -> Result<RecommendationResult, RecommendError> {
        let display_city = city;
        let city = city.trim();
        if city.is_empty() {
            return Err(RecommendError::Validation);
        }
        let stated = MoodLabel::new(mood).map_err(|_| RecommendError::Validation)?;

        let weather = self.weather.current_weather(city).await.map_err(|e| {
            warn!(provider = self.weather.name(), city = %city, error = %e, "Weather lookup failed");
            RecommendError::WeatherUnavailable(city.to_string())
        })?;

        let prediction = self.inference.predict_mood(&weather).await.map_err(|e| {
            warn!(provider = self.inference.name(), city = %city, error = %e, "Mood inference failed");
            RecommendError::MoodInferenceUnavailable
        })?;

        let predicted = MoodLabel::new(&prediction.mood).map_err(|_| {
            warn!(provider = self.inference.name(), "Mood inference returned a blank mood");
            RecommendError::MoodInferenceUnavailable
        })?;

        let comparison = MoodComparison::classify(self.similarity, &stated, &predicted);
        let analysis = compose_analysis(
            comparison,
            display_city,
            &prediction.climate,
            &stated,
            &predicted,
        );

        let song = self.songs.recommend_song(stated.as_str()).await;

        info!(
            city = %city,
            stated = %stated,
            predicted = %predicted,
            comparison = ?comparison,
            title = %song.title,
            "Recommendation complete"
        );

        Ok(RecommendationResult {
            analysis,
            predicted_mood: predicted,
            reason_for_prediction: prediction.reason,
            song_recommendation: song,
        })
    }
}

/// Analysis narrative for a comparison outcome
///
/// `city` is inserted exactly as the user supplied it.
pub fn compose_analysis(
    comparison: MoodComparison,
    city: &str,
    climate: &str,
    stated: &MoodLabel,
    predicted: &MoodLabel,
) -> String {
    match comparison {
        MoodComparison::Match => format!(
            "We get it! The weather in {city} ({climate}) totally matches your '{stated}' mood."
        ),
        MoodComparison::Similar => format!(
            "The weather in {city} feels very '{predicted}', which is close to your '{stated}' mood."
        ),
        MoodComparison::Mismatch => format!(
            "It seems the weather in {city} feels '{predicted}', but you're feeling '{stated}'. Let's find a song for your mood!"
        ),
    }
}
