//! Test Helper Utilities
//!
//! Mock providers that record how they were called, so tests can check both
//! the pipeline result and which steps actually ran.

#![allow(dead_code)]

use async_trait::async_trait;
use moodcast_common::api::Song;
use moodcast_rec::types::{
    fallback_song, InferenceError, MoodInferenceProvider, MoodPrediction, SongProvider,
    WeatherError, WeatherObservation, WeatherProvider,
};
use moodcast_rec::{AppState, RecommendationOrchestrator, ServiceConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Weather observation used by successful mocks
pub fn london_weather(city: &str) -> WeatherObservation {
    WeatherObservation {
        city: city.to_string(),
        main_condition: "Clouds".to_string(),
        description: "overcast clouds".to_string(),
        temp: 15.0,
        feels_like: 14.2,
        humidity: 77.0,
        wind_speed: 3.6,
    }
}

pub fn prediction(mood: &str, climate: &str, reason: &str) -> MoodPrediction {
    MoodPrediction {
        climate: climate.to_string(),
        mood: mood.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// Mock Providers
// ============================================================================

/// Weather provider that either succeeds with [`london_weather`] or reports
/// the city as not found
pub struct MockWeather {
    succeed: bool,
    calls: Mutex<Vec<String>>,
}

impl MockWeather {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            succeed: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            succeed: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    fn name(&self) -> &'static str {
        "mock-weather"
    }

    async fn current_weather(&self, city: &str) -> Result<WeatherObservation, WeatherError> {
        self.calls.lock().unwrap().push(city.to_string());
        if self.succeed {
            Ok(london_weather(city))
        } else {
            Err(WeatherError::CityNotFound(city.to_string()))
        }
    }
}

/// What [`MockInference`] answers with
pub enum InferenceOutcome {
    Prediction(MoodPrediction),
    /// Response decoded but lacked a key
    MissingField(&'static str),
    /// Service could not be reached
    Unreachable,
}

/// Inference provider returning a fixed outcome
pub struct MockInference {
    outcome: InferenceOutcome,
    calls: AtomicUsize,
}

impl MockInference {
    pub fn returning(prediction: MoodPrediction) -> Arc<Self> {
        Self::with_outcome(InferenceOutcome::Prediction(prediction))
    }

    pub fn with_outcome(outcome: InferenceOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoodInferenceProvider for MockInference {
    fn name(&self) -> &'static str {
        "mock-inference"
    }

    async fn predict_mood(
        &self,
        _weather: &WeatherObservation,
    ) -> Result<MoodPrediction, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            InferenceOutcome::Prediction(prediction) => Ok(prediction.clone()),
            InferenceOutcome::MissingField(field) => Err(InferenceError::MissingField(*field)),
            InferenceOutcome::Unreachable => {
                Err(InferenceError::NetworkError("connection refused".to_string()))
            }
        }
    }
}

/// Song provider returning a fixed song, or the fallback when `song` is None
pub struct MockSongs {
    song: Option<Song>,
    tags: Mutex<Vec<String>>,
}

impl MockSongs {
    pub fn returning(title: &str, artist: &str) -> Arc<Self> {
        Arc::new(Self {
            song: Some(Song::new(title, artist)),
            tags: Mutex::new(Vec::new()),
        })
    }

    /// Behaves like a provider whose lookup failed
    pub fn falling_back() -> Arc<Self> {
        Arc::new(Self {
            song: None,
            tags: Mutex::new(Vec::new()),
        })
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().unwrap().clone()
    }
}

#[async_trait]
impl SongProvider for MockSongs {
    fn name(&self) -> &'static str {
        "mock-songs"
    }

    async fn recommend_song(&self, mood_tag: &str) -> Song {
        self.tags.lock().unwrap().push(mood_tag.to_string());
        self.song.clone().unwrap_or_else(fallback_song)
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub fn orchestrator(
    weather: &Arc<MockWeather>,
    inference: &Arc<MockInference>,
    songs: &Arc<MockSongs>,
) -> RecommendationOrchestrator {
    RecommendationOrchestrator::new(weather.clone(), inference.clone(), songs.clone())
}

pub fn app_state(
    weather: &Arc<MockWeather>,
    inference: &Arc<MockInference>,
    songs: &Arc<MockSongs>,
) -> AppState {
    AppState::new(orchestrator(weather, inference, songs), ServiceConfig::default())
}
