//! External service clients
//!
//! Each client implements one of the provider traits in [`crate::types`]:
//! - OpenWeatherMap → `WeatherProvider`
//! - Gemini → `MoodInferenceProvider`
//! - Last.fm → `SongProvider`

pub mod gemini_client;
pub mod lastfm_client;
pub mod openweather_client;

pub use gemini_client::GeminiClient;
pub use lastfm_client::{LastFmClient, LastFmError};
pub use openweather_client::OpenWeatherClient;
