//! OpenWeatherMap API client
//!
//! Two requests per lookup:
//! 1. Geocoding: city name → coordinates (`/geo/1.0/direct`)
//! 2. Current weather at those coordinates (`/data/2.5/weather`, metric units)

use crate::types::{WeatherError, WeatherObservation, WeatherProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org";
const USER_AGENT: &str = "MoodCast/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Geocoding result entry
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Current weather response (subset)
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    /// Condition group, e.g. "Clouds"
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// OpenWeatherMap API client
pub struct OpenWeatherClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a client against the public API
    ///
    /// A `None` key is accepted; every lookup then fails with
    /// `WeatherError::MissingApiKey`.
    pub fn new(api_key: Option<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    /// Create a client against a different host (used by tests)
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WeatherError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to coordinates
    pub async fn geocode(&self, city: &str) -> Result<GeoLocation, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/geo/1.0/direct", self.base_url);

        tracing::debug!(city = %city, "Geocoding city");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| WeatherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError(status.as_u16(), error_text));
        }

        let locations: Vec<GeoLocation> = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        locations
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    /// Fetch current weather at coordinates
    pub async fn current_at(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentWeatherResponse, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/data/2.5/weather", self.base_url);
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", api_key),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

/// Build an observation from a current weather response
///
/// The first condition entry is the primary one. An empty list is malformed.
pub fn observation_from_response(
    city: &str,
    response: CurrentWeatherResponse,
) -> Result<WeatherObservation, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::ParseError("weather conditions list is empty".to_string()))?;

    Ok(WeatherObservation {
        city: city.to_string(),
        main_condition: condition.main,
        description: condition.description,
        temp: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    async fn current_weather(&self, city: &str) -> Result<WeatherObservation, WeatherError> {
        let location = self.geocode(city).await?;
        let current = self.current_at(&location).await?;
        let observation = observation_from_response(city, current)?;

        tracing::info!(
            city = %city,
            condition = %observation.main_condition,
            temp = observation.temp,
            "Retrieved current weather"
        );

        Ok(observation)
    }
}
