//! Error types for moodcast-rec
//!
//! Maps pipeline failures onto HTTP status codes:
//! - validation → 400
//! - weather / mood inference → 500, each with its own code and message

use crate::orchestrator::RecommendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moodcast_common::api::{ErrorBody, ErrorResponse};
use thiserror::Error;

/// Message returned for missing or blank request fields
pub const VALIDATION_MESSAGE: &str = "Both 'city' and 'mood' fields are required.";

/// Message returned when mood inference fails
pub const INFERENCE_MESSAGE: &str = "Failed to get analysis from Gemini API.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Weather lookup failed for the named city (500)
    #[error("Weather unavailable for {0}")]
    WeatherUnavailable(String),

    /// Mood inference failed (500)
    #[error("Mood inference unavailable")]
    MoodInferenceUnavailable,
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Validation => ApiError::BadRequest(VALIDATION_MESSAGE.to_string()),
            RecommendError::WeatherUnavailable(city) => ApiError::WeatherUnavailable(city),
            RecommendError::MoodInferenceUnavailable => ApiError::MoodInferenceUnavailable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::WeatherUnavailable(city) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "WEATHER_UNAVAILABLE",
                format!(
                    "Could not fetch weather data for {}. Please check the city name or API keys. \
                     If the error persists, try again later.",
                    city
                ),
            ),
            ApiError::MoodInferenceUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MOOD_INFERENCE_UNAVAILABLE",
                INFERENCE_MESSAGE.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: error_code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
