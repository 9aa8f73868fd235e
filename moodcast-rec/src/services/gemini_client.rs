//! Google Gemini API client
//!
//! Asks the model to describe the city's climate, read the current weather in
//! that context, and pick the most likely public mood. The model is told to
//! answer with a bare JSON object `{"climate", "mood", "reason"}`; the request
//! also sets `responseMimeType` to `application/json`.
//!
//! Parsing is strict: any missing key makes the whole response unusable.

use crate::types::{
    InferenceError, MoodInferenceProvider, MoodPrediction, RawMoodPrediction, WeatherObservation,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Moods the model may choose from
pub const CANDIDATE_MOODS: &[&str] = &[
    "Happy",
    "Energetic",
    "Cozy",
    "Gloomy",
    "Calm",
    "Irritable",
    "Relieved",
    "Sad",
    "Melancholy",
    "Romantic",
];

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// generateContent response body (subset)
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against the public API
    ///
    /// A `None` key is accepted; every prediction then fails with
    /// `InferenceError::MissingApiKey`.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self, InferenceError> {
        Self::with_base_url(api_key, model, GEMINI_BASE_URL)
    }

    /// Create a client against a different host (used by tests)
    pub fn with_base_url(
        api_key: Option<String>,
        model: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Build the mood analysis prompt for one observation
pub fn build_prompt(weather: &WeatherObservation) -> String {
    format!(
        "Analyze the following weather data.\n\
         \n\
         Your task:\n\
         1. Based on the city name, determine its general climate.\n\
         2. Analyze the current weather in the context of that climate.\n\
         3. Determine the single most likely public mood from this list: {moods}.\n\
         4. Provide a brief reason for your mood choice.\n\
         \n\
         Respond with a single, valid JSON object with three keys: \"climate\", \"mood\", and \"reason\". \
         Do not include any other text or markdown formatting.\n\
         \n\
         Weather Data:\n\
         - City: {city}\n\
         - Current Condition: {condition} ({description})\n\
         - Current Temperature: {temp:.1}°C (feels like {feels_like:.1}°C)\n\
         - Current Humidity: {humidity}%\n",
        moods = CANDIDATE_MOODS.join(", "),
        city = weather.city,
        condition = weather.main_condition,
        description = weather.description,
        temp = weather.temp,
        feels_like = weather.feels_like,
        humidity = weather.humidity,
    )
}

/// Strip an optional markdown code fence around a JSON payload
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json") up to the first newline
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
        if let Some(end) = body.rfind("```") {
            return body[..end].trim();
        }
    }

    trimmed
}

/// Turn a generateContent response into a prediction
///
/// The prediction JSON lives in `candidates[0].content.parts[0].text`.
pub fn parse_prediction(
    response: GenerateContentResponse,
) -> Result<MoodPrediction, InferenceError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            InferenceError::ParseError("response has no candidate text".to_string())
        })?;

    let raw: RawMoodPrediction = serde_json::from_str(extract_json(&text))
        .map_err(|e| InferenceError::ParseError(format!("invalid prediction JSON: {}", e)))?;

    MoodPrediction::try_from(raw)
}

#[async_trait]
impl MoodInferenceProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn predict_mood(
        &self,
        weather: &WeatherObservation,
    ) -> Result<MoodPrediction, InferenceError> {
        let api_key = self.api_key.as_deref().ok_or(InferenceError::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(weather)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        tracing::debug!(model = %self.model, city = %weather.city, "Requesting mood analysis");

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InferenceError::ApiError(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::ParseError(e.to_string()))?;

        let prediction = parse_prediction(body)?;

        tracing::info!(
            city = %weather.city,
            mood = %prediction.mood,
            climate = %prediction.climate,
            "Mood analysis received"
        );

        Ok(prediction)
    }
}
