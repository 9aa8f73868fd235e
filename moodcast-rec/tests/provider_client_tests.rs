//! Provider client integration tests
//!
//! Runs the real reqwest clients against a local axum stub that mimics the
//! OpenWeatherMap, Gemini and Last.fm endpoints.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use moodcast_rec::services::{GeminiClient, LastFmClient, OpenWeatherClient};
use moodcast_rec::types::{
    fallback_song, InferenceError, MoodInferenceProvider, SongProvider, WeatherError,
    WeatherObservation, WeatherProvider,
};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Serve `router` on an ephemeral port, returning its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// ============================================================================
// OpenWeatherMap
// ============================================================================

async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("limit").map(String::as_str), Some("1"));
    assert_eq!(params.get("appid").map(String::as_str), Some("owm-key"));

    match params.get("q").map(String::as_str) {
        Some("London") => Json(json!([{"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB"}])),
        _ => Json(json!([])),
    }
}

async fn current_weather(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("units").map(String::as_str), Some("metric"));
    assert_eq!(params.get("lat").map(String::as_str), Some("51.5073"));

    Json(json!({
        "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds"}],
        "main": {"temp": 12.3, "feels_like": 11.0, "humidity": 81},
        "wind": {"speed": 5.2}
    }))
}

fn weather_stub() -> Router {
    Router::new()
        .route("/geo/1.0/direct", get(geocode))
        .route("/data/2.5/weather", get(current_weather))
}

#[tokio::test]
async fn test_openweather_lookup() {
    let base_url = spawn_stub(weather_stub()).await;
    let client = OpenWeatherClient::with_base_url(Some("owm-key".to_string()), base_url).unwrap();

    let observation = client.current_weather("London").await.unwrap();

    assert_eq!(observation.city, "London");
    assert_eq!(observation.main_condition, "Clouds");
    assert_eq!(observation.description, "overcast clouds");
    assert_eq!(observation.temp, 12.3);
    assert_eq!(observation.humidity, 81.0);
    assert_eq!(observation.wind_speed, 5.2);
}

#[tokio::test]
async fn test_openweather_unknown_city() {
    let base_url = spawn_stub(weather_stub()).await;
    let client = OpenWeatherClient::with_base_url(Some("owm-key".to_string()), base_url).unwrap();

    let result = client.current_weather("InvalidCity").await;

    assert!(matches!(result, Err(WeatherError::CityNotFound(city)) if city == "InvalidCity"));
}

#[tokio::test]
async fn test_openweather_api_error() {
    let router = Router::new().route(
        "/geo/1.0/direct",
        get(|| async { (StatusCode::UNAUTHORIZED, "Invalid API key") }),
    );
    let base_url = spawn_stub(router).await;
    let client = OpenWeatherClient::with_base_url(Some("bad".to_string()), base_url).unwrap();

    let result = client.current_weather("London").await;

    assert!(matches!(result, Err(WeatherError::ApiError(401, _))));
}

// ============================================================================
// Gemini
// ============================================================================

fn observation() -> WeatherObservation {
    WeatherObservation {
        city: "London".to_string(),
        main_condition: "Clouds".to_string(),
        description: "overcast clouds".to_string(),
        temp: 12.3,
        feels_like: 11.0,
        humidity: 81.0,
        wind_speed: 5.2,
    }
}

fn gemini_stub(prediction_text: &'static str) -> Router {
    Router::new().route(
        "/v1beta/models/:model_action",
        post(
            move |Path(model_action): Path<String>,
                  Query(params): Query<HashMap<String, String>>,
                  Json(body): Json<Value>| async move {
                assert_eq!(model_action, "gemini-1.5-flash:generateContent");
                assert_eq!(params.get("key").map(String::as_str), Some("gem-key"));
                assert_eq!(
                    body["generationConfig"]["responseMimeType"],
                    "application/json"
                );
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
                assert!(prompt.contains("- City: London"));

                Json(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": prediction_text}]},
                        "finishReason": "STOP"
                    }]
                }))
            },
        ),
    )
}

#[tokio::test]
async fn test_gemini_prediction() {
    let base_url = spawn_stub(gemini_stub(
        r#"{"climate": "Temperate oceanic", "mood": "Melancholy", "reason": "Grey skies."}"#,
    ))
    .await;
    let client =
        GeminiClient::with_base_url(Some("gem-key".to_string()), None, base_url).unwrap();

    let prediction = client.predict_mood(&observation()).await.unwrap();

    assert_eq!(prediction.climate, "Temperate oceanic");
    assert_eq!(prediction.mood, "Melancholy");
    assert_eq!(prediction.reason, "Grey skies.");
}

#[tokio::test]
async fn test_gemini_partial_prediction_is_failure() {
    let base_url = spawn_stub(gemini_stub(r#"{"climate": "Temperate", "mood": "Calm"}"#)).await;
    let client =
        GeminiClient::with_base_url(Some("gem-key".to_string()), None, base_url).unwrap();

    let result = client.predict_mood(&observation()).await;

    assert!(matches!(result, Err(InferenceError::MissingField("reason"))));
}

#[tokio::test]
async fn test_gemini_server_error() {
    let router = Router::new().route(
        "/v1beta/models/:model_action",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let base_url = spawn_stub(router).await;
    let client =
        GeminiClient::with_base_url(Some("gem-key".to_string()), None, base_url).unwrap();

    let result = client.predict_mood(&observation()).await;

    assert!(matches!(result, Err(InferenceError::ApiError(503, _))));
}

// ============================================================================
// Last.fm
// ============================================================================

async fn top_tracks(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("method").map(String::as_str), Some("tag.gettoptracks"));
    assert_eq!(params.get("limit").map(String::as_str), Some("50"));
    assert_eq!(params.get("format").map(String::as_str), Some("json"));

    match params.get("tag").map(String::as_str) {
        Some("calm") => Json(json!({"tracks": {"track": [
            {"name": "Weightless", "artist": {"name": "Marconi Union"}},
            {"name": "Teardrop", "artist": {"name": "Massive Attack"}}
        ]}})),
        _ => Json(json!({"tracks": {"track": []}})),
    }
}

#[tokio::test]
async fn test_lastfm_picks_from_pool() {
    let base_url = spawn_stub(Router::new().route("/2.0/", get(top_tracks))).await;
    let client = LastFmClient::with_base_url(Some("lfm-key".to_string()), base_url).unwrap();

    let song = client.recommend_song("calm").await;

    assert!(
        (song.title == "Weightless" && song.artist == "Marconi Union")
            || (song.title == "Teardrop" && song.artist == "Massive Attack")
    );
}

#[tokio::test]
async fn test_lastfm_empty_pool_returns_fallback() {
    let base_url = spawn_stub(Router::new().route("/2.0/", get(top_tracks))).await;
    let client = LastFmClient::with_base_url(Some("lfm-key".to_string()), base_url).unwrap();

    let song = client.recommend_song("disinterested").await;

    assert_eq!(song, fallback_song());
}

#[tokio::test]
async fn test_lastfm_malformed_response_returns_fallback() {
    let router = Router::new().route(
        "/2.0/",
        get(|| async { Json(json!({"tracks": {"track": [{"title": "no name field"}]}})) }),
    );
    let base_url = spawn_stub(router).await;
    let client = LastFmClient::with_base_url(Some("lfm-key".to_string()), base_url).unwrap();

    let song = client.recommend_song("happy").await;

    assert_eq!(song, fallback_song());
}

#[tokio::test]
async fn test_lastfm_server_error_returns_fallback() {
    let router = Router::new().route(
        "/2.0/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_stub(router).await;
    let client = LastFmClient::with_base_url(Some("lfm-key".to_string()), base_url).unwrap();

    let song = client.recommend_song("happy").await;

    assert_eq!(song, fallback_song());
}
