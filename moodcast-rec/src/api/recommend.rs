//! Recommendation endpoint
//!
//! POST /recommend
//!
//! **Request:** `{"mood": "Happy", "city": "Ottapalam"}`
//! **Response:** `{"analysis", "predicted_mood", "reason_for_prediction", "song_recommendation"}`

use crate::{ApiError, ApiResult, AppState};
use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use moodcast_common::api::{RecommendRequest, RecommendResponse};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// POST /recommend handler
///
/// **Errors:**
/// - 400 Bad Request: body is not JSON, or mood/city missing or blank
/// - 500 Internal Server Error: weather lookup or mood inference failed
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = info_span!("recommend", %request_id, city = %request.city.trim());

    let recommendation = state
        .orchestrator
        .recommend(&request.mood, &request.city)
        .instrument(span)
        .await?;

    Ok(Json(recommendation.into()))
}

/// Build recommendation routes
pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/recommend", post(recommend))
}
