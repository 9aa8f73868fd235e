//! Request/response types for the recommendation API
//!
//! # Examples
//!
//! ```
//! use moodcast_common::api::types::RecommendRequest;
//!
//! let request: RecommendRequest =
//!     serde_json::from_str(r#"{"mood": "Happy", "city": "Ottapalam"}"#).unwrap();
//! assert_eq!(request.city, "Ottapalam");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

// ========================================
// Recommendation Types
// ========================================

/// POST /recommend request body
///
/// Both fields default to empty, and `null` reads as empty, so that an absent
/// field is reported by the same validation path as an empty one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RecommendRequest {
    /// The user's current mood (free text, any case)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mood: String,

    /// The user's current city
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A song recommendation
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// POST /recommend success body
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecommendResponse {
    /// Human-readable comparison of stated and predicted mood
    pub analysis: String,

    /// Predicted mood, canonical lower-case label
    pub predicted_mood: String,

    /// Reason given by the mood inference service, verbatim
    pub reason_for_prediction: String,

    pub song_recommendation: Song,
}

// ========================================
// Error Response Types
// ========================================

/// Error response body
///
/// ```json
/// {"error": {"code": "BAD_REQUEST", "message": "..."}}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Inner error object
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g. "WEATHER_UNAVAILABLE")
    pub code: String,
    /// Human-readable message
    pub message: String,
}
