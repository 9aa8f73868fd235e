//! Shared API types for MoodCast services

pub mod types;

pub use types::{ErrorBody, ErrorResponse, RecommendRequest, RecommendResponse, Song};
