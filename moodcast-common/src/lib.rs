//! # MoodCast Common Library
//!
//! Shared code for the MoodCast services including:
//! - Error types
//! - Configuration loading and API key resolution
//! - Mood labels and the mood similarity table
//! - API request/response types

pub mod api;
pub mod config;
pub mod error;
pub mod mood;

pub use error::{Error, Result};
pub use mood::{MoodComparison, MoodLabel};
