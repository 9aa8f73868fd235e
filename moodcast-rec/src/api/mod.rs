//! HTTP API handlers for moodcast-rec

pub mod health;
pub mod recommend;

pub use health::health_routes;
pub use recommend::recommend_routes;
