//! Last.fm API client
//!
//! Picks a song for a mood by treating the mood as a Last.fm tag: the top
//! tracks for the tag form the candidate pool, and one is chosen uniformly at
//! random. Any failure (no key, network, bad status, bad JSON, empty pool)
//! produces the fallback song instead of an error.

use crate::types::{fallback_song, SongProvider};
use async_trait::async_trait;
use moodcast_common::api::Song;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const LASTFM_BASE_URL: &str = "http://ws.audioscrobbler.com";
const USER_AGENT: &str = "MoodCast/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of the candidate pool requested per tag
const CANDIDATE_POOL_SIZE: &str = "50";

/// Last.fm client errors
///
/// Internal to this module's callers: [`SongProvider::recommend_song`] turns
/// every variant into the fallback song.
#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("Last.fm API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// tag.gettoptracks response (subset)
#[derive(Debug, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Option<TrackList>,
}

#[derive(Debug, Deserialize)]
pub struct TrackList {
    #[serde(default)]
    pub track: Vec<LastFmTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrack {
    pub name: String,
    pub artist: LastFmArtist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmArtist {
    pub name: String,
}

impl From<LastFmTrack> for Song {
    fn from(track: LastFmTrack) -> Self {
        Song::new(track.name, track.artist.name)
    }
}

/// Last.fm API client
pub struct LastFmClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl LastFmClient {
    /// Create a client against the public API
    ///
    /// A `None` key is accepted; every lookup then returns the fallback song.
    pub fn new(api_key: Option<String>) -> Result<Self, LastFmError> {
        Self::with_base_url(api_key, LASTFM_BASE_URL)
    }

    /// Create a client against a different host (used by tests)
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LastFmError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LastFmError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the top tracks for a tag
    pub async fn top_tracks(&self, tag: &str) -> Result<Vec<LastFmTrack>, LastFmError> {
        let api_key = self.api_key.as_deref().ok_or(LastFmError::MissingApiKey)?;
        let url = format!("{}/2.0/", self.base_url);

        tracing::debug!(tag = %tag, "Querying Last.fm top tracks");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("method", "tag.gettoptracks"),
                ("tag", tag),
                ("api_key", api_key),
                ("format", "json"),
                ("limit", CANDIDATE_POOL_SIZE),
            ])
            .send()
            .await
            .map_err(|e| LastFmError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LastFmError::ApiError(status.as_u16(), error_text));
        }

        let body: TopTracksResponse = response
            .json()
            .await
            .map_err(|e| LastFmError::ParseError(e.to_string()))?;

        Ok(body.tracks.map(|list| list.track).unwrap_or_default())
    }
}

/// Choose one track uniformly at random, or the fallback song if none
pub fn choose_song(tracks: Vec<LastFmTrack>) -> Song {
    tracks
        .choose(&mut rand::thread_rng())
        .cloned()
        .map(Song::from)
        .unwrap_or_else(fallback_song)
}

#[async_trait]
impl SongProvider for LastFmClient {
    fn name(&self) -> &'static str {
        "Last.fm"
    }

    async fn recommend_song(&self, mood_tag: &str) -> Song {
        match self.top_tracks(mood_tag).await {
            Ok(tracks) if tracks.is_empty() => {
                tracing::warn!(tag = %mood_tag, "No tracks found for mood tag, returning fallback song");
                fallback_song()
            }
            Ok(tracks) => {
                let pool = tracks.len();
                let song = choose_song(tracks);
                tracing::info!(
                    tag = %mood_tag,
                    pool = pool,
                    title = %song.title,
                    artist = %song.artist,
                    "Selected song"
                );
                song
            }
            Err(e) => {
                tracing::warn!(tag = %mood_tag, error = %e, "Last.fm lookup failed, returning fallback song");
                fallback_song()
            }
        }
    }
}
