//! Mood labels and the mood similarity table
//!
//! Mood labels are compared case-insensitively everywhere. [`MoodLabel`] holds
//! the canonical (trimmed, lower-case) form; display text is kept by callers.
//!
//! The similarity table is a curated, directed relation: `happy` lists
//! `energetic` as similar, but `energetic` only lists `happy`. Lookups are
//! always keyed by the label whose neighbours are wanted; nothing is inferred
//! in the reverse direction.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Similarity table, keyed by canonical mood label
const SIMILARITY_TABLE: &[(&str, &[&str])] = &[
    ("happy", &["energetic", "relieved", "calm"]),
    ("energetic", &["happy"]),
    ("cozy", &["calm", "happy"]),
    ("gloomy", &["sad", "melancholy"]),
    ("sad", &["gloomy", "melancholy"]),
    ("melancholy", &["gloomy", "sad"]),
    ("calm", &["cozy", "relieved"]),
    ("relieved", &["happy", "calm"]),
    ("angry", &["frustrated", "irritated"]),
    ("frustrated", &["angry", "irritated"]),
    ("tensed", &["frustrated", "irritable"]),
    ("irritable", &["angry", "frustrated", "boring"]),
    ("boring", &["disinterested", "uninspired", "irritable"]),
];

static MOOD_SIMILARITY: Lazy<MoodSimilarityGraph> = Lazy::new(|| {
    MoodSimilarityGraph {
        edges: SIMILARITY_TABLE
            .iter()
            .map(|(mood, similar)| (*mood, similar.iter().copied().collect()))
            .collect(),
    }
});

/// Canonical mood label
///
/// Construction trims surrounding whitespace and lower-cases the text, so two
/// labels are equal exactly when their inputs match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodLabel(String);

impl MoodLabel {
    /// Canonicalize a mood string
    ///
    /// # Errors
    /// `Error::InvalidInput` if the text is empty after trimming.
    pub fn new(raw: &str) -> Result<Self> {
        let canonical = raw.trim().to_lowercase();
        if canonical.is_empty() {
            return Err(Error::InvalidInput("mood label is empty".to_string()));
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static directed similarity relation over canonical mood labels
#[derive(Debug)]
pub struct MoodSimilarityGraph {
    edges: HashMap<&'static str, HashSet<&'static str>>,
}

impl MoodSimilarityGraph {
    /// The process-wide similarity table
    pub fn standard() -> &'static MoodSimilarityGraph {
        &MOOD_SIMILARITY
    }

    /// Labels considered similar to `mood`
    ///
    /// The lookup is case-insensitive. Unknown labels yield an empty set.
    pub fn similar_to(&self, mood: &str) -> HashSet<&'static str> {
        let key = mood.trim().to_lowercase();
        self.edges.get(key.as_str()).cloned().unwrap_or_default()
    }

    /// Whether `candidate` is listed as similar to `mood`
    pub fn is_similar(&self, mood: &MoodLabel, candidate: &MoodLabel) -> bool {
        self.edges
            .get(mood.as_str())
            .is_some_and(|similar| similar.contains(candidate.as_str()))
    }

}

/// How a predicted mood relates to the mood the user stated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodComparison {
    /// Same canonical label
    Match,
    /// Predicted mood is in the similarity set of the stated mood
    Similar,
    /// Neither of the above
    Mismatch,
}

impl MoodComparison {
    /// Classify `predicted` against `stated`
    ///
    /// Exact match wins over similarity. Similarity is looked up under the
    /// stated mood only.
    pub fn classify(
        graph: &MoodSimilarityGraph,
        stated: &MoodLabel,
        predicted: &MoodLabel,
    ) -> Self {
        if stated == predicted {
            MoodComparison::Match
        } else if graph.is_similar(stated, predicted) {
            MoodComparison::Similar
        } else {
            MoodComparison::Mismatch
        }
    }
}
