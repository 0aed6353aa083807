use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Watch-progress state of a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WatchStatus {
    /// Not started yet
    #[default]
    #[serde(rename = "Will Watch")]
    WillWatch,
    /// In progress
    Watching,
    /// Finished
    Watched,
}

impl WatchStatus {
    /// Returns the wire label for this status, as stored and filtered on
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::WillWatch => "Will Watch",
            WatchStatus::Watching => "Watching",
            WatchStatus::Watched => "Watched",
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single watchlist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Unique identifier, assigned by the store on create
    pub id: Uuid,
    /// Movie title, always non-empty
    pub title: String,
    /// Poster image URL, empty when unknown
    #[serde(rename = "posterURL", default)]
    pub poster_url: String,
    /// Short synopsis
    #[serde(default)]
    pub description: String,
    /// Free-form genre label (the UI offers suggestions, storage does not enforce them)
    #[serde(default)]
    pub genre: String,
    /// Spoken language
    #[serde(default = "default_language")]
    pub language: String,
    /// Watch-progress state
    #[serde(default)]
    pub status: WatchStatus,
    /// Raw rating as supplied by the producer; may be on a 0-5 or 0-10 scale
    #[serde(default)]
    pub rating: f64,
    /// Release year; legacy field, round-tripped untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Personal review text; legacy field, round-tripped untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    /// Set by the store when the record is created
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every update
    pub updated_at: DateTime<Utc>,
}

fn default_language() -> String {
    "English".to_string()
}

impl Movie {
    /// Creates a new movie with a fresh id and timestamps.
    /// Field validation (non-empty title) is the caller's responsibility.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        poster_url: String,
        description: String,
        genre: String,
        language: String,
        status: WatchStatus,
        rating: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            poster_url,
            description,
            genre,
            language,
            status,
            rating,
            year: None,
            review: None,
            created_at: now,
            updated_at: now,
        }
    }
}
