use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre sentinel used whenever inference is unavailable or fails
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Kind of media a catalog entry describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Music,
    Game,
}

/// Where an item sits in the owner's collection lifecycle
///
/// No transition ordering is enforced; a user may set any status at any time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    Wishlist,
    Owned,
    CurrentlyUsing,
    Completed,
}

/// One catalog entry, always owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    /// Store-assigned identifier, immutable after insert
    pub id: Uuid,
    /// Owning user; every read/write is scoped to this
    pub owner_id: Uuid,
    pub title: String,
    pub creator: String,
    pub release_date: Option<NaiveDate>,
    /// Free text; empty at creation means "infer one or fall back to Unknown"
    pub genre: String,
    pub media_type: MediaType,
    pub status: MediaStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of a media item, as accepted by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFields {
    pub title: String,
    pub creator: String,
    pub release_date: Option<NaiveDate>,
    pub genre: String,
    pub media_type: MediaType,
    pub status: MediaStatus,
    pub notes: String,
}

/// Search filter; absent fields do not constrain the result.
///
/// Text fields are case-insensitive substring matches, enum fields are exact.
/// All supplied fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct MediaFilter {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub genre: Option<String>,
    pub media_type: Option<MediaType>,
    pub status: Option<MediaStatus>,
}

impl MediaFilter {
    /// True when `item` satisfies every supplied field
    pub fn matches(&self, item: &MediaItem) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.title
            .as_deref()
            .map_or(true, |t| contains_ci(&item.title, t))
            && self
                .creator
                .as_deref()
                .map_or(true, |c| contains_ci(&item.creator, c))
            && self
                .genre
                .as_deref()
                .map_or(true, |g| contains_ci(&item.genre, g))
            && self.media_type.map_or(true, |t| item.media_type == t)
            && self.status.map_or(true, |s| item.status == s)
    }
}

/// Advisory output of the recommendation operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub suggested_genre: String,
    pub similar_items: Vec<String>,
    pub reasoning: String,
}

impl AiRecommendation {
    /// Fixed substitute returned when the backend fails or its reply is unusable
    pub fn fallback() -> Self {
        Self {
            suggested_genre: UNKNOWN_GENRE.to_string(),
            similar_items: vec!["No recommendations available".to_string()],
            reasoning: "AI service temporarily unavailable".to_string(),
        }
    }
}
