use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level public comment as fetched from the comment source.
///
/// Immutable once fetched; every later stage derives new records from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    pub id: String,
    pub video_id: String,
    pub text: String,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub like_count: u64,
}
