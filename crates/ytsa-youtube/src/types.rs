//! Wire types for `commentThreads.list` and their mapping to [`RawComment`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use ytsa_core::RawComment;

/// One page of comments plus the cursor for the next page, if any.
#[derive(Debug, Clone)]
pub struct CommentPage {
    pub comments: Vec<RawComment>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadListResponse {
    #[serde(default)]
    pub(crate) items: Vec<CommentThread>,
    pub(crate) next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub(crate) id: String,
    pub(crate) snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadSnippet {
    pub(crate) top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    pub(crate) snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    pub(crate) text_display: String,
    pub(crate) author_display_name: Option<String>,
    pub(crate) published_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) like_count: u64,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) message: String,
}

impl CommentThread {
    pub(crate) fn into_raw_comment(self, video_id: &str) -> RawComment {
        let snippet = self.snippet.top_level_comment.snippet;
        RawComment {
            id: self.id,
            video_id: video_id.to_owned(),
            text: snippet.text_display,
            author: snippet.author_display_name,
            published_at: snippet.published_at,
            like_count: snippet.like_count,
        }
    }
}
