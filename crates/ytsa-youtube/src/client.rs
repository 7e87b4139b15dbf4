//! HTTP client for the `YouTube` Data API `commentThreads` endpoint.
//!
//! Wraps `reqwest` with API key handling, typed response deserialization,
//! and cursor-driven pagination bounded by a caller-supplied comment count.
//! Errors are returned as-is; retry policy belongs to the caller.

use std::time::Duration;

use reqwest::{Client, Url};
use ytsa_core::RawComment;

use crate::error::YoutubeError;
use crate::types::{ApiErrorEnvelope, CommentPage, CommentThreadListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` the comment-threads endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Upper bound on pages fetched for one video. Guards against a provider
/// that keeps handing back cursors.
pub const MAX_PAGES: usize = 500;

/// Client for the comment-threads endpoint.
///
/// Cheap to clone; the underlying connection pool is shared and safe to use
/// from concurrent requests.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::MissingApiKey`] when `api_key` is `None` or
    /// blank, or [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::new`], plus [`YoutubeError::InvalidBaseUrl`]
    /// if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(YoutubeError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches up to `max_comments` top-level comments for `video_id`, in
    /// provider order.
    ///
    /// Pages are requested one after another, each with the cursor from the
    /// previous response. Collection stops as soon as `max_comments` is
    /// reached, even in the middle of a page, or when the provider stops
    /// returning a cursor. A video with no comments yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_comment_page`]. Returns
    /// [`YoutubeError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_comments: usize,
    ) -> Result<Vec<RawComment>, YoutubeError> {
        let mut comments: Vec<RawComment> = Vec::with_capacity(max_comments.min(MAX_PAGE_SIZE));
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        while comments.len() < max_comments {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    video_id: video_id.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let remaining = max_comments - comments.len();
            let page = self
                .fetch_comment_page(video_id, remaining.min(MAX_PAGE_SIZE), cursor.as_deref())
                .await?;

            tracing::debug!(
                video_id,
                page = page_count,
                count = page.comments.len(),
                "fetched comment page"
            );

            comments.extend(page.comments.into_iter().take(remaining));

            cursor = page.next_page_token;
            if cursor.is_none() {
                break;
            }
        }

        Ok(comments)
    }

    /// Fetches one page of comment threads.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Api`] on a non-2xx status (quota, unknown video,
    ///   disabled comments).
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_comment_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentPage, YoutubeError> {
        let url = self.comment_threads_url(video_id, page_size, page_token)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = serde_json::from_str::<CommentThreadListResponse>(&body).map_err(|e| {
            YoutubeError::Deserialize {
                context: format!("commentThreads(videoId={video_id})"),
                source: e,
            }
        })?;

        let comments = parsed
            .items
            .into_iter()
            .map(|thread| thread.into_raw_comment(video_id))
            .collect();

        Ok(CommentPage {
            comments,
            next_page_token: parsed.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    /// Builds the `commentThreads` URL with percent-encoded query parameters.
    fn comment_threads_url(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<Url, YoutubeError> {
        let mut url =
            self.base_url
                .join("commentThreads")
                .map_err(|e| YoutubeError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("part", "snippet");
            pairs.append_pair("videoId", video_id);
            pairs.append_pair("maxResults", &page_size.clamp(1, MAX_PAGE_SIZE).to_string());
            pairs.append_pair("textFormat", "plainText");
            pairs.append_pair("key", &self.api_key);
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }
}
