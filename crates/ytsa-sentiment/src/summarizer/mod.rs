//! Summary and keyword generation via the Gemini `generateContent` API.

mod parse;
mod prompt;

pub use parse::{parse_response, MAX_KEYWORDS};
pub use prompt::{build_prompt, DEFAULT_TOP_COMMENTS, MAX_COMMENT_CHARS};

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use ytsa_core::AppConfig;

use crate::error::SummarizerError;
use crate::types::CommentView;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Summary text and up to three keywords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Gemini client bound to one model.
#[derive(Clone)]
pub struct Summarizer {
    client: Client,
    endpoint: Url,
    api_key: String,
    top_n: usize,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl Summarizer {
    /// Creates a client for `model` against the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::MissingApiKey`] when `api_key` is `None`
    /// or blank, or [`SummarizerError::Http`] if the client cannot be built.
    pub fn new(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SummarizerError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, model, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`Summarizer::new`], plus [`SummarizerError::InvalidUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        base_url: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SummarizerError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SummarizerError::MissingApiKey)?;

        let model = model.trim().trim_start_matches("models/");
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| SummarizerError::InvalidUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            top_n: DEFAULT_TOP_COMMENTS,
        })
    }

    /// Builds a summarizer from `GOOGLE_API_KEY` and the `YTSA_GEMINI_*`
    /// settings.
    ///
    /// # Errors
    ///
    /// Same as [`Summarizer::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizerError> {
        Self::with_base_url(
            config.google_api_key.as_deref(),
            &config.gemini_base_url,
            &config.gemini_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .map(|s| s.with_top_comments(config.summary_top_comments))
    }

    /// Overrides how many of the most-liked comments go into the prompt.
    #[must_use]
    pub fn with_top_comments(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Summarizes a comment section.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::generate`].
    pub async fn summarize(&self, comments: &[CommentView]) -> Result<Summary, SummarizerError> {
        let prompt = build_prompt(comments, self.top_n);
        let text = self.generate(&prompt).await?;
        Ok(parse_response(&text))
    }

    /// Sends one prompt and returns the concatenated text of the first
    /// candidate.
    ///
    /// # Errors
    ///
    /// - [`SummarizerError::Http`] on network failure.
    /// - [`SummarizerError::UnexpectedStatus`] on a non-2xx status.
    /// - [`SummarizerError::Deserialize`] if the body has the wrong shape.
    /// - [`SummarizerError::EmptyResponse`] if no candidate carries text.
    pub async fn generate(&self, prompt: &str) -> Result<String, SummarizerError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(SummarizerError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| SummarizerError::Deserialize {
                context: "generateContent response".to_string(),
                source: e,
            })?;

        first_candidate_text(parsed).ok_or(SummarizerError::EmptyResponse)
    }
}

fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let parts = response.candidates.into_iter().next()?.content?.parts;
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
