use thiserror::Error;
use ytsa_youtube::YoutubeError;

/// Errors from a classification backend.
///
/// Construction errors (`NotConfigured`, `InvalidUrl`) stop the pipeline;
/// every other variant is scoped to a single comment or chunk and is
/// absorbed into an `unknown` label.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier is not configured: {0}")]
    NotConfigured(String),

    #[error("invalid classifier URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognized sentiment label '{0}'")]
    UnknownLabel(String),

    #[error("model returned {got} predictions for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("model returned {got} logits per input; expected {expected}")]
    LogitShape { expected: usize, got: usize },

    #[error("no ensemble member produced a prediction")]
    NoVotes,
}

/// Errors from the generative summarization service.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("generative model API key is missing; set GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("invalid summarizer URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative model returned status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("generative model returned no text")]
    EmptyResponse,
}

/// Request-level failures of the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A credential or endpoint is missing; raised before any external call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An upstream API failed during ingestion or summarization.
    #[error("{service} failed: {reason}")]
    ExternalService {
        service: &'static str,
        reason: String,
    },

    /// The comment source returned zero comments.
    #[error("no comments found for video {video_id}")]
    NoData { video_id: String },
}

impl From<YoutubeError> for AnalysisError {
    fn from(err: YoutubeError) -> Self {
        match err {
            YoutubeError::MissingApiKey | YoutubeError::InvalidBaseUrl { .. } => {
                AnalysisError::Configuration(err.to_string())
            }
            other => AnalysisError::ExternalService {
                service: "comment source",
                reason: other.to_string(),
            },
        }
    }
}

impl From<ClassifierError> for AnalysisError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::NotConfigured(_) | ClassifierError::InvalidUrl { .. } => {
                AnalysisError::Configuration(err.to_string())
            }
            other => AnalysisError::ExternalService {
                service: "classifier",
                reason: other.to_string(),
            },
        }
    }
}

impl From<SummarizerError> for AnalysisError {
    fn from(err: SummarizerError) -> Self {
        match err {
            SummarizerError::MissingApiKey | SummarizerError::InvalidUrl { .. } => {
                AnalysisError::Configuration(err.to_string())
            }
            other => AnalysisError::ExternalService {
                service: "summarizer",
                reason: other.to_string(),
            },
        }
    }
}
