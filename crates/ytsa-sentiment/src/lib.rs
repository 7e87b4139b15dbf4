//! Comment analysis pipeline.
//!
//! Fetches a bounded set of comments for a video, normalizes their text,
//! labels each one with a sentiment (hosted confidence model or a
//! majority-vote ensemble), aggregates the label distribution, and asks a
//! generative model for a short summary plus keywords.

pub mod aggregate;
pub mod classifier;
pub mod clean;
pub mod error;
pub mod fixtures;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use aggregate::{aggregate, SentimentStats};
pub use classifier::{Classifier, EnsembleClassifier, HostedClassifier};
pub use clean::{clean, clean_opt};
pub use error::{AnalysisError, ClassifierError, SummarizerError};
pub use fixtures::sample_analysis;
pub use pipeline::{ComponentReadiness, Pipeline};
pub use summarizer::{Summarizer, Summary};
pub use types::{
    AnalysisResult, AnalyzedComment, ClassificationResult, CleanedComment, CommentView, Sentiment,
};
