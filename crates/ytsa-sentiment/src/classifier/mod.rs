//! Sentiment classification backends.
//!
//! Two interchangeable modes sit behind [`Classifier`]: a hosted model that
//! reports per-class confidences, and a majority-vote ensemble that reports
//! only a discrete label. Either way, one comment's failure is absorbed as
//! `unknown` and never aborts the batch.

mod ensemble;
mod hosted;
pub mod vote;

pub use ensemble::EnsembleClassifier;
pub use hosted::HostedClassifier;

use reqwest::Url;
use ytsa_core::{AppConfig, ClassifierMode};

use crate::error::ClassifierError;
use crate::types::{AnalyzedComment, ClassificationResult, CleanedComment, Sentiment};

/// Configured classification backend.
#[derive(Debug, Clone)]
pub enum Classifier {
    Hosted(HostedClassifier),
    Ensemble(EnsembleClassifier),
}

impl Classifier {
    /// Builds the backend selected by `YTSA_CLASSIFIER_MODE`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotConfigured`] when the selected mode has
    /// no endpoint configured, or any construction error from the backend.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClassifierError> {
        match config.classifier_mode {
            ClassifierMode::Hosted => {
                let url = config.classifier_url.as_deref().ok_or_else(|| {
                    ClassifierError::NotConfigured(
                        "hosted mode needs YTSA_CLASSIFIER_URL".to_string(),
                    )
                })?;
                HostedClassifier::new(
                    url,
                    config.classifier_concurrency,
                    config.request_timeout_secs,
                    &config.user_agent,
                )
                .map(Classifier::Hosted)
            }
            ClassifierMode::Ensemble => EnsembleClassifier::new(
                &config.ensemble_model_urls,
                config.request_timeout_secs,
                &config.user_agent,
            )
            .map(Classifier::Ensemble),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ClassifierMode {
        match self {
            Classifier::Hosted(_) => ClassifierMode::Hosted,
            Classifier::Ensemble(_) => ClassifierMode::Ensemble,
        }
    }

    /// Classifies a single text, surfacing the failure instead of mapping it
    /// to `unknown`.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`ClassifierError`].
    pub async fn classify_text(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        match self {
            Classifier::Hosted(hosted) => hosted.classify(text).await,
            Classifier::Ensemble(ensemble) => ensemble.classify(text).await,
        }
    }

    /// Classifies every comment by its cleaned text, preserving input order.
    pub async fn classify_all(&self, comments: Vec<CleanedComment>) -> Vec<AnalyzedComment> {
        let texts: Vec<String> = comments.iter().map(|c| c.cleaned_text.clone()).collect();

        let results = match self {
            Classifier::Hosted(hosted) => hosted.classify_batch(&texts).await,
            Classifier::Ensemble(ensemble) => ensemble.classify_batch(&texts).await,
        };

        let unknown = results
            .iter()
            .filter(|r| r.sentiment == Sentiment::Unknown)
            .count();
        if unknown > 0 {
            tracing::warn!(
                unknown,
                total = comments.len(),
                "some comments could not be classified"
            );
        }

        comments
            .into_iter()
            .zip(results)
            .map(|(comment, result)| comment.with_classification(result))
            .collect()
    }
}

/// Resolves `{base_url}/predict`, tolerating a trailing slash on the base.
pub(crate) fn predict_url(base_url: &str) -> Result<Url, ClassifierError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join("predict"))
        .map_err(|e| ClassifierError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })
}
