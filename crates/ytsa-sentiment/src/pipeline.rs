//! Analyze-request orchestration.

use chrono::Utc;
use ytsa_core::AppConfig;
use ytsa_youtube::YoutubeClient;

use crate::aggregate::aggregate;
use crate::classifier::Classifier;
use crate::error::AnalysisError;
use crate::summarizer::Summarizer;
use crate::types::{AnalysisResult, CleanedComment};

/// Which pipeline components were constructed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentReadiness {
    pub ingestor: bool,
    pub cleaner: bool,
    pub classifier: bool,
    pub summarizer: bool,
}

impl ComponentReadiness {
    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.ingestor && self.cleaner && self.classifier && self.summarizer
    }
}

/// The full comment-analysis pipeline, built once per process and shared
/// across requests.
///
/// Each component is constructed independently; a missing credential
/// disables only that component and is reported by [`Pipeline::analyze`]
/// as a configuration error before any external call is made.
#[derive(Debug, Clone)]
pub struct Pipeline {
    ingestor: Result<YoutubeClient, String>,
    classifier: Result<Classifier, String>,
    summarizer: Result<Summarizer, String>,
    max_comments: usize,
}

impl Pipeline {
    /// Builds every component from `config`, logging the ones that could
    /// not be constructed.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let ingestor = YoutubeClient::with_base_url(
            config.youtube_api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.youtube_base_url,
        )
        .map_err(|e| e.to_string());

        let classifier = Classifier::from_config(config).map_err(|e| e.to_string());
        let summarizer = Summarizer::from_config(config).map_err(|e| e.to_string());

        for (component, result) in [
            ("ingestor", ingestor.as_ref().err()),
            ("classifier", classifier.as_ref().err()),
            ("summarizer", summarizer.as_ref().err()),
        ] {
            if let Some(reason) = result {
                tracing::warn!(component, reason = %reason, "pipeline component unavailable");
            }
        }

        tracing::info!(
            classifier_mode = %config.classifier_mode,
            max_comments = config.max_comments,
            "pipeline initialised"
        );

        Self {
            ingestor,
            classifier,
            summarizer,
            max_comments: config.max_comments,
        }
    }

    /// Assembles a pipeline from already-built components.
    #[must_use]
    pub fn new(
        ingestor: YoutubeClient,
        classifier: Classifier,
        summarizer: Summarizer,
        max_comments: usize,
    ) -> Self {
        Self {
            ingestor: Ok(ingestor),
            classifier: Ok(classifier),
            summarizer: Ok(summarizer),
            max_comments,
        }
    }

    #[must_use]
    pub fn readiness(&self) -> ComponentReadiness {
        ComponentReadiness {
            ingestor: self.ingestor.is_ok(),
            cleaner: true,
            classifier: self.classifier.is_ok(),
            summarizer: self.summarizer.is_ok(),
        }
    }

    #[must_use]
    pub fn max_comments(&self) -> usize {
        self.max_comments
    }

    #[must_use]
    pub fn classifier(&self) -> Option<&Classifier> {
        self.classifier.as_ref().ok()
    }

    /// Analyzes up to the configured number of comments for `video_id`.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::analyze_with_limit`].
    pub async fn analyze(&self, video_id: &str) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_limit(video_id, self.max_comments).await
    }

    /// Runs fetch, clean, classify, aggregate and summarize for one video.
    ///
    /// Per-comment classification failures are absorbed as `unknown`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Configuration`] if any component is unavailable;
    ///   no external call is made in that case.
    /// - [`AnalysisError::NoData`] if the video has no comments; the
    ///   classifier and summarizer are not called.
    /// - [`AnalysisError::ExternalService`] if ingestion or summarization
    ///   fails.
    pub async fn analyze_with_limit(
        &self,
        video_id: &str,
        max_comments: usize,
    ) -> Result<AnalysisResult, AnalysisError> {
        let ingestor = ready(&self.ingestor)?;
        let classifier = ready(&self.classifier)?;
        let summarizer = ready(&self.summarizer)?;

        let raw = ingestor.fetch_comments(video_id, max_comments).await?;
        if raw.is_empty() {
            tracing::info!(video_id, "no comments found");
            return Err(AnalysisError::NoData {
                video_id: video_id.to_string(),
            });
        }
        tracing::info!(video_id, fetched = raw.len(), "comments fetched");

        let cleaned: Vec<CleanedComment> = raw.into_iter().map(CleanedComment::from_raw).collect();
        let analyzed = classifier.classify_all(cleaned).await;

        let (stats, comments) = aggregate(&analyzed);
        tracing::info!(
            video_id,
            total = stats.total_comments,
            counts = ?stats.counts,
            "comments classified"
        );

        let summary = summarizer.summarize(&comments).await?;

        Ok(AnalysisResult {
            video_id: video_id.to_string(),
            total_comments: stats.total_comments,
            sentiment_counts: stats.counts,
            sentiment_percentages: stats.percentages,
            comments,
            summary: summary.summary,
            keywords: summary.keywords,
            analyzed_at: Utc::now(),
        })
    }
}

fn ready<T>(component: &Result<T, String>) -> Result<&T, AnalysisError> {
    component
        .as_ref()
        .map_err(|reason| AnalysisError::Configuration(reason.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytsa_core::{ClassifierMode, Environment};

    fn config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            log_level: "info".to_string(),
            youtube_api_key: None,
            youtube_base_url: "http://127.0.0.1:9/".to_string(),
            google_api_key: None,
            gemini_base_url: "http://127.0.0.1:9/".to_string(),
            gemini_model: "gemini-1.5-flash-latest".to_string(),
            classifier_mode: ClassifierMode::Hosted,
            classifier_url: None,
            ensemble_model_urls: Vec::new(),
            classifier_concurrency: 4,
            max_comments: 30,
            summary_top_comments: 30,
            request_timeout_secs: 5,
            analyze_timeout_secs: 10,
            user_agent: "ytsa-test".to_string(),
        }
    }

    #[test]
    fn missing_credentials_disable_components() {
        let pipeline = Pipeline::from_config(&config());
        let ready = pipeline.readiness();
        assert!(!ready.ingestor);
        assert!(ready.cleaner);
        assert!(!ready.classifier);
        assert!(!ready.summarizer);
        assert!(!ready.all_ready());
        assert!(pipeline.classifier().is_none());
    }

    #[test]
    fn full_config_makes_every_component_ready() {
        let mut cfg = config();
        cfg.youtube_api_key = Some("yt".to_string());
        cfg.google_api_key = Some("g".to_string());
        cfg.classifier_url = Some("http://127.0.0.1:9".to_string());
        let pipeline = Pipeline::from_config(&cfg);
        assert!(pipeline.readiness().all_ready());
        assert_eq!(pipeline.max_comments(), 30);
    }

    #[tokio::test]
    async fn analyze_fails_fast_on_missing_configuration() {
        let pipeline = Pipeline::from_config(&config());
        let err = pipeline.analyze("abc").await.unwrap_err();
        match err {
            AnalysisError::Configuration(reason) => {
                assert!(reason.contains("YouTube") || reason.contains("API key"));
            }
            other => panic!("expected Configuration, got {other:?}"),
        }
    }
}
