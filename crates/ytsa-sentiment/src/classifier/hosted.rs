//! Hosted single-model classifier that reports per-class confidences.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::types::{ClassificationResult, Sentiment};

/// Client for a hosted sentiment model exposing `POST /predict`.
///
/// Request body: `{"text": "..."}`. Response body:
/// `{"label": "positive", "confidences": [{"label": "positive", "confidence": 0.8}, ...]}`.
#[derive(Debug, Clone)]
pub struct HostedClassifier {
    client: Client,
    predict_url: Url,
    concurrency: usize,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    label: String,
    #[serde(default)]
    confidences: Vec<LabelConfidence>,
}

#[derive(Debug, Deserialize)]
struct LabelConfidence {
    label: String,
    confidence: f64,
}

impl HostedClassifier {
    /// Creates a client for the model at `base_url`.
    ///
    /// `concurrency` bounds the number of in-flight requests during
    /// [`Self::classify_batch`]; values below 1 are raised to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidUrl`] if `base_url` does not parse,
    /// or [`ClassifierError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        concurrency: usize,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            predict_url: super::predict_url(base_url)?,
            concurrency: concurrency.max(1),
        })
    }

    /// Classifies one text.
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::Http`] on network failure.
    /// - [`ClassifierError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClassifierError::Deserialize`] if the body has the wrong shape.
    /// - [`ClassifierError::UnknownLabel`] if the label is not one of
    ///   `positive`, `negative`, `neutral`.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let response = self
            .client
            .post(self.predict_url.clone())
            .json(&PredictRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: PredictResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Deserialize {
                context: "hosted classifier prediction".to_string(),
                source: e,
            })?;

        to_classification(parsed)
    }

    /// Classifies every text with bounded concurrency, returning results in
    /// input order.
    ///
    /// A failed comment is logged and recorded as `unknown` with no scores;
    /// it never fails the batch.
    pub async fn classify_batch(&self, texts: &[String]) -> Vec<ClassificationResult> {
        let futures: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| async move {
                let result = match self.classify(text).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(index, error = %e, "comment classification failed");
                        ClassificationResult::unknown()
                    }
                };
                (index, result)
            })
            .collect();
        let mut results: Vec<(usize, ClassificationResult)> = stream::iter(futures)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

fn to_classification(response: PredictResponse) -> Result<ClassificationResult, ClassifierError> {
    let sentiment = Sentiment::from_label(&response.label)
        .ok_or_else(|| ClassifierError::UnknownLabel(response.label.clone()))?;

    let mut positive = None;
    let mut negative = None;
    let mut neutral = None;
    for entry in &response.confidences {
        let slot = match Sentiment::from_label(&entry.label) {
            Some(Sentiment::Positive) => &mut positive,
            Some(Sentiment::Negative) => &mut negative,
            Some(Sentiment::Neutral) => &mut neutral,
            _ => continue,
        };
        if entry.confidence.is_finite() {
            *slot = Some(entry.confidence);
        }
    }

    let total: f64 = [positive, negative, neutral].iter().flatten().sum();
    if total > 0.0 && total.is_finite() {
        for slot in [&mut positive, &mut negative, &mut neutral] {
            if let Some(value) = slot.as_mut() {
                *value /= total;
            }
        }
    }

    Ok(ClassificationResult {
        sentiment,
        positive_score: positive,
        negative_score: negative,
        neutral_score: neutral,
    })
}
