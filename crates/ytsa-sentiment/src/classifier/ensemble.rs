//! Majority-vote ensemble over independently trained models.
//!
//! Every member shares the label ordering in [`Sentiment::LABELS`]. Each
//! member scores a whole chunk of texts in one call and the predicted index
//! per text is the argmax of its logits. The final label is the index with
//! the most votes, lowest index on ties. No confidences are reported.

use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, Url};
use serde::Serialize;

use super::vote::{argmax, majority_vote};
use crate::error::ClassifierError;
use crate::types::{ClassificationResult, Sentiment};

/// Maximum number of texts per member `/predict` call.
const BATCH_SIZE: usize = 64;

/// Ensemble of model inference endpoints.
#[derive(Debug, Clone)]
pub struct EnsembleClassifier {
    client: Client,
    members: Vec<Url>,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a [String],
}

impl EnsembleClassifier {
    /// Creates an ensemble from one base URL per member model.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotConfigured`] when `member_urls` is
    /// empty, [`ClassifierError::InvalidUrl`] for an unparseable URL, or
    /// [`ClassifierError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        member_urls: &[String],
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifierError> {
        if member_urls.is_empty() {
            return Err(ClassifierError::NotConfigured(
                "ensemble mode needs at least one model URL in YTSA_ENSEMBLE_MODEL_URLS"
                    .to_string(),
            ));
        }

        let members = member_urls
            .iter()
            .map(|url| super::predict_url(url))
            .collect::<Result<Vec<_>, _>>()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, members })
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Labels every text by majority vote, in input order.
    ///
    /// A member that fails for a chunk abstains for that chunk. A text that
    /// receives no votes at all is labelled `unknown`.
    pub async fn classify_batch(&self, texts: &[String]) -> Vec<ClassificationResult> {
        self.collect_votes(texts)
            .await
            .iter()
            .map(|votes| {
                majority_vote(votes, Sentiment::LABELS.len())
                    .and_then(Sentiment::from_index)
                    .map_or_else(ClassificationResult::unknown, ClassificationResult::label_only)
            })
            .collect()
    }

    /// Labels a single text.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NoVotes`] if every member failed.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let texts = [text.to_owned()];
        let votes = self.collect_votes(&texts).await;
        votes
            .first()
            .and_then(|v| majority_vote(v, Sentiment::LABELS.len()))
            .and_then(Sentiment::from_index)
            .map(ClassificationResult::label_only)
            .ok_or(ClassifierError::NoVotes)
    }

    /// Gathers one vote per responding member for every text.
    async fn collect_votes(&self, texts: &[String]) -> Vec<Vec<usize>> {
        let mut votes: Vec<Vec<usize>> = vec![Vec::with_capacity(self.members.len()); texts.len()];

        for (chunk_index, chunk) in texts.chunks(BATCH_SIZE).enumerate() {
            let offset = chunk_index * BATCH_SIZE;
            let predictions = join_all(
                self.members
                    .iter()
                    .map(|member| self.predict_chunk(member, chunk)),
            )
            .await;

            for (member, prediction) in self.members.iter().zip(predictions) {
                match prediction {
                    Ok(indices) => {
                        for (i, index) in indices.into_iter().enumerate() {
                            votes[offset + i].push(index);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            member = %member,
                            chunk = chunk_index,
                            error = %e,
                            "ensemble member abstained"
                        );
                    }
                }
            }
        }

        votes
    }

    /// Sends one chunk to a member and returns its predicted label indices.
    async fn predict_chunk(
        &self,
        member: &Url,
        chunk: &[String],
    ) -> Result<Vec<usize>, ClassifierError> {
        let response = self
            .client
            .post(member.clone())
            .json(&PredictRequest { inputs: chunk })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let logits: Vec<Vec<f32>> =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Deserialize {
                context: format!("ensemble member {member}"),
                source: e,
            })?;

        predictions_from_logits(&logits, chunk.len())
    }
}

/// Converts per-text logits into label indices, validating the shape.
fn predictions_from_logits(
    logits: &[Vec<f32>],
    expected: usize,
) -> Result<Vec<usize>, ClassifierError> {
    if logits.len() != expected {
        return Err(ClassifierError::CountMismatch {
            expected,
            got: logits.len(),
        });
    }

    logits
        .iter()
        .map(|row| {
            if row.len() != Sentiment::LABELS.len() {
                return Err(ClassifierError::LogitShape {
                    expected: Sentiment::LABELS.len(),
                    got: row.len(),
                });
            }
            argmax(row).ok_or(ClassifierError::LogitShape {
                expected: Sentiment::LABELS.len(),
                got: 0,
            })
        })
        .collect()
}
