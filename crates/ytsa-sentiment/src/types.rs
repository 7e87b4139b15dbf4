use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ytsa_core::RawComment;

use crate::clean::clean;

/// Sentiment label assigned to a comment.
///
/// Variant order matches the ensemble label indices (`negative`, `neutral`,
/// `positive`) and drives the key order of serialized count maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
    /// Classification failed for this comment.
    Unknown,
}

impl Sentiment {
    /// Fixed label ordering shared by every ensemble member.
    pub const LABELS: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::LABELS.get(index).copied()
    }

    /// Parses a provider label, ignoring ASCII case and surrounding space.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            "positive" => Some(Sentiment::Positive),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched comment plus its normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedComment {
    pub comment: RawComment,
    pub cleaned_text: String,
}

impl CleanedComment {
    #[must_use]
    pub fn from_raw(comment: RawComment) -> Self {
        let cleaned_text = clean(&comment.text);
        Self {
            comment,
            cleaned_text,
        }
    }

    #[must_use]
    pub fn with_classification(self, classification: ClassificationResult) -> AnalyzedComment {
        AnalyzedComment {
            comment: self.comment,
            cleaned_text: self.cleaned_text,
            classification,
        }
    }
}

/// Label plus optional per-class confidences for one comment.
///
/// Scores are `None` when the classifier failed or does not report
/// confidences (ensemble voting).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sentiment: Sentiment,
    pub positive_score: Option<f64>,
    pub negative_score: Option<f64>,
    pub neutral_score: Option<f64>,
}

impl ClassificationResult {
    #[must_use]
    pub fn unknown() -> Self {
        Self::label_only(Sentiment::Unknown)
    }

    #[must_use]
    pub fn label_only(sentiment: Sentiment) -> Self {
        Self {
            sentiment,
            positive_score: None,
            negative_score: None,
            neutral_score: None,
        }
    }
}

/// A cleaned comment joined with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedComment {
    pub comment: RawComment,
    pub cleaned_text: String,
    pub classification: ClassificationResult,
}

/// Per-comment record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub like_count: u64,
    pub positive_score: Option<f64>,
    pub negative_score: Option<f64>,
    pub neutral_score: Option<f64>,
}

impl From<&AnalyzedComment> for CommentView {
    fn from(analyzed: &AnalyzedComment) -> Self {
        let c = &analyzed.comment;
        let r = &analyzed.classification;
        Self {
            id: c.id.clone(),
            text: c.text.clone(),
            sentiment: r.sentiment,
            author: c.author.clone(),
            published_at: c.published_at,
            like_count: c.like_count,
            positive_score: r.positive_score,
            negative_score: r.negative_score,
            neutral_score: r.neutral_score,
        }
    }
}

/// Final record for one analyze request.
///
/// `sentiment_counts` sums to `total_comments`; each percentage is the
/// count share rounded to one decimal independently, so the percentages
/// need not add up to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub video_id: String,
    pub total_comments: usize,
    pub sentiment_counts: BTreeMap<Sentiment, usize>,
    pub sentiment_percentages: BTreeMap<Sentiment, f64>,
    pub comments: Vec<CommentView>,
    pub summary: String,
    pub keywords: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawComment {
        RawComment {
            id: "c1".to_string(),
            video_id: "v1".to_string(),
            text: text.to_string(),
            author: Some("someone".to_string()),
            published_at: "2024-01-15T10:30:00Z".parse().expect("timestamp"),
            like_count: 4,
        }
    }

    #[test]
    fn from_index_follows_fixed_label_order() {
        assert_eq!(Sentiment::from_index(0), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_index(1), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_index(2), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_index(3), None);
    }

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(Sentiment::from_label(" Positive "), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_label("NEGATIVE"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_label("unknown"), None);
        assert_eq!(Sentiment::from_label("LABEL_2"), None);
    }

    #[test]
    fn cleaned_comment_keeps_original_text() {
        let cleaned = CleanedComment::from_raw(raw("Hello, World!"));
        assert_eq!(cleaned.cleaned_text, "hello world");
        assert_eq!(cleaned.comment.text, "Hello, World!");
    }

    #[test]
    fn comment_view_serializes_absent_scores_as_null() {
        let analyzed = CleanedComment::from_raw(raw("meh"))
            .with_classification(ClassificationResult::unknown());
        let json = serde_json::to_value(CommentView::from(&analyzed)).expect("serialize");
        assert_eq!(json["sentiment"], "unknown");
        assert!(json["positive_score"].is_null());
        assert!(json["negative_score"].is_null());
        assert!(json["neutral_score"].is_null());
        assert_eq!(json["text"], "meh");
    }

    #[test]
    fn sentiment_map_keys_serialize_as_lowercase_strings() {
        let mut counts = BTreeMap::new();
        counts.insert(Sentiment::Positive, 2usize);
        counts.insert(Sentiment::Negative, 1usize);
        let json = serde_json::to_string(&counts).expect("serialize");
        assert_eq!(json, r#"{"negative":1,"positive":2}"#);
    }
}
