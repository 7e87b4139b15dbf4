//! Sentiment distribution statistics.

use std::collections::BTreeMap;

use crate::types::{AnalyzedComment, CommentView, Sentiment};

/// Label distribution for one batch of analyzed comments.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentStats {
    pub total_comments: usize,
    /// Only labels that occur at least once are present.
    pub counts: BTreeMap<Sentiment, usize>,
    pub percentages: BTreeMap<Sentiment, f64>,
}

/// Counts labels, computes per-label percentages, and builds the ordered
/// per-comment views.
///
/// Each percentage is rounded to one decimal independently; no
/// renormalization is applied, so the values may sum to 99.9 or 100.1.
/// An empty batch yields empty maps.
#[must_use]
pub fn aggregate(analyzed: &[AnalyzedComment]) -> (SentimentStats, Vec<CommentView>) {
    let total_comments = analyzed.len();

    let mut counts: BTreeMap<Sentiment, usize> = BTreeMap::new();
    for item in analyzed {
        *counts.entry(item.classification.sentiment).or_insert(0) += 1;
    }

    let percentages = counts
        .iter()
        .map(|(&label, &count)| (label, percentage(count, total_comments)))
        .collect();

    let views = analyzed.iter().map(CommentView::from).collect();

    (
        SentimentStats {
            total_comments,
            counts,
            percentages,
        },
        views,
    )
}

/// `round(count / total * 100, 1)`; `0.0` when `total` is zero.
///
/// Rounds the exact binary value of the share to one decimal with ties to
/// even, so `1/16` (exactly `6.25`) becomes `6.2`.
#[must_use]
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let share = count as f64 / total as f64 * 100.0;
    format!("{share:.1}").parse().unwrap_or(share)
}
