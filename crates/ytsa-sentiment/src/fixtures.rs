//! Static sample analysis used by the demo endpoint and the CLI.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{AnalysisResult, CommentView, Sentiment};

/// A fixed, schema-conformant [`AnalysisResult`] for UI development.
///
/// Only the first two comments are included; the counts describe the full
/// 247-comment sample the numbers were taken from.
#[must_use]
pub fn sample_analysis() -> AnalysisResult {
    let sentiment_counts = BTreeMap::from([
        (Sentiment::Positive, 156),
        (Sentiment::Negative, 67),
        (Sentiment::Neutral, 24),
    ]);
    let sentiment_percentages = BTreeMap::from([
        (Sentiment::Positive, 63.2),
        (Sentiment::Negative, 27.1),
        (Sentiment::Neutral, 9.7),
    ]);

    AnalysisResult {
        video_id: "sample_video".to_string(),
        total_comments: 247,
        sentiment_counts,
        sentiment_percentages,
        comments: vec![
            CommentView {
                id: "1".to_string(),
                text: "This is absolutely amazing! Love the content 🔥".to_string(),
                sentiment: Sentiment::Positive,
                author: Some("User1".to_string()),
                published_at: at(10, 30),
                like_count: 15,
                positive_score: Some(0.85),
                negative_score: Some(0.05),
                neutral_score: Some(0.10),
            },
            CommentView {
                id: "2".to_string(),
                text: "Terrible video, waste of my time".to_string(),
                sentiment: Sentiment::Negative,
                author: Some("User2".to_string()),
                published_at: at(10, 25),
                like_count: 2,
                positive_score: Some(0.10),
                negative_score: Some(0.80),
                neutral_score: Some(0.10),
            },
        ],
        summary: "Viewers are mostly enthusiastic about the content and its presentation.\n\
                  Many comments praise the energy and editing.\n\
                  A vocal minority found the video too long or off-topic.\n\
                  Overall reception is clearly positive."
            .to_string(),
        keywords: vec![
            "amazing".to_string(),
            "content".to_string(),
            "editing".to_string(),
        ],
        analyzed_at: Utc::now(),
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
