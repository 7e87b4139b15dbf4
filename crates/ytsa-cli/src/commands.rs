//! Command handlers. Each returns the JSON value to print.

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use ytsa_sentiment::{clean, sample_analysis, Classifier, Pipeline};

#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    text: &'a str,
    cleaned_text: String,
    #[serde(flatten)]
    result: ytsa_sentiment::ClassificationResult,
}

/// Runs the full pipeline for one video.
///
/// # Errors
///
/// Returns an error if config loading fails, `max_comments` is zero, or the
/// pipeline fails.
pub(crate) async fn run_analyze(video_id: &str, max_comments: Option<usize>) -> anyhow::Result<Value> {
    let config = ytsa_core::load_app_config()?;
    let limit = resolve_limit(max_comments, config.max_comments)?;
    let pipeline = Pipeline::from_config(&config);

    tracing::info!(video_id, limit, "analyzing video");
    let result = pipeline
        .analyze_with_limit(video_id, limit)
        .await
        .with_context(|| format!("analysis of video '{video_id}' failed"))?;

    Ok(serde_json::to_value(result)?)
}

/// Cleans and classifies one text, surfacing the classifier error if any.
///
/// # Errors
///
/// Returns an error if config loading fails, no classifier is configured,
/// or the classification call fails.
pub(crate) async fn run_classify(text: &str) -> anyhow::Result<Value> {
    let config = ytsa_core::load_app_config()?;
    let classifier = Classifier::from_config(&config)?;
    let cleaned_text = clean(text);

    tracing::info!(mode = %classifier.mode(), "classifying text");
    let result = classifier
        .classify_text(&cleaned_text)
        .await
        .context("classification failed")?;

    Ok(serde_json::to_value(ClassifyOutput {
        text,
        cleaned_text,
        result,
    })?)
}

pub(crate) fn run_clean(text: &str) -> Value {
    serde_json::json!({ "text": text, "cleaned_text": clean(text) })
}

/// # Errors
///
/// Returns an error if the sample cannot be serialized.
pub(crate) fn run_sample() -> anyhow::Result<Value> {
    Ok(serde_json::to_value(sample_analysis())?)
}

/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub(crate) fn render(value: &Value, compact: bool) -> anyhow::Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}

fn resolve_limit(requested: Option<usize>, configured: usize) -> anyhow::Result<usize> {
    let limit = requested.unwrap_or(configured);
    anyhow::ensure!(limit > 0, "--max-comments must be at least 1");
    Ok(limit)
}
