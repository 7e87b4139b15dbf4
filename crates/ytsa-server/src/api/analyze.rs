use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use ytsa_sentiment::{AnalysisError, AnalysisResult};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

const MISSING_VIDEO_ID: &str = "Video ID is required";
const NO_COMMENTS: &str = "No comments found for this video";

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    video_id: Option<String>,
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let video_id = payload
        .ok()
        .and_then(|Json(body)| body.video_id)
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request(MISSING_VIDEO_ID))?;

    tracing::info!(request_id = %req_id.0, video_id = %video_id, "analyze request");

    let outcome = tokio::time::timeout(state.analyze_timeout, state.pipeline.analyze(&video_id))
        .await
        .map_err(|_| {
            tracing::error!(
                request_id = %req_id.0,
                video_id = %video_id,
                timeout_secs = state.analyze_timeout.as_secs(),
                "analysis timed out"
            );
            ApiError::internal(format!(
                "analysis timed out after {}s",
                state.analyze_timeout.as_secs()
            ))
        })?;

    outcome.map(Json).map_err(|e| map_analysis_error(&req_id.0, &e))
}

fn map_analysis_error(request_id: &str, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::NoData { video_id } => {
            tracing::info!(request_id, video_id = %video_id, "no comments for video");
            ApiError::not_found(NO_COMMENTS)
        }
        other => {
            tracing::error!(request_id, error = %other, "analysis failed");
            ApiError::internal(other.to_string())
        }
    }
}
