use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use ytsa_sentiment::{sample_analysis, AnalysisResult};

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct HealthData {
    status: &'static str,
    components: Components,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Components {
    data_ingestion: bool,
    data_transformation: bool,
    model_evaluator: bool,
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let ready = state.pipeline.readiness();
    Json(HealthData {
        status: "healthy",
        components: Components {
            data_ingestion: ready.ingestor,
            data_transformation: ready.cleaner,
            model_evaluator: ready.classifier,
        },
        timestamp: Utc::now(),
    })
}

pub(super) async fn sample_data() -> Json<AnalysisResult> {
    Json(sample_analysis())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::super::build_app;
    use super::super::test_support::{config, get, json_body, state};

    #[tokio::test]
    async fn health_reports_component_readiness() {
        let app = build_app(state(&config()));
        let response = app.oneshot(get("/api/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(
            body["components"],
            json!({
                "data_ingestion": false,
                "data_transformation": true,
                "model_evaluator": false
            })
        );
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn health_reflects_configured_components() {
        let mut cfg = config();
        cfg.youtube_api_key = Some("yt".to_string());
        cfg.classifier_url = Some("http://127.0.0.1:9".to_string());
        let app = build_app(state(&cfg));
        let body = json_body(app.oneshot(get("/api/health")).await.expect("response")).await;
        assert_eq!(body["components"]["data_ingestion"], true);
        assert_eq!(body["components"]["model_evaluator"], true);
    }

    #[tokio::test]
    async fn sample_data_is_static_analysis() {
        let app = build_app(state(&config()));
        let response = app
            .oneshot(get("/api/sample-data"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["video_id"], "sample_video");
        assert_eq!(body["total_comments"], 247);
        assert_eq!(
            body["sentiment_counts"],
            json!({"negative": 67, "neutral": 24, "positive": 156})
        );
        assert_eq!(body["comments"][0]["author"], "User1");
        assert_eq!(body["comments"][1]["sentiment"], "negative");
    }
}
