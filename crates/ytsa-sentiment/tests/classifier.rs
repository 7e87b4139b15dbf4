//! Integration tests for the hosted and ensemble classifiers using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytsa_sentiment::{
    ClassificationResult, Classifier, ClassifierError, EnsembleClassifier, HostedClassifier,
    Sentiment,
};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

async fn mount_logits(server: &MockServer, member: &str, logits: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/{member}/predict")))
        .respond_with(ResponseTemplate::new(200).set_body_json(logits))
        .mount(server)
        .await;
}

fn ensemble(server: &MockServer, members: &[&str]) -> EnsembleClassifier {
    let urls: Vec<String> = members
        .iter()
        .map(|m| format!("{}/{m}", server.uri()))
        .collect();
    EnsembleClassifier::new(&urls, 5, "ytsa-test").expect("ensemble")
}

#[tokio::test]
async fn hosted_classify_posts_text_and_reads_confidences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "text": "great stuff" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "label": "positive",
            "confidences": [
                {"label": "positive", "confidence": 0.85},
                {"label": "neutral", "confidence": 0.10},
                {"label": "negative", "confidence": 0.05}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hosted = HostedClassifier::new(&server.uri(), 2, 5, "ytsa-test").expect("client");
    let result = hosted.classify("great stuff").await.expect("classified");

    assert_eq!(result.sentiment, Sentiment::Positive);
    assert!((result.positive_score.expect("pos") - 0.85).abs() < 1e-9);
    assert!((result.neutral_score.expect("neu") - 0.10).abs() < 1e-9);
    assert!((result.negative_score.expect("neg") - 0.05).abs() < 1e-9);
}

#[tokio::test]
async fn hosted_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let hosted = HostedClassifier::new(&server.uri(), 2, 5, "ytsa-test").expect("client");
    let err = hosted.classify("x").await.unwrap_err();
    assert!(matches!(err, ClassifierError::UnexpectedStatus { status: 502 }));
}

#[tokio::test]
async fn hosted_batch_preserves_order_and_isolates_failures() {
    let server = MockServer::start().await;
    for (text, label) in [("a", "negative"), ("c", "neutral"), ("d", "positive")] {
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({ "text": text })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": label })))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "text": "b" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let hosted = HostedClassifier::new(&server.uri(), 3, 5, "ytsa-test").expect("client");
    let results = hosted.classify_batch(&texts(&["a", "b", "c", "d"])).await;

    let labels: Vec<Sentiment> = results.iter().map(|r| r.sentiment).collect();
    assert_eq!(
        labels,
        vec![
            Sentiment::Negative,
            Sentiment::Unknown,
            Sentiment::Neutral,
            Sentiment::Positive
        ]
    );
    assert_eq!(results[1], ClassificationResult::unknown());
}

#[tokio::test]
async fn ensemble_majority_vote_picks_most_common_label() {
    let server = MockServer::start().await;
    mount_logits(&server, "m1", json!([[0.1, 0.2, 0.9], [2.0, 0.1, 0.1]])).await;
    mount_logits(&server, "m2", json!([[0.1, 0.2, 0.9], [0.1, 3.0, 0.1]])).await;
    mount_logits(&server, "m3", json!([[1.0, 0.2, 0.3], [0.5, 0.1, 0.1]])).await;

    let results = ensemble(&server, &["m1", "m2", "m3"])
        .classify_batch(&texts(&["first", "second"]))
        .await;

    assert_eq!(results[0], ClassificationResult::label_only(Sentiment::Positive));
    assert_eq!(results[1], ClassificationResult::label_only(Sentiment::Negative));
    assert!(results.iter().all(|r| r.positive_score.is_none()));
}

#[tokio::test]
async fn ensemble_tie_resolves_to_lowest_label_index() {
    let server = MockServer::start().await;
    mount_logits(&server, "m1", json!([[0.0, 0.0, 1.0]])).await;
    mount_logits(&server, "m2", json!([[0.0, 1.0, 0.0]])).await;
    mount_logits(&server, "m3", json!([[1.0, 0.0, 0.0]])).await;

    let results = ensemble(&server, &["m1", "m2", "m3"])
        .classify_batch(&texts(&["split decision"]))
        .await;
    assert_eq!(results[0].sentiment, Sentiment::Negative);
}

#[tokio::test]
async fn failing_member_abstains() {
    let server = MockServer::start().await;
    mount_logits(&server, "m1", json!([[0.0, 0.0, 1.0]])).await;
    mount_logits(&server, "m2", json!([[0.0, 1.0, 0.0]])).await;
    Mock::given(method("POST"))
        .and(path("/m3/predict"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let results = ensemble(&server, &["m1", "m2", "m3"])
        .classify_batch(&texts(&["x"]))
        .await;
    assert_eq!(results[0].sentiment, Sentiment::Neutral);
}

#[tokio::test]
async fn no_responding_member_yields_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let classifier = ensemble(&server, &["m1", "m2"]);
    let results = classifier.classify_batch(&texts(&["x", "y"])).await;
    assert!(results.iter().all(|r| *r == ClassificationResult::unknown()));

    let err = classifier.classify("x").await.unwrap_err();
    assert!(matches!(err, ClassifierError::NoVotes));
}

#[tokio::test]
async fn ensemble_sends_inputs_in_chunks_of_64() {
    let server = MockServer::start().await;
    let first: Vec<String> = (0..64).map(|i| format!("t{i}")).collect();
    let second: Vec<String> = (64..70).map(|i| format!("t{i}")).collect();

    Mock::given(method("POST"))
        .and(path("/m1/predict"))
        .and(body_json(json!({ "inputs": first })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vec![vec![0.0, 0.0, 1.0]; 64]),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/m1/predict"))
        .and(body_json(json!({ "inputs": second })))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![vec![1.0, 0.0, 0.0]; 6]))
        .expect(1)
        .mount(&server)
        .await;

    let all: Vec<String> = first.iter().chain(second.iter()).cloned().collect();
    let results = ensemble(&server, &["m1"]).classify_batch(&all).await;

    assert_eq!(results.len(), 70);
    assert!(results[..64]
        .iter()
        .all(|r| r.sentiment == Sentiment::Positive));
    assert!(results[64..]
        .iter()
        .all(|r| r.sentiment == Sentiment::Negative));
}

#[tokio::test]
async fn member_with_wrong_prediction_count_abstains() {
    let server = MockServer::start().await;
    mount_logits(&server, "m1", json!([[0.0, 0.0, 1.0]])).await;
    mount_logits(&server, "m2", json!([[0.0, 1.0, 0.0], [0.0, 1.0, 0.0]])).await;

    let results = ensemble(&server, &["m1", "m2"])
        .classify_batch(&texts(&["a", "b"]))
        .await;
    assert!(results.iter().all(|r| r.sentiment == Sentiment::Neutral));
}

#[tokio::test]
async fn classifier_enum_dispatches_single_text() {
    let server = MockServer::start().await;
    mount_logits(&server, "m1", json!([[0.0, 0.0, 1.0]])).await;

    let classifier = Classifier::Ensemble(ensemble(&server, &["m1"]));
    let result = classifier.classify_text("hello").await.expect("vote");
    assert_eq!(result.sentiment, Sentiment::Positive);
}
