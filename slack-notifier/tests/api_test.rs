mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{bundled_static_dir, test_config, TEST_TOKEN};
use slack_notifier::config::{DEFAULT_MESSAGE, DEFAULT_RECIPIENT};
use slack_notifier::models::OutboundMessage;
use slack_notifier::services::{MessagingProvider, MockReply, MockSlackProvider};
use slack_notifier::startup::{build_provider, build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

fn router(
    token: Option<&str>,
    reply: MockReply,
    static_dir: PathBuf,
) -> (Router, Arc<MockSlackProvider>) {
    let provider = Arc::new(MockSlackProvider::new(reply));
    let config = test_config(token, "http://slack.invalid", static_dir);
    let state = AppState::new(config, provider.clone());
    (build_router(state), provider)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_trigger(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/trigger")
        .body(body)
        .unwrap()
}

// =============================================================================
// GET /
// =============================================================================

#[tokio::test]
async fn home_serves_bundled_index_page() {
    let (app, _) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let body = body_string(response).await;
    assert!(body.contains("action=\"/trigger\""));
}

#[tokio::test]
async fn home_reads_page_from_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>custom home</p>").unwrap();
    let (app, _) = router(Some(TEST_TOKEN), MockReply::Ok, dir.path().to_path_buf());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<p>custom home</p>");
}

#[tokio::test]
async fn home_without_index_file_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = router(Some(TEST_TOKEN), MockReply::Ok, dir.path().to_path_buf());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// POST /trigger
// =============================================================================

#[tokio::test]
async fn trigger_sends_fixed_message_and_renders_confirmation() {
    let (app, provider) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());

    let response = app.oneshot(post_trigger(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Slack bot triggered"));
    assert_eq!(provider.send_count(), 1);
    assert_eq!(
        provider.last_message(),
        Some(OutboundMessage::new(DEFAULT_RECIPIENT, DEFAULT_MESSAGE))
    );
}

#[tokio::test]
async fn trigger_ignores_request_body() {
    let (app, provider) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());

    let json = Request::builder()
        .method("POST")
        .uri("/trigger")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"slackId":"U999","name":"ignored"}"#))
        .unwrap();
    let response = app.clone().oneshot(json).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let garbage = post_trigger(Body::from("not json at all"));
    let response = app.oneshot(garbage).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The body never changes who gets the message
    assert_eq!(provider.send_count(), 2);
    assert_eq!(
        provider.last_message(),
        Some(OutboundMessage::new(DEFAULT_RECIPIENT, DEFAULT_MESSAGE))
    );
}

#[tokio::test]
async fn trigger_soft_failure_still_renders_confirmation() {
    let (app, provider) = router(
        Some(TEST_TOKEN),
        MockReply::SoftFailure("rate_limited".to_string()),
        bundled_static_dir(),
    );

    let response = app.oneshot(post_trigger(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Slack bot triggered"));
    assert_eq!(provider.send_count(), 1);
}

#[tokio::test]
async fn trigger_transport_error_is_bad_gateway() {
    let (app, _) = router(
        Some(TEST_TOKEN),
        MockReply::TransportError("network unreachable".to_string()),
        bundled_static_dir(),
    );

    let response = app.oneshot(post_trigger(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(!body.contains("Slack bot triggered"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("network unreachable"));
}

#[tokio::test]
async fn trigger_without_token_is_server_error_and_sends_nothing() {
    let (app, provider) = router(None, MockReply::Ok, bundled_static_dir());

    let response = app.oneshot(post_trigger(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"], "Configuration error");
    assert_eq!(provider.send_count(), 0);
}

#[tokio::test]
async fn trigger_rejects_get() {
    let (app, provider) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/trigger")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(provider.send_count(), 0);
}

// =============================================================================
// Health and readiness
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let (app, _) = router(None, MockReply::Ok, bundled_static_dir());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "slack-notifier");
}

#[tokio::test]
async fn readiness_follows_token_presence() {
    let ready = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .unwrap();
    let (app, _) = router(None, MockReply::Ok, bundled_static_dir());
    let response = app.oneshot(ready).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let ready = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .unwrap();
    let (app, _) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());
    let response = app.oneshot(ready).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _) = router(Some(TEST_TOKEN), MockReply::Ok, bundled_static_dir());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

// =============================================================================
// Provider selection
// =============================================================================

#[test]
fn disabled_slack_selects_mock_provider() {
    let mut config = test_config(Some(TEST_TOKEN), "http://slack.invalid", bundled_static_dir());
    config.slack.enabled = false;

    let provider = build_provider(&config).unwrap();

    assert_eq!(provider.name(), "mock");
}

#[test]
fn enabled_slack_selects_slack_provider() {
    let config = test_config(Some(TEST_TOKEN), "http://slack.invalid", bundled_static_dir());

    let provider = build_provider(&config).unwrap();

    assert_eq!(provider.name(), "slack");
}

#[tokio::test]
async fn dry_run_trigger_renders_confirmation_without_slack() {
    let mut config = test_config(Some(TEST_TOKEN), "http://127.0.0.1:1", bundled_static_dir());
    config.slack.enabled = false;
    let provider = build_provider(&config).unwrap();
    let app = build_router(AppState::new(config, provider));

    let response = app.oneshot(post_trigger(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Slack bot triggered"));
}
