//! HTTP-level tests for `POST /api/tickets/classify/`.
//!
//! The language model is replaced by a stub and the pool never connects,
//! so these tests need neither network nor database.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app_with_classifier, build_test_app_with_config, lazy_pool, post_json,
    post_raw, test_config, StubModel,
};
use helpdesk_api::classifier::{ClassifierConfig, TicketClassifier, DEFAULT_MODEL};
use serde_json::json;
use tokio::net::TcpListener;

const CLASSIFY: &str = "/api/tickets/classify/";

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_description_returns_400_without_model_call() {
    let model = StubModel::replying(r#"{"category":"billing","priority":"high"}"#);
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model.clone()));

    let response = post_json(app, CLASSIFY, json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "description required");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn empty_description_returns_400_without_model_call() {
    let model = StubModel::replying(r#"{"category":"billing","priority":"high"}"#);
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model.clone()));

    let response = post_json(app, CLASSIFY, json!({"description": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn malformed_body_returns_400_without_model_call() {
    let model = StubModel::replying("{}");
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model.clone()));

    let response = post_raw(app, CLASSIFY, "description=hello").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(model.calls(), 0);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_api_key_returns_500() {
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::unconfigured());

    let response = post_json(app, CLASSIFY, json!({"description": "cannot log in"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

// ---------------------------------------------------------------------------
// Model output handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggestion_embedded_in_prose_is_parsed() {
    let model = StubModel::replying(
        "Here you go:\n```json\n{\"category\": \"billing\", \"priority\": \"high\"}\n```\nHope that helps!",
    );
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model.clone()));

    let response = post_json(app, CLASSIFY, json!({"description": "I was charged twice"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["suggested_category"], "billing");
    assert_eq!(json["suggested_priority"], "high");
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn partial_suggestion_leaves_missing_field_null() {
    let model = StubModel::replying(r#"{"category": "account"}"#);
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model));

    let response = post_json(app, CLASSIFY, json!({"description": "reset my password"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["suggested_category"], "account");
    assert!(json["suggested_priority"].is_null());
}

#[tokio::test]
async fn non_json_model_output_returns_200_with_nulls() {
    let model = StubModel::replying("I'm not sure how to classify this.");
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model));

    let response = post_json(app, CLASSIFY, json!({"description": "something odd"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["suggested_category"].is_null());
    assert!(json["suggested_priority"].is_null());
}

#[tokio::test]
async fn model_failure_returns_200_with_nulls() {
    let model = StubModel::failing();
    let app = build_test_app_with_classifier(lazy_pool(), TicketClassifier::with_model(model.clone()));

    let response = post_json(app, CLASSIFY, json!({"description": "app crashes on start"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["suggested_category"].is_null());
    assert!(json["suggested_priority"].is_null());
    assert_eq!(model.calls(), 1);
}

// ---------------------------------------------------------------------------
// Slow provider
// ---------------------------------------------------------------------------

/// Accept connections on a local port and never write a byte back.
async fn silent_listener() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    (url, handle)
}

#[tokio::test]
async fn hung_provider_returns_200_with_nulls_before_request_timeout() {
    let (api_url, server) = silent_listener().await;

    // Same ratio as the defaults: model timeout equal to request timeout.
    let mut config = test_config();
    config.request_timeout_secs = 2;
    config.classifier = ClassifierConfig {
        api_key: Some("test-key".to_string()),
        model: DEFAULT_MODEL.to_string(),
        api_url,
        timeout_secs: 2,
    };

    let classifier = TicketClassifier::from_config(&config).unwrap();
    let app = build_test_app_with_config(lazy_pool(), classifier, &config);

    let response = post_json(app, CLASSIFY, json!({"description": "hello"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["suggested_category"].is_null());
    assert!(json["suggested_priority"].is_null());

    server.abort();
}
