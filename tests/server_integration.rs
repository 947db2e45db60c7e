//! Server integration tests
//!
//! End-to-end tests against the real HTTP server bound to an ephemeral
//! port, covering the transform endpoint's success and error responses.

use pagoda_transformer::config::{Config, MetricErrorPolicy};
use pagoda_transformer::server::{app_state, router};
use serde_json::{json, Value};

/// Start the app on an ephemeral port and return its base URL.
async fn spawn_app(config: Config) -> String {
    let app = router(app_state(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

fn single_point_doc() -> Value {
    json!({
        "metric": {"k1": {
            "name": "cpu_usage",
            "labels": {"label": {"l1": {"name": "host", "value": "a"}}},
            "metric-points": {
                "metric-points-choice": {"value": 42.5, "timestamp": 1643723445}
            }
        }}
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_app(Config::default()).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_endpoint_mentions_transform_path() {
    let base = spawn_app(Config::default()).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains("/transform"));
}

#[tokio::test]
async fn test_transform_endpoint_returns_pagoda_document() {
    let base = spawn_app(Config::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/transform", base))
        .body(single_point_doc().to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body: Value = response.json().await.unwrap();
    let metric = &body["metrics"]["metric"][0];
    assert_eq!(metric["name"], "cpu_usage");
    assert_eq!(
        metric["metric-points"]["metric-points-choice"]["timestamp"],
        "2022-02-01T12:30:45Z"
    );
    assert_eq!(metric["metric-points"]["metric-points-choice"]["value"], "42.50");
    assert!(metric["label-set-id"].as_str().unwrap().len() == 16);
}

#[tokio::test]
async fn test_transform_endpoint_rejects_malformed_body() {
    let base = spawn_app(Config::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/transform", base))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_transform_endpoint_rejects_contract_violation() {
    let base = spawn_app(Config::default()).await;

    let body = json!({
        "metric": {"bad": {
            "name": "broken",
            "metric-points": {"metric-points-choice": {"samples": []}}
        }}
    });

    let response = reqwest::Client::new()
        .post(format!("{}/transform", base))
        .body(body.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_transform_endpoint_with_skip_policy() {
    let mut config = Config::default();
    config.transform.on_metric_error = MetricErrorPolicy::Skip;
    let base = spawn_app(config).await;

    let body = json!({
        "metric": {
            "bad": {
                "name": "broken",
                "metric-points": {"metric-points-choice": {"samples": []}}
            },
            "good": {
                "name": "cpu_usage",
                "metric-points": {
                    "metric-points-choice": {"value": 1.0, "timestamp": 0}
                }
            }
        }
    });

    let response = reqwest::Client::new()
        .post(format!("{}/transform", base))
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let metrics = body["metrics"]["metric"].as_array().unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0]["name"], "cpu_usage");
}

#[tokio::test]
async fn test_custom_transform_path() {
    let mut config = Config::default();
    config.server.path = "/convert".to_string();
    let base = spawn_app(config).await;

    let response = reqwest::Client::new()
        .post(format!("{}/convert", base))
        .body(single_point_doc().to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The default path is gone
    let response = reqwest::Client::new()
        .post(format!("{}/transform", base))
        .body(single_point_doc().to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
