//! HTTP request handlers
//!
//! Contains handlers for all HTTP endpoints.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::AppState;
use crate::error::AppResult;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Health status
    status: String,
    /// Application version
    version: String,
}

/// Root endpoint - displays basic info
pub async fn root(State(state): State<AppState>) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>pagoda-transformer</title>
</head>
<body>
    <h1>pagoda-transformer</h1>
    <p>Version: {}</p>
    <p>POST a Prometheus-shape metrics document to <code>{}</code>
       to receive the PAGODA-shape document.</p>
    <ul>
        <li><a href="/health">Health Check</a></li>
    </ul>
</body>
</html>"#,
        env!("CARGO_PKG_VERSION"),
        state.config.server.path
    );
    Html(html)
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Transform endpoint - decodes the request body, runs the transform engine
/// and responds with the encoded PAGODA-shape document
#[instrument(skip_all, name = "transform_handler")]
pub async fn transform(State(state): State<AppState>, body: Bytes) -> AppResult<impl IntoResponse> {
    let start = Instant::now();

    let input = state.codec.decode(&body)?;
    let metrics_in = input.metric.len();

    let report = state.engine.transform(&input)?;
    for skipped in &report.skipped {
        warn!(
            key = %skipped.key,
            error = %skipped.error,
            "Skipping metric with schema contract violation"
        );
    }

    let output = state.codec.encode(&report.document)?;

    debug!(
        duration_ms = start.elapsed().as_millis() as u64,
        metrics_in,
        metrics_out = report.document.metrics.metric.len(),
        skipped = report.skipped.len(),
        "Transform complete"
    );

    Ok((
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        output,
    ))
}
