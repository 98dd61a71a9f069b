// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use affect_engine::AnalysisPipeline;
use affect_store::LocalStore;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use maitri::config::DefaultsConfig;
use maitri::http::build_router;
use maitri::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "maitri-test-boundary";

fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        AnalysisPipeline::default(),
        Arc::new(LocalStore::new(dir.path())),
        DefaultsConfig::default(),
    );
    (build_router(state), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(uri: &str, parts: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, data) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn jpeg_frame() -> Vec<u8> {
    let mut frame = vec![0xFF, 0xD8, 0xFF, 0xE0];
    frame.resize(512, 0);
    frame
}

#[tokio::test]
async fn test_health_reports_online() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
}

#[tokio::test]
async fn test_chat_keyword_reply_and_context_echo() {
    let (app, _dir) = test_app();
    let (status, body) = send(
        &app,
        post_json("/chat", json!({"message": "I feel so tired today", "emotion_state": "sad"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().to_lowercase().contains("rest"));
    assert_eq!(body["emotion_context"], "sad");
}

#[tokio::test]
async fn test_chat_empty_emotion_state_counts_as_absent() {
    let (app, _dir) = test_app();
    let (status, body) = send(
        &app,
        post_json("/chat", json!({"message": "Just checking in", "emotion_state": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("I'm listening."));
}

#[tokio::test]
async fn test_analyze_without_model_degrades_visual_channel() {
    let (app, _dir) = test_app();
    let frame = jpeg_frame();
    let voice = vec![0u8; 1_000];
    let (status, body) = send(&app, multipart("/analyze", &[("frame", &frame), ("voice", &voice)])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["video_emotion"], "neutral");
    assert_eq!(body["audio_emotion"], "calm");
    // weighted video 0.36 beats weighted audio 0.28
    assert_eq!(body["emotion"], "neutral");
    assert!((body["confidence"].as_f64().unwrap() - 0.54).abs() < 1e-9);
    assert_eq!(body["alert_triggered"], false);
    assert_eq!(body["degraded"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_predict_returns_legacy_shape() {
    let (app, _dir) = test_app();
    let frame = jpeg_frame();
    let voice = vec![0u8; 1_000];
    let (status, body) = send(&app, multipart("/predict", &[("frame", &frame), ("voice", &voice)])).await;

    assert_eq!(status, StatusCode::OK);
    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(body["emotion"], "neutral");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_requires_both_fields() {
    let (app, _dir) = test_app();
    let frame = jpeg_frame();
    let (status, body) = send(&app, multipart("/analyze", &[("frame", &frame)])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_save_then_history() {
    let (app, _dir) = test_app();
    let session = json!({"emotion": "calm", "confidence": 0.8, "alert_triggered": false});
    let (status, body) = send(
        &app,
        post_json("/save", json!({"session_data": session, "user_id": "crew_2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["alert_file"].is_null());

    let (status, body) = send(
        &app,
        Request::get("/history/crew_2?limit=5").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["sessions"][0]["user_id"], "crew_2");
    assert_eq!(body["sessions"][0]["emotion"], "calm");
    assert!(body["sessions"][0]["saved_at"].is_string());
}

#[tokio::test]
async fn test_save_with_alert_writes_alert_files() {
    let (app, dir) = test_app();
    let session = json!({
        "emotion": "stressed",
        "confidence": 0.9,
        "video_emotion": "stressed",
        "audio_emotion": "stressed",
        "alert_triggered": true
    });
    let (status, body) = send(
        &app,
        post_json("/save", json!({"session_data": session, "user_id": "crew_3"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["alert_file"].is_string());

    let alerts: Vec<_> = std::fs::read_dir(dir.path().join("alerts"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(alerts.iter().any(|n| n.starts_with("alert_crew_3_") && n.ends_with(".json")));
    assert!(alerts.iter().any(|n| n.ends_with(".txt")));

    let json_name = alerts.iter().find(|n| n.ends_with(".json")).unwrap();
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("alerts").join(json_name)).unwrap())
            .unwrap();
    assert_eq!(saved["severity"], "critical");
}

#[tokio::test]
async fn test_save_rejects_non_object_and_bad_user() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, post_json("/save", json!({"session_data": [1, 2]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SESSION");

    let (status, body) = send(
        &app,
        post_json("/save", json!({"session_data": {}, "user_id": "../etc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_USER_ID");
}

#[tokio::test]
async fn test_history_for_unknown_user_is_empty() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Request::get("/history/nobody").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}
