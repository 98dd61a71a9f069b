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

use crate::http::error::ApiError;
use crate::state::AppState;
use affect_contracts::SessionSnapshot;
use affect_engine::{normalize, CycleReport};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

/// Frames and voice clips are uploaded whole.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub emotion: String,
    pub confidence: f64,
    pub video_emotion: String,
    pub audio_emotion: String,
    pub message: String,
    pub timestamp: String,
    pub alert_triggered: bool,
    pub degraded: Vec<String>,
}

impl From<CycleReport> for AnalyzeResponse {
    fn from(cycle: CycleReport) -> Self {
        Self {
            emotion: cycle.fused.label.to_string(),
            confidence: cycle.fused.confidence,
            video_emotion: cycle.video.label.to_string(),
            audio_emotion: cycle.audio.label.to_string(),
            message: cycle.message,
            timestamp: cycle.timestamp.to_rfc3339(),
            alert_triggered: cycle.alert_triggered,
            degraded: cycle.degradations.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub emotion_state: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion_context: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub session_data: Value,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze))
        .route("/predict", post(predict))
        .route("/chat", post(chat))
        .route("/save", post(save_session))
        .route("/history/{user_id}", get(history))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "MAITRI AI Assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn read_media(mut multipart: Multipart) -> Result<(Vec<u8>, Vec<u8>), ApiError> {
    let mut frame = None;
    let mut voice = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("frame") => frame = Some(field.bytes().await?.to_vec()),
            Some("voice") => voice = Some(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    let frame = frame.ok_or_else(|| ApiError::bad_request("MISSING_FIELD", "multipart field 'frame' is required"))?;
    let voice = voice.ok_or_else(|| ApiError::bad_request("MISSING_FIELD", "multipart field 'voice' is required"))?;
    Ok((frame, voice))
}

async fn run_cycle(state: &AppState, multipart: Multipart) -> Result<CycleReport, ApiError> {
    let (frame, voice) = read_media(multipart).await?;
    info!(frame_bytes = frame.len(), voice_bytes = voice.len(), "Received analyze request");
    let cycle = state.pipeline.analyze(&frame, &voice);
    info!(emotion = %cycle.fused.label, alert_triggered = cycle.alert_triggered, "Analysis complete");
    Ok(cycle)
}

async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let cycle = run_cycle(&state, multipart).await?;
    Ok(Json(cycle.into()))
}

/// Legacy shape kept for older clients.
async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let cycle = run_cycle(&state, multipart).await?;
    Ok(Json(json!({
        "emotion": cycle.fused.label.to_string(),
        "message": cycle.message,
    })))
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let user_id = request.user_id.as_deref().unwrap_or(&state.defaults.user_id);
    info!(user_id = user_id, "Chat request");

    let emotion = request
        .emotion_state
        .as_deref()
        .filter(|label| !label.is_empty())
        .map(normalize);
    let reply = state
        .pipeline
        .responder()
        .reply(&request.message, emotion.as_ref(), &mut rand::thread_rng());

    Json(ChatResponse {
        reply,
        emotion_context: request.emotion_state,
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn save_session(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = request.user_id.unwrap_or_else(|| state.defaults.user_id.clone());
    let Value::Object(mut session) = request.session_data else {
        return Err(ApiError::bad_request("INVALID_SESSION", "session_data must be a JSON object"));
    };
    info!(user_id = %user_id, "Saving session");

    session.insert("saved_at".to_string(), json!(Utc::now().to_rfc3339()));
    session.insert("user_id".to_string(), json!(user_id));
    let session = Value::Object(session);

    let file_id = state.store.save_session(&session, &user_id).await?;

    let snapshot = SessionSnapshot::from_value(&session);
    let mut alert_file = None;
    if snapshot.alert_triggered {
        let report = state.pipeline.raise_alert(&snapshot, &user_id).into_value();
        // a failed alert write must not lose the session that was already stored
        match state.store.save_alert(&report).await {
            Ok(locator) => alert_file = Some(locator),
            Err(e) => error!(alert_id = %report.alert_id, error = %e, "Error saving alert"),
        }
    }

    info!(file_id = %file_id, "Session saved");
    Ok(Json(json!({
        "status": "success",
        "file_id": file_id,
        "alert_file": alert_file,
        "message": "Session data saved successfully",
    })))
}

async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = query.limit.unwrap_or(state.defaults.history_limit);
    info!(user_id = %user_id, limit = limit, "Fetching history");

    let sessions = state.store.user_sessions(&user_id, limit).await?;
    Ok(Json(json!({
        "user_id": user_id,
        "count": sessions.len(),
        "sessions": sessions,
    })))
}
