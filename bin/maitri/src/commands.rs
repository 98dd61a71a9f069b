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

//! Offline commands that run one cycle or read history without the server.

use crate::http::routes::AnalyzeResponse;
use crate::state::AppState;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Result of analyzing one frame and voice clip from disk.
#[derive(Debug)]
pub struct FileAnalysis {
    pub response: AnalyzeResponse,
    /// Locator of the persisted alert report, when the cycle raised one.
    pub alert_locator: Option<String>,
}

pub async fn analyze_files(
    state: &AppState,
    frame: &Path,
    voice: &Path,
    user: Option<&str>,
) -> Result<FileAnalysis> {
    let frame_bytes = tokio::fs::read(frame)
        .await
        .with_context(|| format!("reading frame {}", frame.display()))?;
    let voice_bytes = tokio::fs::read(voice)
        .await
        .with_context(|| format!("reading voice clip {}", voice.display()))?;

    let cycle = state.pipeline.analyze(&frame_bytes, &voice_bytes);
    let mut alert_locator = None;
    if cycle.alert_triggered {
        let user_id = user.unwrap_or(&state.defaults.user_id);
        let (report, reason) = state
            .pipeline
            .raise_alert(&cycle.session_snapshot(), user_id)
            .into_parts();
        if let Some(reason) = reason {
            warn!(reason = %reason, "Alert built from incomplete session");
        }
        let locator = state.store.save_alert(&report).await?;
        info!(alert_id = %report.alert_id, locator = %locator, severity = %report.severity, "Alert raised");
        alert_locator = Some(locator);
    }

    Ok(FileAnalysis {
        response: AnalyzeResponse::from(cycle),
        alert_locator,
    })
}

pub async fn user_history(state: &AppState, user: Option<&str>, limit: Option<usize>) -> Result<Vec<Value>> {
    let user_id = user.unwrap_or(&state.defaults.user_id);
    let limit = limit.unwrap_or(state.defaults.history_limit);
    Ok(state.store.user_sessions(user_id, limit).await?)
}
