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

use crate::error::{validate_user_id, StoreResult};
use crate::render::render_alert_text;
use crate::store::ReportStore;
use affect_contracts::AlertReport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::{info, warn};

const ALERTS_DIR: &str = "alerts";
const SESSIONS_DIR: &str = "sessions";
const SESSION_PREFIX: &str = "session_";
const SESSION_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

/// Filesystem store laid out as `<root>/alerts` and `<root>/sessions`.
///
/// Alert files are named after the alert id, so a second alert for the same
/// user within one second replaces the first.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn alerts_dir(&self) -> PathBuf {
        self.root.join(ALERTS_DIR)
    }

    fn sessions_dir(&self) -> PathBuf {
        self.root.join(SESSIONS_DIR)
    }

    pub async fn save_session_at(
        &self,
        session: &Value,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<String> {
        validate_user_id(user_id)?;

        let dir = self.sessions_dir();
        fs::create_dir_all(&dir).await?;

        let filename = format!(
            "{SESSION_PREFIX}{user_id}_{}.json",
            at.format(SESSION_TIMESTAMP_FORMAT)
        );
        let path = dir.join(filename);
        fs::write(&path, serde_json::to_string_pretty(session)?).await?;

        let locator = path.display().to_string();
        info!(user_id = user_id, locator = %locator, "Session saved locally");
        Ok(locator)
    }

    async fn session_files(&self, user_id: &str) -> StoreResult<Vec<(PathBuf, SystemTime)>> {
        let mut entries = match fs::read_dir(self.sessions_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if session_owner(name) != Some(user_id) {
                continue;
            }
            let modified = entry
                .metadata()
                .await
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((entry.path(), modified));
        }

        // newest first; the timestamped name breaks mtime ties
        files.sort_by(|(a_path, a_time), (b_path, b_time)| {
            b_time.cmp(a_time).then_with(|| b_path.cmp(a_path))
        });
        Ok(files)
    }
}

/// Owner of a session file named `session_<user>_<YYYYmmdd>_<HHMMSS>_<ms>.json`.
/// Names without the millisecond part, as older writers produced them, are
/// accepted too.
fn session_owner(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_prefix(SESSION_PREFIX)?
        .strip_suffix(".json")?;

    let mut parts = stem.rsplitn(4, '_');
    let (Some(last), Some(time), Some(date)) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if is_digits(last, 3) && is_digits(time, 6) && is_digits(date, 8) {
        return parts.next();
    }

    let mut parts = stem.rsplitn(3, '_');
    let (Some(time), Some(date), owner) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if is_digits(time, 6) && is_digits(date, 8) {
        owner
    } else {
        None
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl ReportStore for LocalStore {
    fn backend(&self) -> &str {
        "local"
    }

    async fn save_alert(&self, report: &AlertReport) -> StoreResult<String> {
        validate_user_id(&report.user_id)?;

        let dir = self.alerts_dir();
        fs::create_dir_all(&dir).await?;

        let json_path = dir.join(format!("{}.json", report.alert_id));
        fs::write(&json_path, serde_json::to_string_pretty(report)?).await?;

        let text_path = dir.join(format!("{}.txt", report.alert_id));
        fs::write(&text_path, render_alert_text(report)).await?;

        let locator = json_path.display().to_string();
        info!(alert_id = %report.alert_id, locator = %locator, "Alert saved");
        Ok(locator)
    }

    async fn save_session(&self, session: &Value, user_id: &str) -> StoreResult<String> {
        self.save_session_at(session, user_id, Utc::now()).await
    }

    async fn user_sessions(&self, user_id: &str, limit: usize) -> StoreResult<Vec<Value>> {
        validate_user_id(user_id)?;

        let mut sessions = Vec::new();
        for (path, _) in self.session_files(user_id).await?.into_iter().take(limit) {
            let parsed = match fs::read_to_string(&path).await {
                Ok(content) => serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(session) => sessions.push(session),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable session file"),
            }
        }
        Ok(sessions)
    }
}
