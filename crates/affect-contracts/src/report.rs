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

use crate::types::{Confidence, NormalizedLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record of one triggered alert. Built once by the alert engine
/// and handed to a store; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    pub alert_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub emotion: NormalizedLabel,
    pub confidence: Confidence,
    pub video_emotion: NormalizedLabel,
    pub audio_emotion: NormalizedLabel,
    pub severity: Severity,
    pub recommendation: String,
}

/// The parts of a client session that an alert report is built from.
///
/// Sessions arrive as loosely-typed JSON, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub emotion: Option<NormalizedLabel>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub video_emotion: Option<NormalizedLabel>,
    #[serde(default)]
    pub audio_emotion: Option<NormalizedLabel>,
    #[serde(default)]
    pub alert_triggered: bool,
}

impl SessionSnapshot {
    /// Extracts the known fields from arbitrary session JSON. Fields with the
    /// wrong type are treated as absent rather than rejecting the session.
    pub fn from_value(value: &Value) -> Self {
        let label = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(NormalizedLabel::from)
        };

        Self {
            emotion: label("emotion"),
            confidence: value.get("confidence").and_then(Value::as_f64),
            video_emotion: label("video_emotion"),
            audio_emotion: label("audio_emotion"),
            alert_triggered: value
                .get("alert_triggered")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}
