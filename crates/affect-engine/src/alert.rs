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

//! Alert triggering, severity tiers and recommendation text.
//!
//! Each cycle is judged on its own: there is no history, hysteresis or
//! cooldown, so a sustained stressed state raises one alert per cycle.

use crate::logging::{log_alert_report, log_degradation};
use affect_contracts::{
    AlertReport, Confidence, DegradeReason, EmotionLabel, NormalizedLabel, Outcome,
    SessionSnapshot, Severity,
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

pub const STRESS_THRESHOLD: Confidence = 0.70;
pub const CRITICAL_THRESHOLD: Confidence = 0.85;
pub const HIGH_THRESHOLD: Confidence = 0.75;

const STRESSED_RECOMMENDATION: &str =
    "Recommend immediate relaxation protocol. Consider breathing exercises and scheduled rest period.";
const ANXIOUS_RECOMMENDATION: &str =
    "Suggest anxiety management techniques. Review mission status and provide reassurance.";
const SAD_RECOMMENDATION: &str =
    "Recommend psychological support session. Consider connection with support team or loved ones.";
const GENERIC_RECOMMENDATION: &str = "Recommend monitoring and support session.";

/// Members of the stress set are the only labels that can raise an alert.
pub const fn is_stress_emotion(label: EmotionLabel) -> bool {
    match label {
        EmotionLabel::Stressed | EmotionLabel::Anxious | EmotionLabel::Sad => true,
        EmotionLabel::Happy | EmotionLabel::Neutral | EmotionLabel::Calm | EmotionLabel::Alert => {
            false
        }
    }
}

/// Total over every input; anything below the high tier (NaN included) is
/// `Medium`.
pub fn classify_severity(confidence: Confidence) -> Severity {
    if confidence >= CRITICAL_THRESHOLD {
        Severity::Critical
    } else if confidence >= HIGH_THRESHOLD {
        Severity::High
    } else {
        Severity::Medium
    }
}

pub const fn recommendation(label: &NormalizedLabel) -> &'static str {
    match label.known() {
        Some(EmotionLabel::Stressed) => STRESSED_RECOMMENDATION,
        Some(EmotionLabel::Anxious) => ANXIOUS_RECOMMENDATION,
        Some(EmotionLabel::Sad) => SAD_RECOMMENDATION,
        Some(
            EmotionLabel::Happy | EmotionLabel::Neutral | EmotionLabel::Calm | EmotionLabel::Alert,
        )
        | None => GENERIC_RECOMMENDATION,
    }
}

/// Identifier derived from the user and a second-resolution timestamp. Two
/// alerts for one user within the same second share an id.
pub fn alert_id(user_id: &str, at: DateTime<Utc>) -> String {
    format!("alert_{user_id}_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Decides whether a fused result warrants an alert and builds the report.
///
/// The only state is a diagnostic counter of reports built since the engine
/// was created. It never feeds back into a decision. Share one engine behind
/// an `Arc` or give each session its own.
#[derive(Debug, Default)]
pub struct AlertEngine {
    alerts_raised: AtomicU64,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_alert(&self, emotion: &NormalizedLabel, confidence: Confidence) -> bool {
        let Some(label) = emotion.known() else {
            return false;
        };

        // NaN compares false, which keeps a faulty confidence silent
        if is_stress_emotion(label) && confidence >= STRESS_THRESHOLD {
            warn!(
                emotion = %label,
                confidence = confidence,
                "ALERT: high {} detected with {:.2} confidence",
                label,
                confidence
            );
            return true;
        }

        false
    }

    pub fn build_report(&self, session: &SessionSnapshot, user_id: &str) -> Outcome<AlertReport> {
        self.build_report_at(session, user_id, Utc::now())
    }

    /// Missing session fields take their documented defaults (`"unknown"`
    /// labels, zero confidence) and the report comes back degraded.
    pub fn build_report_at(
        &self,
        session: &SessionSnapshot,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Outcome<AlertReport> {
        let raised = self.alerts_raised.fetch_add(1, Ordering::Relaxed) + 1;

        let mut missing = Vec::new();
        let mut label_or_unknown = |field: &str, value: &Option<NormalizedLabel>| {
            value.clone().unwrap_or_else(|| {
                missing.push(field.to_string());
                NormalizedLabel::unknown()
            })
        };

        let emotion = label_or_unknown("emotion", &session.emotion);
        let video_emotion = label_or_unknown("video_emotion", &session.video_emotion);
        let audio_emotion = label_or_unknown("audio_emotion", &session.audio_emotion);
        let confidence = session.confidence.unwrap_or_else(|| {
            missing.push("confidence".to_string());
            0.0
        });

        let report = AlertReport {
            alert_id: alert_id(user_id, at),
            user_id: user_id.to_string(),
            timestamp: at,
            severity: classify_severity(confidence),
            recommendation: recommendation(&emotion).to_string(),
            emotion,
            confidence,
            video_emotion,
            audio_emotion,
        };
        log_alert_report(&report, raised);

        if missing.is_empty() {
            Outcome::Ok(report)
        } else {
            let reason = DegradeReason::MissingFields { fields: missing };
            log_degradation("alert_report", &reason);
            Outcome::degraded(report, reason)
        }
    }

    pub fn alerts_raised(&self) -> u64 {
        self.alerts_raised.load(Ordering::Relaxed)
    }
}
