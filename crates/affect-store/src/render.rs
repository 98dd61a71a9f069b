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

use affect_contracts::{AlertReport, Confidence};
use std::fmt;

const RULE_WIDTH: usize = 60;

/// `0.723` becomes `"72.30%"`.
pub fn format_percent(confidence: Confidence) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Human-readable view of a report, stored next to the JSON copy.
pub struct AlertText<'a>(pub &'a AlertReport);

impl fmt::Display for AlertText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "MAITRI ALERT REPORT")?;
        writeln!(f, "{rule}\n")?;
        writeln!(f, "Alert ID: {}", report.alert_id)?;
        writeln!(f, "User: {}", report.user_id)?;
        writeln!(f, "Timestamp: {}", report.timestamp.to_rfc3339())?;
        writeln!(f, "Severity: {}\n", report.severity.as_str().to_uppercase())?;
        writeln!(f, "Detected Emotion: {}", report.emotion)?;
        writeln!(f, "Confidence: {}", format_percent(report.confidence))?;
        writeln!(f, "Video Emotion: {}", report.video_emotion)?;
        writeln!(f, "Audio Emotion: {}\n", report.audio_emotion)?;
        writeln!(f, "Recommendation:")?;
        writeln!(f, "{}\n", report.recommendation)?;
        writeln!(f, "{rule}")
    }
}

pub fn render_alert_text(report: &AlertReport) -> String {
    AlertText(report).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_contracts::{EmotionLabel, NormalizedLabel, Severity};
    use chrono::{TimeZone, Utc};

    #[test]
    fn percent_uses_two_decimals() {
        assert_eq!(format_percent(0.723), "72.30%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn text_report_follows_the_template() {
        let report = AlertReport {
            alert_id: "alert_astronaut_1_20250601_083000".into(),
            user_id: "astronaut_1".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
            emotion: NormalizedLabel::Known(EmotionLabel::Sad),
            confidence: 0.723,
            video_emotion: NormalizedLabel::Known(EmotionLabel::Sad),
            audio_emotion: NormalizedLabel::Known(EmotionLabel::Neutral),
            severity: Severity::Medium,
            recommendation: "Recommend psychological support session.".into(),
        };

        let text = render_alert_text(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "MAITRI ALERT REPORT");
        assert_eq!(lines[4], "Alert ID: alert_astronaut_1_20250601_083000");
        assert_eq!(lines[6], "Timestamp: 2025-06-01T08:30:00+00:00");
        assert_eq!(lines[7], "Severity: MEDIUM");
        assert_eq!(lines[10], "Confidence: 72.30%");
        assert_eq!(lines[12], "Audio Emotion: neutral");
        assert_eq!(lines[14], "Recommendation:");
        assert_eq!(lines[15], "Recommend psychological support session.");
        assert_eq!(lines.last().copied(), Some("=".repeat(60).as_str()));
        assert!(text.ends_with(&format!("{}\n", "=".repeat(60))));
        assert_eq!(format!("{}", AlertText(&report)), text);
    }
}
