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

use affect_contracts::{AlertReport, Channel, DegradeReason, DetectionResult};
use tracing::{debug, info, warn};

pub fn log_detection(channel: Channel, result: &DetectionResult) {
    info!(
        channel = %channel,
        emotion = %result.label,
        confidence = result.confidence,
        "Channel detection"
    );
}

pub fn log_degradation(stage: &str, reason: &DegradeReason) {
    warn!(
        stage = stage,
        reason = %reason,
        "Degraded result"
    );
}

pub fn log_cycle(fused: &DetectionResult, alert_triggered: bool) {
    debug!(
        emotion = %fused.label,
        confidence = fused.confidence,
        alert_triggered = alert_triggered,
        "Analysis cycle complete"
    );
}

pub fn log_alert_report(report: &AlertReport, alerts_raised: u64) {
    info!(
        alert_id = %report.alert_id,
        user_id = %report.user_id,
        severity = %report.severity,
        alerts_raised = alerts_raised,
        "Alert report built"
    );
}
