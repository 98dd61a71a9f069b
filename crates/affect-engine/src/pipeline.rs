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

//! One analysis cycle: detect, normalize, fuse, judge, respond.

use crate::alert::AlertEngine;
use crate::detectors::{AudioHeuristicDetector, ChannelDetector, FrameDetector};
use crate::fusion::FusionEngine;
use crate::logging::{log_cycle, log_detection};
use crate::normalizer::normalize_detection;
use crate::responder::EmotionResponder;
use affect_contracts::{
    AlertReport, DegradeReason, DetectionResult, Outcome, SessionSnapshot,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub video: DetectionResult,
    pub audio: DetectionResult,
    pub fused: DetectionResult,
    pub alert_triggered: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub degradations: Vec<DegradeReason>,
}

impl CycleReport {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            emotion: Some(self.fused.label.clone()),
            confidence: Some(self.fused.confidence),
            video_emotion: Some(self.video.label.clone()),
            audio_emotion: Some(self.audio.label.clone()),
            alert_triggered: self.alert_triggered,
        }
    }
}

pub struct AnalysisPipeline {
    visual: Box<dyn ChannelDetector>,
    audio: Box<dyn ChannelDetector>,
    fusion: FusionEngine,
    alerts: AlertEngine,
    responder: EmotionResponder,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(
            Box::new(FrameDetector::without_model()),
            Box::new(AudioHeuristicDetector::new()),
        )
    }
}

impl AnalysisPipeline {
    pub fn new(visual: Box<dyn ChannelDetector>, audio: Box<dyn ChannelDetector>) -> Self {
        Self {
            visual,
            audio,
            fusion: FusionEngine::new(),
            alerts: AlertEngine::new(),
            responder: EmotionResponder::new(),
        }
    }

    pub fn analyze(&self, frame: &[u8], voice: &[u8]) -> CycleReport {
        self.analyze_with_rng(frame, voice, &mut rand::thread_rng())
    }

    /// Never fails. Every fallback taken along the way is listed in
    /// [`CycleReport::degradations`].
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        frame: &[u8],
        voice: &[u8],
        rng: &mut R,
    ) -> CycleReport {
        let mut degradations = Vec::new();
        let video = Self::observe(self.visual.as_ref(), frame, &mut degradations);
        let audio = Self::observe(self.audio.as_ref(), voice, &mut degradations);

        let (fused, fusion_fault) = self.fusion.fuse(&video, &audio).into_parts();
        degradations.extend(fusion_fault);

        let alert_triggered = self.alerts.should_alert(&fused.label, fused.confidence);
        let message = self.responder.emotion_response(&fused.label, rng);
        log_cycle(&fused, alert_triggered);

        CycleReport {
            video,
            audio,
            fused,
            alert_triggered,
            message,
            timestamp: Utc::now(),
            degradations,
        }
    }

    fn observe(
        detector: &dyn ChannelDetector,
        payload: &[u8],
        degradations: &mut Vec<DegradeReason>,
    ) -> DetectionResult {
        let (raw, reason) = detector.detect(payload).into_parts();
        degradations.extend(reason);
        let result = normalize_detection(&raw);
        log_detection(detector.channel(), &result);
        result
    }

    pub fn raise_alert(&self, session: &SessionSnapshot, user_id: &str) -> Outcome<AlertReport> {
        self.alerts.build_report(session, user_id)
    }

    pub const fn alerts(&self) -> &AlertEngine {
        &self.alerts
    }

    pub const fn responder(&self) -> &EmotionResponder {
        &self.responder
    }
}
