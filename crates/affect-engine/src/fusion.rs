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

//! Confidence-weighted merge of the video and audio channels.
//!
//! Video is the dominant channel (expression-based affect), audio the
//! secondary one (vocal affect). When both channels agree the weighted
//! confidence is boosted; when they disagree the channel with the larger
//! weighted confidence wins and its confidence is discounted. Ties go to
//! video.

use crate::logging::log_degradation;
use affect_contracts::{Channel, Confidence, DegradeReason, DetectionResult, Outcome};

pub const VIDEO_WEIGHT: f64 = 0.6;
pub const AUDIO_WEIGHT: f64 = 0.4;
/// Applied to the weighted sum when both channels report the same label.
pub const AGREEMENT_BOOST: f64 = 1.1;
/// Applied to the winning channel's confidence when the labels differ.
pub const DISAGREEMENT_PENALTY: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default)]
pub struct FusionEngine;

impl FusionEngine {
    pub const fn new() -> Self {
        Self
    }

    /// Never fails the caller. If the inputs cannot be fused the video
    /// result is returned verbatim, tagged as degraded.
    pub fn fuse(&self, video: &DetectionResult, audio: &DetectionResult) -> Outcome<DetectionResult> {
        match Self::try_fuse(video, audio) {
            Ok(fused) => Outcome::Ok(fused),
            Err(detail) => {
                let reason = DegradeReason::FusionFault { detail };
                log_degradation("fusion", &reason);
                Outcome::degraded(video.clone(), reason)
            }
        }
    }

    fn try_fuse(video: &DetectionResult, audio: &DetectionResult) -> Result<DetectionResult, String> {
        for (channel, confidence) in [
            (Channel::Video, video.confidence),
            (Channel::Audio, audio.confidence),
        ] {
            if !confidence.is_finite() {
                return Err(format!("{channel} confidence is not finite: {confidence}"));
            }
        }

        let weighted_video = video.confidence * VIDEO_WEIGHT;
        let weighted_audio = audio.confidence * AUDIO_WEIGHT;

        let fused = if video.label == audio.label {
            // clamp after the boost, never before
            DetectionResult {
                label: video.label.clone(),
                confidence: clamp_unit((weighted_video + weighted_audio) * AGREEMENT_BOOST),
            }
        } else if weighted_audio > weighted_video {
            DetectionResult {
                label: audio.label.clone(),
                confidence: clamp_unit(audio.confidence * DISAGREEMENT_PENALTY),
            }
        } else {
            DetectionResult {
                label: video.label.clone(),
                confidence: clamp_unit(video.confidence * DISAGREEMENT_PENALTY),
            }
        };

        Ok(fused)
    }
}

fn clamp_unit(confidence: Confidence) -> Confidence {
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_contracts::{EmotionLabel, NormalizedLabel};

    fn detection(label: EmotionLabel, confidence: f64) -> DetectionResult {
        DetectionResult::new(label, confidence)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn agreement_boosts_weighted_confidence() {
        let fused = FusionEngine::new()
            .fuse(
                &detection(EmotionLabel::Stressed, 0.8),
                &detection(EmotionLabel::Stressed, 0.8),
            )
            .into_value();
        assert_eq!(fused.label, NormalizedLabel::Known(EmotionLabel::Stressed));
        assert_close(fused.confidence, 0.88);
    }

    #[test]
    fn disagreement_discounts_the_stronger_channel() {
        let fused = FusionEngine::new()
            .fuse(
                &detection(EmotionLabel::Happy, 0.9),
                &detection(EmotionLabel::Sad, 0.5),
            )
            .into_value();
        assert_eq!(fused.label, NormalizedLabel::Known(EmotionLabel::Happy));
        assert_close(fused.confidence, 0.81);
    }

    #[test]
    fn audio_wins_when_strictly_stronger() {
        let fused = FusionEngine::new()
            .fuse(
                &detection(EmotionLabel::Neutral, 0.3),
                &detection(EmotionLabel::Anxious, 0.9),
            )
            .into_value();
        assert_eq!(fused.label, NormalizedLabel::Known(EmotionLabel::Anxious));
        assert_close(fused.confidence, 0.81);
    }

    #[test]
    fn non_finite_confidence_falls_back_to_video_verbatim() {
        let video = detection(EmotionLabel::Calm, 0.55);
        let outcome = FusionEngine::new().fuse(&video, &detection(EmotionLabel::Sad, f64::NAN));
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), video);
    }
}
