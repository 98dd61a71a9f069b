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

//! Maps detector vocabulary onto the domain labels.

use affect_contracts::{DetectionResult, EmotionLabel, NormalizedLabel, RawDetection};

/// Total over all inputs: labels outside the table come back lower-cased as
/// [`NormalizedLabel::Unrecognized`].
pub fn normalize(raw_label: &str) -> NormalizedLabel {
    let lowered = raw_label.to_lowercase();
    let mapped = match lowered.as_str() {
        "angry" | "disgust" => Some(EmotionLabel::Stressed),
        "fear" => Some(EmotionLabel::Anxious),
        "surprise" => Some(EmotionLabel::Alert),
        other => EmotionLabel::parse(other),
    };

    match mapped {
        Some(label) => NormalizedLabel::Known(label),
        None => {
            tracing::debug!(label = %lowered, "Normalizer: unrecognised emotion label");
            NormalizedLabel::Unrecognized(lowered)
        }
    }
}

pub fn normalize_detection(raw: &RawDetection) -> DetectionResult {
    DetectionResult {
        label: normalize(&raw.label),
        confidence: raw.confidence,
    }
}
