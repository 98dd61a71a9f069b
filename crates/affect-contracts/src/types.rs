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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector certainty, conventionally in `[0, 1]`. Not enforced at this level.
pub type Confidence = f64;

/// The fixed domain vocabulary of emotional states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Happy,
    Sad,
    Stressed,
    Anxious,
    Neutral,
    Calm,
    Alert,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Stressed,
        EmotionLabel::Anxious,
        EmotionLabel::Neutral,
        EmotionLabel::Calm,
        EmotionLabel::Alert,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Stressed => "stressed",
            EmotionLabel::Anxious => "anxious",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Calm => "calm",
            EmotionLabel::Alert => "alert",
        }
    }

    /// Case-insensitive lookup of a domain label. Detector vocabulary
    /// (`angry`, `fear`, ...) is not recognised here; see the normalizer.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "happy" => Some(EmotionLabel::Happy),
            "sad" => Some(EmotionLabel::Sad),
            "stressed" => Some(EmotionLabel::Stressed),
            "anxious" => Some(EmotionLabel::Anxious),
            "neutral" => Some(EmotionLabel::Neutral),
            "calm" => Some(EmotionLabel::Calm),
            "alert" => Some(EmotionLabel::Alert),
            _ => None,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label that has been through normalization.
///
/// Labels outside the domain vocabulary are kept (lower-cased) as
/// `Unrecognized` so callers can decide whether to accept them. Serialises
/// as a bare lower-case string in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NormalizedLabel {
    Known(EmotionLabel),
    Unrecognized(String),
}

impl NormalizedLabel {
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedLabel::Known(label) => label.as_str(),
            NormalizedLabel::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub const fn known(&self) -> Option<EmotionLabel> {
        match self {
            NormalizedLabel::Known(label) => Some(*label),
            NormalizedLabel::Unrecognized(_) => None,
        }
    }

    /// Placeholder used when a report has no label to record.
    pub fn unknown() -> Self {
        NormalizedLabel::Unrecognized("unknown".to_string())
    }
}

impl From<EmotionLabel> for NormalizedLabel {
    fn from(label: EmotionLabel) -> Self {
        NormalizedLabel::Known(label)
    }
}

impl From<String> for NormalizedLabel {
    fn from(s: String) -> Self {
        match EmotionLabel::parse(&s) {
            Some(label) => NormalizedLabel::Known(label),
            None => NormalizedLabel::Unrecognized(s.to_lowercase()),
        }
    }
}

impl From<&str> for NormalizedLabel {
    fn from(s: &str) -> Self {
        NormalizedLabel::from(s.to_string())
    }
}

impl From<NormalizedLabel> for String {
    fn from(label: NormalizedLabel) -> Self {
        match label {
            NormalizedLabel::Known(label) => label.as_str().to_string(),
            NormalizedLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for NormalizedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An independent detector feeding the fusion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Video,
    Audio,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Video => f.write_str("video"),
            Channel::Audio => f.write_str("audio"),
        }
    }
}

/// What a detector emits, in its own vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub label: String,
    pub confidence: Confidence,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// One channel's normalized observation for a single analysis cycle.
/// Fused results use the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub label: NormalizedLabel,
    pub confidence: Confidence,
}

impl DetectionResult {
    pub fn new(label: impl Into<NormalizedLabel>, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}
