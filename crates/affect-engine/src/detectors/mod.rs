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

//! Channel adapters that turn raw media into a label/confidence pair.
//!
//! Detectors never fail: an absent model or unreadable input yields the
//! documented neutral fallback, tagged as degraded.

pub mod audio;
pub mod visual;

pub use audio::AudioHeuristicDetector;
pub use visual::{sniff_image_format, ExpressionModel, FrameDetector, ImageFormat};

use crate::logging::log_degradation;
use affect_contracts::{Channel, Confidence, DegradeReason, Outcome, RawDetection};

/// Confidence reported when a channel has no model to consult.
pub const NO_SIGNAL_CONFIDENCE: Confidence = 0.6;
/// Confidence reported when a channel failed on its input.
pub const FAILURE_CONFIDENCE: Confidence = 0.5;

pub const FALLBACK_LABEL: &str = "neutral";

pub trait ChannelDetector: Send + Sync {
    fn channel(&self) -> Channel;
    fn detect(&self, payload: &[u8]) -> Outcome<RawDetection>;
}

pub(crate) fn fallback(confidence: Confidence, reason: DegradeReason) -> Outcome<RawDetection> {
    log_degradation("detector", &reason);
    Outcome::degraded(RawDetection::new(FALLBACK_LABEL, confidence), reason)
}

pub(crate) fn failure(channel: Channel, detail: impl Into<String>) -> Outcome<RawDetection> {
    fallback(
        FAILURE_CONFIDENCE,
        DegradeReason::DetectorFailure {
            channel,
            detail: detail.into(),
        },
    )
}
