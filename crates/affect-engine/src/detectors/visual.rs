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

use super::{failure, fallback, ChannelDetector, NO_SIGNAL_CONFIDENCE};
use affect_contracts::{AffectResult, Channel, Confidence, DegradeReason, Outcome, RawDetection};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    WebP,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
        };
        f.write_str(name)
    }
}

/// Identifies a still image by its leading signature bytes.
pub fn sniff_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(ImageFormat::WebP)
    } else if bytes.len() > 2 && bytes.starts_with(b"BM") {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}

/// A facial-expression classifier. Opaque to this crate.
pub trait ExpressionModel: Send + Sync {
    fn name(&self) -> &str;

    /// Per-emotion scores for the most prominent face, in the model's own
    /// vocabulary, or `None` when the frame contains no face.
    fn classify(
        &self,
        frame: &[u8],
        format: ImageFormat,
    ) -> AffectResult<Option<Vec<(String, Confidence)>>>;
}

/// Visual channel adapter. Without a model every readable frame yields the
/// no-signal fallback.
#[derive(Default)]
pub struct FrameDetector {
    model: Option<Box<dyn ExpressionModel>>,
}

impl FrameDetector {
    pub fn without_model() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Box<dyn ExpressionModel>) -> Self {
        tracing::info!(model = model.name(), "Expression model installed");
        Self { model: Some(model) }
    }
}

impl ChannelDetector for FrameDetector {
    fn channel(&self) -> Channel {
        Channel::Video
    }

    fn detect(&self, frame: &[u8]) -> Outcome<RawDetection> {
        let Some(format) = sniff_image_format(frame) else {
            return failure(Channel::Video, "unrecognised image data");
        };

        let Some(model) = &self.model else {
            return fallback(
                NO_SIGNAL_CONFIDENCE,
                DegradeReason::NoModel {
                    channel: Channel::Video,
                },
            );
        };

        match model.classify(frame, format) {
            Ok(Some(scores)) => match dominant(&scores) {
                Some((label, confidence)) => Outcome::Ok(RawDetection::new(label, confidence)),
                None => fallback(NO_SIGNAL_CONFIDENCE, DegradeReason::NoFace),
            },
            Ok(None) => fallback(NO_SIGNAL_CONFIDENCE, DegradeReason::NoFace),
            Err(e) => failure(Channel::Video, e.to_string()),
        }
    }
}

/// Highest finite score; the first-listed entry wins a tie.
fn dominant(scores: &[(String, Confidence)]) -> Option<(&str, Confidence)> {
    let mut best: Option<(&str, Confidence)> = None;
    for (label, score) in scores {
        if !score.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, top)| *score > top) {
            best = Some((label.as_str(), *score));
        }
    }
    best
}
