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

use super::ChannelDetector;
use affect_contracts::{Channel, Outcome, RawDetection};

/// Recordings longer than this read as sustained, pressured speech.
pub const LONG_UTTERANCE_BYTES: usize = 100_000;
/// Recordings shorter than this read as brief, relaxed speech.
pub const SHORT_UTTERANCE_BYTES: usize = 50_000;

/// Length-based vocal affect heuristic. Stands in until a trained speech
/// emotion model is wired in behind [`ChannelDetector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioHeuristicDetector;

impl AudioHeuristicDetector {
    pub const fn new() -> Self {
        Self
    }
}

impl ChannelDetector for AudioHeuristicDetector {
    fn channel(&self) -> Channel {
        Channel::Audio
    }

    fn detect(&self, audio: &[u8]) -> Outcome<RawDetection> {
        let detection = match audio.len() {
            len if len > LONG_UTTERANCE_BYTES => RawDetection::new("stressed", 0.65),
            len if len < SHORT_UTTERANCE_BYTES => RawDetection::new("calm", 0.70),
            _ => RawDetection::new("neutral", 0.60),
        };
        Outcome::Ok(detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bands() {
        let detector = AudioHeuristicDetector::new();
        assert_eq!(
            detector.detect(&vec![0; LONG_UTTERANCE_BYTES + 1]).into_value(),
            RawDetection::new("stressed", 0.65)
        );
        assert_eq!(
            detector.detect(&vec![0; LONG_UTTERANCE_BYTES]).into_value(),
            RawDetection::new("neutral", 0.60)
        );
        assert_eq!(
            detector.detect(&vec![0; SHORT_UTTERANCE_BYTES]).into_value(),
            RawDetection::new("neutral", 0.60)
        );
        assert_eq!(
            detector.detect(&vec![0; SHORT_UTTERANCE_BYTES - 1]).into_value(),
            RawDetection::new("calm", 0.70)
        );
    }

    #[test]
    fn empty_audio_is_a_short_utterance() {
        let outcome = AudioHeuristicDetector::new().detect(&[]);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.into_value(), RawDetection::new("calm", 0.70));
    }
}
