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

pub mod alert;
pub mod detectors;
pub mod fusion;
pub mod logging;
pub mod normalizer;
pub mod pipeline;
pub mod responder;

pub use alert::{alert_id, classify_severity, is_stress_emotion, recommendation, AlertEngine};
pub use detectors::{AudioHeuristicDetector, ChannelDetector, ExpressionModel, FrameDetector};
pub use fusion::FusionEngine;
pub use normalizer::{normalize, normalize_detection};
pub use pipeline::{AnalysisPipeline, CycleReport};
pub use responder::EmotionResponder;
