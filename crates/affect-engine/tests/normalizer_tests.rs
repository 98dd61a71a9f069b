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

use affect_contracts::{EmotionLabel, NormalizedLabel};
use affect_engine::normalize;

#[test]
fn test_already_normalized_labels_are_unchanged() {
    for label in EmotionLabel::ALL {
        assert_eq!(normalize(label.as_str()), NormalizedLabel::Known(label));
    }
}

#[test]
fn test_normalization_is_case_insensitive() {
    assert_eq!(normalize("HAPPY"), NormalizedLabel::Known(EmotionLabel::Happy));
    assert_eq!(normalize("Angry"), NormalizedLabel::Known(EmotionLabel::Stressed));
    assert_eq!(normalize("SURPRISE"), NormalizedLabel::Known(EmotionLabel::Alert));
}

#[test]
fn test_unknown_labels_pass_through_lower_cased() {
    assert_eq!(
        normalize("Contempt"),
        NormalizedLabel::Unrecognized("contempt".to_string())
    );
    assert_eq!(normalize(""), NormalizedLabel::Unrecognized(String::new()));
    assert_eq!(normalize("Contempt").as_str(), "contempt");
}

#[test]
fn test_normalizing_twice_is_stable() {
    for raw in ["angry", "disgust", "fear", "surprise", "sad", "Bored"] {
        let once = normalize(raw);
        assert_eq!(normalize(once.as_str()), once);
    }
}
