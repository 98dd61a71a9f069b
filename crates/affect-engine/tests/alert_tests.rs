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

use affect_contracts::{
    DegradeReason, EmotionLabel, NormalizedLabel, SessionSnapshot, Severity,
};
use affect_engine::alert::{classify_severity, recommendation, AlertEngine};
use chrono::{TimeZone, Utc};

fn label(label: EmotionLabel) -> NormalizedLabel {
    NormalizedLabel::Known(label)
}

fn stressed_session(confidence: f64) -> SessionSnapshot {
    SessionSnapshot {
        emotion: Some(label(EmotionLabel::Stressed)),
        confidence: Some(confidence),
        video_emotion: Some(label(EmotionLabel::Stressed)),
        audio_emotion: Some(label(EmotionLabel::Neutral)),
        alert_triggered: true,
    }
}

#[test]
fn test_alert_threshold_boundary() {
    let engine = AlertEngine::new();
    assert!(engine.should_alert(&label(EmotionLabel::Stressed), 0.70));
    assert!(!engine.should_alert(&label(EmotionLabel::Stressed), 0.6999));
    assert!(!engine.should_alert(&label(EmotionLabel::Happy), 0.99));
}

#[test]
fn test_only_the_stress_set_alerts() {
    let engine = AlertEngine::new();
    for emotion in EmotionLabel::ALL {
        let expected = matches!(
            emotion,
            EmotionLabel::Stressed | EmotionLabel::Anxious | EmotionLabel::Sad
        );
        assert_eq!(engine.should_alert(&label(emotion), 0.9), expected, "{emotion}");
    }
}

#[test]
fn test_decisions_do_not_depend_on_history() {
    let engine = AlertEngine::new();
    for _ in 0..5 {
        assert!(engine.should_alert(&label(EmotionLabel::Sad), 0.8));
        assert!(!engine.should_alert(&label(EmotionLabel::Sad), 0.5));
    }
}

#[test]
fn test_severity_boundaries() {
    assert_eq!(classify_severity(0.85), Severity::Critical);
    assert_eq!(classify_severity(0.8499), Severity::High);
    assert_eq!(classify_severity(0.75), Severity::High);
    assert_eq!(classify_severity(0.7499), Severity::Medium);
    assert_eq!(classify_severity(0.2), Severity::Medium);
}

#[test]
fn test_recommendation_is_total() {
    for emotion in EmotionLabel::ALL {
        assert!(!recommendation(&label(emotion)).is_empty());
    }
    let unknown = NormalizedLabel::Unrecognized("bored".into());
    assert!(!recommendation(&unknown).is_empty());
    assert_ne!(
        recommendation(&label(EmotionLabel::Stressed)),
        recommendation(&unknown)
    );
}

#[test]
fn test_build_report_from_complete_session() {
    let engine = AlertEngine::new();
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();

    let outcome = engine.build_report_at(&stressed_session(0.88), "astronaut_1", at);
    assert!(!outcome.is_degraded());

    let report = outcome.into_value();
    assert_eq!(report.alert_id, "alert_astronaut_1_20250601_083000");
    assert_eq!(report.user_id, "astronaut_1");
    assert_eq!(report.timestamp, at);
    assert_eq!(report.emotion, label(EmotionLabel::Stressed));
    assert_eq!(report.audio_emotion, label(EmotionLabel::Neutral));
    assert_eq!(report.severity, Severity::Critical);
    assert_eq!(
        report.recommendation,
        recommendation(&label(EmotionLabel::Stressed))
    );
}

#[test]
fn test_build_report_substitutes_defaults() {
    let engine = AlertEngine::new();
    let outcome = engine.build_report(&SessionSnapshot::default(), "astronaut_2");

    let (report, reason) = outcome.into_parts();
    assert_eq!(report.emotion, NormalizedLabel::unknown());
    assert_eq!(report.video_emotion, NormalizedLabel::unknown());
    assert_eq!(report.audio_emotion, NormalizedLabel::unknown());
    assert_eq!(report.confidence, 0.0);
    assert_eq!(report.severity, Severity::Medium);
    assert!(!report.recommendation.is_empty());

    match reason {
        Some(DegradeReason::MissingFields { fields }) => {
            assert_eq!(
                fields,
                vec!["emotion", "video_emotion", "audio_emotion", "confidence"]
            );
        }
        other => panic!("expected missing fields, got {other:?}"),
    }
}

#[test]
fn test_counter_tracks_reports_only() {
    let engine = AlertEngine::new();
    assert_eq!(engine.alerts_raised(), 0);

    engine.should_alert(&label(EmotionLabel::Anxious), 0.95);
    assert_eq!(engine.alerts_raised(), 0);

    engine.build_report(&stressed_session(0.8), "a");
    engine.build_report(&stressed_session(0.8), "b");
    assert_eq!(engine.alerts_raised(), 2);
}

#[test]
fn test_counter_is_safe_to_share() {
    let engine = std::sync::Arc::new(AlertEngine::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    engine.build_report(&stressed_session(0.8), &format!("user_{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(engine.alerts_raised(), 100);
}
