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

//! Template-based empathetic replies. Non-generative.

use affect_contracts::{EmotionLabel, NormalizedLabel};
use rand::seq::SliceRandom;
use rand::Rng;

const STRESSED: [&str; 3] = [
    "I sense you might be feeling stressed. Remember, you're doing amazing work up there. Would you like to try a breathing exercise?",
    "It's completely normal to feel overwhelmed sometimes. Let's take a moment together. How can I help you relax?",
    "Your stress levels seem elevated. You're incredibly strong for handling everything you do. Want to talk about what's on your mind?",
];

const ANXIOUS: [&str; 3] = [
    "I'm here with you. Feeling anxious in space is natural. Let's work through this together.",
    "Your safety is my priority. Everything is functioning normally. Would you like to review the mission status?",
    "Anxiety can be challenging, but you've trained for this. Let me help you find your center.",
];

const HAPPY: [&str; 3] = [
    "It's wonderful to see you in good spirits! Your positive energy is inspiring.",
    "I'm so glad you're feeling well! Keep up that amazing attitude.",
    "Your happiness is contagious! How are things going with your tasks today?",
];

const SAD: [&str; 3] = [
    "I'm here for you. It's okay to feel sad sometimes, even in space. Want to talk about it?",
    "You're not alone up there. I'm always here to listen. What's weighing on your mind?",
    "Missing home is natural. Let me share something that might lift your spirits.",
];

const NEUTRAL: [&str; 3] = [
    "How are you feeling today? I'm here to support you in any way you need.",
    "Everything seems stable. Is there anything specific you'd like to discuss or any support you need?",
    "I'm monitoring your well-being. Feel free to share anything on your mind.",
];

const CALM: [&str; 3] = [
    "You seem peaceful and centered. That's excellent! Keep maintaining this wonderful state.",
    "Your calm demeanor is admirable. Is there anything you'd like to do to maintain this feeling?",
    "It's great to see you so relaxed. How can I support your well-being today?",
];

const SUPPORT_REPLY: &str = "I'm here to support you. Would you like to try some relaxation techniques, or would you prefer to talk about what's bothering you?";
const LONELY_REPLY: &str = "I understand that being away from loved ones is difficult. Remember, you're part of an incredible mission, and many people are rooting for you. I'm always here to keep you company.";
const TIRED_REPLY: &str = "Rest is crucial for your well-being. Have you been maintaining your sleep schedule? I can help you set up a better rest routine if needed.";
const THANKS_REPLY: &str = "You're very welcome! Supporting you is my primary purpose. Is there anything else I can help you with?";
const GREETING_REPLY: &str = "I'm functioning optimally and always ready to assist you! More importantly, how are YOU feeling today?";
const LISTENING_REPLY: &str = "I'm listening. Tell me more about what's on your mind, and I'll do my best to help.";

/// Keyword groups checked in order; the first group with a match wins.
const KEYWORD_REPLIES: [(&[&str], &str); 5] = [
    (&["help", "stress", "overwhelm"], SUPPORT_REPLY),
    (&["lonely", "alone", "miss"], LONELY_REPLY),
    (&["tired", "exhaust", "sleep"], TIRED_REPLY),
    (&["thank", "appreciate"], THANKS_REPLY),
    (&["how are you", "how is"], GREETING_REPLY),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionResponder;

impl EmotionResponder {
    pub const fn new() -> Self {
        Self
    }

    pub const fn templates(label: &NormalizedLabel) -> &'static [&'static str] {
        match label.known() {
            Some(EmotionLabel::Stressed) => &STRESSED,
            Some(EmotionLabel::Anxious) => &ANXIOUS,
            Some(EmotionLabel::Happy) => &HAPPY,
            Some(EmotionLabel::Sad) => &SAD,
            Some(EmotionLabel::Calm) => &CALM,
            Some(EmotionLabel::Neutral | EmotionLabel::Alert) | None => &NEUTRAL,
        }
    }

    pub fn emotion_response<R: Rng + ?Sized>(&self, label: &NormalizedLabel, rng: &mut R) -> String {
        Self::templates(label)
            .choose(rng)
            .copied()
            .unwrap_or(NEUTRAL[0])
            .to_string()
    }

    /// Replies to a free-text message. Keywords take priority over the
    /// emotional state; with neither, a generic listening reply is used.
    pub fn reply<R: Rng + ?Sized>(
        &self,
        message: &str,
        emotion_state: Option<&NormalizedLabel>,
        rng: &mut R,
    ) -> String {
        let lowered = message.to_lowercase();
        if let Some((_, reply)) = KEYWORD_REPLIES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        {
            return (*reply).to_string();
        }

        match emotion_state {
            Some(label) => self.emotion_response(label, rng),
            None => LISTENING_REPLY.to_string(),
        }
    }
}
