//! Emotional State Tracker — "How the persona feels right now"
//!
//! Four scalars updated once per incoming message:
//!
//! - **mood** — good / neutral / bad, flipped by trigger words
//! - **energy** — rises with praise, drops with complaints, decays 1 per turn
//! - **attachment** — grows with every positive message
//! - **topic interest** — grows with long messages, shrinks with terse ones
//!
//! All levels are clamped to `0..=100` on every update.

use serde::{Deserialize, Serialize};

use crate::types::{Mood, message_len};

/// Upper bound of every emotional level.
pub const MAX_LEVEL: u8 = 100;

/// Words that lift the mood.
pub const POSITIVE_TRIGGERS: &[&str] = &["thanks", "cool", "great", "awesome", "love", "like"];

/// Words that sour the mood.
pub const NEGATIVE_TRIGGERS: &[&str] = &["bad", "terrible", "sad", "unpleasant", "annoying"];

const POSITIVE_ENERGY_GAIN: u8 = 10;
const POSITIVE_ATTACHMENT_GAIN: u8 = 5;
const NEGATIVE_ENERGY_LOSS: u8 = 10;
const LONG_MESSAGE_CHARS: usize = 50;
const SHORT_MESSAGE_CHARS: usize = 10;
const INTEREST_GAIN: u8 = 10;
const INTEREST_LOSS: u8 = 5;
const ENERGY_DECAY_PER_TURN: u8 = 1;

/// True if any trigger word occurs in the (already lowercased) text.
#[must_use]
pub fn contains_any(lowercased: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lowercased.contains(word))
}

/// The persona's current emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Coarse mood.
    pub mood: Mood,
    /// Liveliness (0–100).
    pub energy: u8,
    /// Closeness to the user (0–100).
    pub attachment: u8,
    /// Engagement with the current subject (0–100).
    pub topic_interest: u8,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            mood: Mood::Good,
            energy: MAX_LEVEL,
            attachment: 0,
            topic_interest: 50,
        }
    }
}

impl EmotionalState {
    /// Create a state with explicit levels, clamped to `0..=100`.
    #[must_use]
    pub fn new(mood: Mood, energy: u8, attachment: u8, topic_interest: u8) -> Self {
        Self {
            mood,
            energy: energy.min(MAX_LEVEL),
            attachment: attachment.min(MAX_LEVEL),
            topic_interest: topic_interest.min(MAX_LEVEL),
        }
    }

    /// Apply one incoming message.
    ///
    /// The positive and negative checks are independent: a message carrying
    /// both kinds of trigger goes through both, so the negative branch has the
    /// final say on mood.
    pub fn update(&mut self, message: &str) {
        let lowered = message.to_lowercase();

        if contains_any(&lowered, POSITIVE_TRIGGERS) {
            self.mood = Mood::Good;
            self.energy = raise(self.energy, POSITIVE_ENERGY_GAIN);
            self.attachment = raise(self.attachment, POSITIVE_ATTACHMENT_GAIN);
        }

        if contains_any(&lowered, NEGATIVE_TRIGGERS) {
            self.mood = Mood::Bad;
            self.energy = self.energy.saturating_sub(NEGATIVE_ENERGY_LOSS);
        }

        let len = message_len(message);
        if len > LONG_MESSAGE_CHARS {
            self.topic_interest = raise(self.topic_interest, INTEREST_GAIN);
        } else if len < SHORT_MESSAGE_CHARS {
            self.topic_interest = self.topic_interest.saturating_sub(INTEREST_LOSS);
        }

        // Natural decay, after everything else.
        self.energy = self.energy.saturating_sub(ENERGY_DECAY_PER_TURN);
    }
}

fn raise(level: u8, by: u8) -> u8 {
    level.saturating_add(by).min(MAX_LEVEL)
}
