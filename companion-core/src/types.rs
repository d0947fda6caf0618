//! Core type definitions shared across the companion crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompanionError;

// ---------------------------------------------------------------------------
// Communication Style
// ---------------------------------------------------------------------------

/// How the persona talks. Every style-keyed table is an exhaustive match
/// over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    /// Polite and reserved.
    Formal,
    /// Open and positive.
    Friendly,
    /// Tender and dreamy.
    Romantic,
    /// Humorous and flirtatious.
    Playful,
}

impl CommunicationStyle {
    /// All styles in menu order.
    pub const ALL: [CommunicationStyle; 4] = [
        Self::Formal,
        Self::Friendly,
        Self::Romantic,
        Self::Playful,
    ];

    /// Resolve a 1-based menu choice.
    ///
    /// # Errors
    /// Returns `CompanionError::InvalidStyle` for anything outside `1..=4`.
    pub fn from_menu_choice(choice: i64) -> crate::error::Result<Self> {
        usize::try_from(choice)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| CompanionError::InvalidStyle(choice.to_string()))
    }

    /// Short description shown next to the style in the setup menu.
    #[must_use]
    pub fn blurb(self) -> &'static str {
        match self {
            Self::Formal => "polite and reserved communication",
            Self::Friendly => "open and positive communication",
            Self::Romantic => "tender and dreamy communication",
            Self::Playful => "humorous and flirtatious communication",
        }
    }
}

impl fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Romantic => "romantic",
            Self::Playful => "playful",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CommunicationStyle {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "friendly" => Ok(Self::Friendly),
            "romantic" => Ok(Self::Romantic),
            "playful" => Ok(Self::Playful),
            other => Err(CompanionError::InvalidStyle(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// A validated user age in `13..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UserAge(u8);

impl UserAge {
    /// Youngest supported user.
    pub const MIN: u8 = 13;
    /// Oldest supported user.
    pub const MAX: u8 = 100;

    /// Validate a raw age.
    ///
    /// # Errors
    /// Returns `CompanionError::InvalidAge` when outside `13..=100`.
    pub fn new(value: i64) -> crate::error::Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(CompanionError::InvalidAge {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// The raw age in years.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Which persona bracket this age falls into.
    #[must_use]
    pub fn bracket(self) -> AgeBracket {
        match self.0 {
            13..=16 => AgeBracket::EarlyTeen,
            17..=19 => AgeBracket::LateTeen,
            20..=25 => AgeBracket::YoungAdult,
            _ => AgeBracket::Adult,
        }
    }
}

impl fmt::Display for UserAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age bucket that selects the topic vocabulary and persona description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    /// 13–16.
    EarlyTeen,
    /// 17–19.
    LateTeen,
    /// 20–25.
    YoungAdult,
    /// 26 and over.
    Adult,
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Coarse mood of the persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Cheerful.
    #[default]
    Good,
    /// Even.
    Neutral,
    /// Down.
    Bad,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Bad => "bad",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// A conversation topic label from the session vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    /// Create a topic label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as written in the vocabulary.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the label in characters, used to prefer the most specific match.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for Topic {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Important info categories
// ---------------------------------------------------------------------------

/// Kind of personal fact pulled out of user messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoCategory {
    /// Pastimes.
    Hobbies,
    /// Job and career.
    Work,
    /// School and studies.
    Education,
    /// Relatives.
    Family,
}

impl fmt::Display for InfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hobbies => "hobbies",
            Self::Work => "work",
            Self::Education => "education",
            Self::Family => "family",
        };
        write!(f, "{name}")
    }
}

/// Count characters the way message-length thresholds are defined.
#[must_use]
pub fn message_len(message: &str) -> usize {
    message.chars().count()
}
