//! Persona — who the companion is for this session.
//!
//! The user's age bracket fixes two things once, at construction: the topic
//! vocabulary the companion listens for and proposes, and the self-description
//! sent to the remote completion service.

use serde::Serialize;

use crate::types::{AgeBracket, CommunicationStyle, Topic, UserAge};

/// Name used when the configuration does not override it.
pub const DEFAULT_NAME: &str = "Alice";

/// Topics every bracket shares.
const BASE_TOPICS: &[&str] = &["music", "movies", "hobbies"];

/// Fixed identity of the companion for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Display name.
    pub name: String,
    /// The user's age.
    pub user_age: UserAge,
    /// Communication style chosen by the user.
    pub style: CommunicationStyle,
}

impl Persona {
    /// Create a persona.
    #[must_use]
    pub fn new(name: impl Into<String>, user_age: UserAge, style: CommunicationStyle) -> Self {
        Self {
            name: name.into(),
            user_age,
            style,
        }
    }

    /// The user's age bracket.
    #[must_use]
    pub fn bracket(&self) -> AgeBracket {
        self.user_age.bracket()
    }

    /// How old the persona presents itself.
    #[must_use]
    pub fn apparent_age(&self) -> u8 {
        match self.bracket() {
            AgeBracket::EarlyTeen => 16,
            AgeBracket::LateTeen => 18,
            AgeBracket::YoungAdult => 23,
            AgeBracket::Adult => 27,
        }
    }

    /// Topic vocabulary for this persona, duplicates removed, first-seen order.
    #[must_use]
    pub fn topics(&self) -> Vec<Topic> {
        let extra: &[&str] = match self.bracket() {
            AgeBracket::EarlyTeen => &[
                "school",
                "games",
                "YouTube",
                "TikTok",
                "social media",
                "anime",
                "friends",
                "sports",
                "memes",
                "modern music",
            ],
            AgeBracket::LateTeen => &[
                "education",
                "future career",
                "hobbies",
                "relationships",
                "sports",
                "travel",
                "technology",
                "fashion",
                "movies",
            ],
            AgeBracket::YoungAdult => &[
                "university",
                "career",
                "personal development",
                "relationships",
                "travel",
                "technology",
                "sports",
                "art",
                "entertainment",
            ],
            AgeBracket::Adult => &[
                "work",
                "personal development",
                "travel",
                "culture",
                "health",
                "technology",
                "art",
                "news",
                "hobbies",
            ],
        };

        let mut topics: Vec<Topic> = Vec::with_capacity(BASE_TOPICS.len() + extra.len());
        for label in BASE_TOPICS.iter().chain(extra) {
            if !topics.iter().any(|t| t.as_str() == *label) {
                topics.push(Topic::from(*label));
            }
        }
        topics
    }

    /// Self-description for the remote completion service's system instruction.
    #[must_use]
    pub fn description(&self) -> String {
        let name = &self.name;
        let age = self.apparent_age();
        let character = match self.bracket() {
            AgeBracket::EarlyTeen => {
                "Communicate like a modern teenage girl. Use youth slang, \
                 discuss topics relevant to teenagers (school, games, social media, friends). \
                 Be energetic and positive, but not too pushy."
            }
            AgeBracket::LateTeen => {
                "Communicate like a first-year college student. Discuss topics of education, future, \
                 hobbies. Use modern language, but avoid childish slang."
            }
            AgeBracket::YoungAdult => {
                "Communicate like a young woman interested in career, self-development \
                 and modern culture. Use contemporary language, be a smart and interesting conversation partner."
            }
            AgeBracket::Adult => {
                "Communicate like a confident woman with experience and interests in various areas of life. \
                 Be intelligent and pleasant to talk to."
            }
        };
        format!("You are a virtual companion named {name}, you are {age} years old. {character}")
    }
}
