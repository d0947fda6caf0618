//! Topic Memory — "What we have been talking about"
//!
//! Tracks the topic of the moment, an append-only history (consecutive repeats
//! collapsed), a small FIFO window of recent topics the initiative engine
//! avoids repeating, per-topic sentiment, and short personal facts lifted out
//! of user messages.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::emotion::{NEGATIVE_TRIGGERS, POSITIVE_TRIGGERS, contains_any};
use crate::error::{CompanionError, Result};
use crate::types::{InfoCategory, Topic};

/// Default size of the recent-topics window.
pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// Keywords that mark a personal fact worth remembering, per category.
pub const INFO_KEYWORDS: &[(InfoCategory, &[&str])] = &[
    (InfoCategory::Hobbies, &["hobby", "enjoy", "like to"]),
    (InfoCategory::Work, &["work", "profession", "career"]),
    (InfoCategory::Education, &["study", "university", "school"]),
    (InfoCategory::Family, &["family", "parents", "brother", "sister"]),
];

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// The fixed, non-empty topic set of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    topics: Vec<Topic>,
}

impl Vocabulary {
    /// Build a vocabulary, dropping duplicate labels (first occurrence wins).
    ///
    /// # Errors
    /// Returns `CompanionError::EmptyVocabulary` if no topics are given.
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Result<Self> {
        let mut unique: Vec<Topic> = Vec::new();
        for topic in topics {
            if !unique.contains(&topic) {
                unique.push(topic);
            }
        }
        if unique.is_empty() {
            return Err(CompanionError::EmptyVocabulary);
        }
        Ok(Self { topics: unique })
    }

    /// Topics in vocabulary order.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Whether the label belongs to this vocabulary.
    #[must_use]
    pub fn contains(&self, topic: &Topic) -> bool {
        self.topics.contains(topic)
    }

    /// Uniformly random topic.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Topic {
        &self.topics[rng.gen_range(0..self.topics.len())]
    }

    /// Most specific topic mentioned in the (lowercased) text.
    ///
    /// The longest matching label wins; among equally long labels the one
    /// earliest in vocabulary order is kept.
    #[must_use]
    pub fn detect(&self, lowercased: &str) -> Option<&Topic> {
        let mut best: Option<&Topic> = None;
        for topic in &self.topics {
            if lowercased.contains(&topic.as_str().to_lowercase())
                && best.is_none_or(|b| topic.char_len() > b.char_len())
            {
                best = Some(topic);
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Topic Memory
// ---------------------------------------------------------------------------

/// Conversation topic bookkeeping for one session.
#[derive(Debug, Clone, Serialize)]
pub struct TopicMemory {
    vocabulary: Vocabulary,
    recent_capacity: usize,
    current_topic: Option<Topic>,
    topic_history: Vec<Topic>,
    recent_topics: VecDeque<Topic>,
    favorite_topics: BTreeSet<Topic>,
    disliked_topics: BTreeSet<Topic>,
    important_info: BTreeMap<InfoCategory, String>,
}

impl TopicMemory {
    /// Create an empty memory over a vocabulary.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, recent_capacity: usize) -> Self {
        Self {
            vocabulary,
            recent_capacity: recent_capacity.max(1),
            current_topic: None,
            topic_history: Vec::new(),
            recent_topics: VecDeque::new(),
            favorite_topics: BTreeSet::new(),
            disliked_topics: BTreeSet::new(),
            important_info: BTreeMap::new(),
        }
    }

    /// Apply one incoming message. Returns the topic detected in it, if any.
    pub fn update(&mut self, message: &str) -> Option<Topic> {
        let lowered = message.to_lowercase();
        let detected = self.vocabulary.detect(&lowered).cloned();

        if let Some(topic) = &detected {
            self.current_topic = Some(topic.clone());

            if self.topic_history.last() != Some(topic) {
                self.topic_history.push(topic.clone());
            }

            self.push_recent(topic.clone());

            if contains_any(&lowered, POSITIVE_TRIGGERS) {
                self.favorite_topics.insert(topic.clone());
            } else if contains_any(&lowered, NEGATIVE_TRIGGERS) {
                self.disliked_topics.insert(topic.clone());
            }

            debug!(topic = %topic, "topic detected");
        }

        self.extract_important_info(&lowered);
        detected
    }

    /// Add a topic to the recent window unless already there, evicting the oldest.
    pub fn push_recent(&mut self, topic: Topic) {
        if self.recent_topics.contains(&topic) {
            return;
        }
        self.recent_topics.push_back(topic);
        while self.recent_topics.len() > self.recent_capacity {
            self.recent_topics.pop_front();
        }
    }

    /// Forget the recent window.
    pub fn clear_recent(&mut self) {
        self.recent_topics.clear();
    }

    /// Mark a topic as one the user enjoys.
    pub fn mark_favorite(&mut self, topic: Topic) {
        self.favorite_topics.insert(topic);
    }

    /// Mark a topic as one the user dislikes.
    pub fn mark_disliked(&mut self, topic: Topic) {
        self.disliked_topics.insert(topic);
    }

    fn extract_important_info(&mut self, lowered: &str) {
        for (category, keywords) in INFO_KEYWORDS {
            for keyword in *keywords {
                let Some(start) = lowered.find(keyword) else {
                    continue;
                };
                let tail = &lowered[start..];
                let end = tail.find('.').unwrap_or(tail.len());
                let snippet = tail[..end].trim().to_string();
                debug!(category = %category, snippet = %snippet, "important info extracted");
                self.important_info.insert(*category, snippet);
            }
        }
    }

    /// The session's vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Topic of the most recent message that mentioned one.
    #[must_use]
    pub fn current_topic(&self) -> Option<&Topic> {
        self.current_topic.as_ref()
    }

    /// Every topic discussed, consecutive repeats collapsed.
    #[must_use]
    pub fn topic_history(&self) -> &[Topic] {
        &self.topic_history
    }

    /// The recent window, oldest first.
    #[must_use]
    pub fn recent_topics(&self) -> &VecDeque<Topic> {
        &self.recent_topics
    }

    /// Topics mentioned alongside positive words.
    #[must_use]
    pub fn favorite_topics(&self) -> &BTreeSet<Topic> {
        &self.favorite_topics
    }

    /// Topics mentioned alongside negative words.
    #[must_use]
    pub fn disliked_topics(&self) -> &BTreeSet<Topic> {
        &self.disliked_topics
    }

    /// Extracted personal facts.
    #[must_use]
    pub fn important_info(&self) -> &BTreeMap<InfoCategory, String> {
        &self.important_info
    }
}
