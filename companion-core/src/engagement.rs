//! Engagement — the per-turn pipeline over emotion, topics and initiative.
//!
//! One [`Engagement`] owns all mutable conversation state for a session.
//! [`Engagement::observe`] applies a user message in a fixed order:
//!
//! 1. emotional state update
//! 2. topic memory update
//! 3. feedback on the previous initiative, if one is pending
//! 4. short-message run
//! 5. initiative evaluation (against the *previous* message time)
//! 6. message clock reset
//!
//! The caller decides whether to act on the returned decision and, if so,
//! calls [`Engagement::take_initiative`].

use std::time::Instant;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::InitiativeConfig;
use crate::emotion::EmotionalState;
use crate::error::Result;
use crate::initiative::{Initiative, InitiativeDecision, InitiativeEngine};
use crate::persona::Persona;
use crate::topics::{TopicMemory, Vocabulary};
use crate::types::{Topic, message_len};

/// What one observed message told us.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAssessment {
    /// Topic detected in the message.
    pub detected_topic: Option<Topic>,
    /// Whether the previous initiative was judged, and how.
    pub feedback: Option<bool>,
    /// The initiative decision for this turn.
    pub decision: InitiativeDecision,
}

/// All conversation state of one session, generic over the randomness source.
#[derive(Debug)]
pub struct Engagement<R: Rng = StdRng> {
    persona: Persona,
    emotion: EmotionalState,
    topics: TopicMemory,
    initiative: InitiativeEngine,
    rng: R,
}

impl<R: Rng> Engagement<R> {
    /// Start a session for `persona` at `now`.
    ///
    /// # Errors
    /// Returns `CompanionError::Config` if `config` fails validation, and
    /// `CompanionError::EmptyVocabulary` if the persona has no topics.
    pub fn new(persona: Persona, config: &InitiativeConfig, now: Instant, rng: R) -> Result<Self> {
        config.validate()?;
        let vocabulary = Vocabulary::new(persona.topics())?;
        info!(
            persona = %persona.name,
            style = %persona.style,
            topics = vocabulary.len(),
            "engagement started"
        );
        Ok(Self {
            topics: TopicMemory::new(vocabulary, config.recent_topic_capacity),
            initiative: InitiativeEngine::new(config.clone(), now),
            emotion: EmotionalState::default(),
            persona,
            rng,
        })
    }

    /// Apply a user message received at `now`.
    pub fn observe(&mut self, message: &str, now: Instant) -> TurnAssessment {
        let chars = message_len(message);

        self.emotion.update(message);
        let detected_topic = self.topics.update(message);
        let feedback = self.initiative.check_feedback(detected_topic.as_ref(), chars);
        self.initiative.record_message_length(chars);
        let decision = self.initiative.evaluate(now, &self.emotion);
        self.initiative.touch(now);

        debug!(
            chars,
            mood = %self.emotion.mood,
            energy = self.emotion.energy,
            interest = self.emotion.topic_interest,
            topic = ?detected_topic,
            ?feedback,
            needed = decision.needed,
            "turn observed"
        );

        TurnAssessment {
            detected_topic,
            feedback,
            decision,
        }
    }

    /// Evaluate the initiative need at `now` without a new message.
    #[must_use]
    pub fn evaluate(&self, now: Instant) -> InitiativeDecision {
        self.initiative.evaluate(now, &self.emotion)
    }

    /// Choose a topic to bring up and record that an initiative was taken.
    pub fn choose_topic_and_mark(&mut self, now: Instant) -> Topic {
        let topic = self.initiative.choose_next_topic(&mut self.topics, &mut self.rng);
        self.initiative.mark_taken(now, topic.clone());
        topic
    }

    /// Choose topic and form of an initiative and record it as taken.
    pub fn take_initiative(&mut self, now: Instant) -> Initiative {
        let topic = self.initiative.choose_next_topic(&mut self.topics, &mut self.rng);
        let kind = self.initiative.choose_kind(&self.emotion, &mut self.rng);
        self.initiative.mark_taken(now, topic.clone());
        info!(topic = %topic, kind = %kind, "initiative taken");
        Initiative { topic, kind }
    }

    /// A uniformly random topic from the vocabulary.
    pub fn random_topic(&mut self) -> Topic {
        self.topics.vocabulary().pick(&mut self.rng).clone()
    }

    /// The randomness source, for callers making their own picks.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Session persona.
    #[must_use]
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Current emotional state.
    #[must_use]
    pub fn emotion(&self) -> &EmotionalState {
        &self.emotion
    }

    /// Topic memory.
    #[must_use]
    pub fn topics(&self) -> &TopicMemory {
        &self.topics
    }

    /// Initiative engine.
    #[must_use]
    pub fn initiative(&self) -> &InitiativeEngine {
        &self.initiative
    }
}
