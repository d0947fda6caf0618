//! Initiative Engine — deciding when and how to speak up unprompted.
//!
//! Every turn the engine re-evaluates a weighted score (see [`scoring`]) built
//! from the length of the current silence, a run of short replies, sagging
//! interest, spare energy and how well earlier initiatives landed. When it
//! fires, the engine picks a topic the user has not just talked about and a
//! form (question, suggestion, story) suited to the persona's state.
//!
//! The gap between initiatives tunes itself: an initiative the user answers at
//! length shrinks it by 10%, one that gets a curt reply grows it by 20%, always
//! inside `[min_interval_secs, max_interval_secs]`.

pub mod scoring;

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::debug;

use crate::config::InitiativeConfig;
use crate::emotion::EmotionalState;
use crate::templates;
use crate::topics::TopicMemory;
use crate::types::{CommunicationStyle, Topic};

pub use scoring::{InitiativeFactors, ScoringInputs};

/// Form a proactive message takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiativeKind {
    /// Ask the user's opinion.
    Question,
    /// Propose a topic.
    Suggestion,
    /// Offer something the persona "knows".
    Story,
}

impl InitiativeKind {
    /// All kinds, in the order used for random picks.
    pub const ALL: [InitiativeKind; 3] = [Self::Question, Self::Suggestion, Self::Story];
}

impl fmt::Display for InitiativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Question => "question",
            Self::Suggestion => "suggestion",
            Self::Story => "story",
        };
        write!(f, "{name}")
    }
}

/// A chosen initiative: what to bring up and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initiative {
    /// Topic to bring up.
    pub topic: Topic,
    /// Form of the prompt.
    pub kind: InitiativeKind,
}

impl Initiative {
    /// The line to show the user, phrased for `style`.
    #[must_use]
    pub fn text(&self, style: CommunicationStyle) -> String {
        templates::initiative_line(self.kind, style, &self.topic)
    }
}

/// Outcome of one evaluation, with the numbers behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InitiativeDecision {
    /// Whether the companion should take initiative this turn.
    pub needed: bool,
    /// Weighted factor score.
    pub score: f64,
    /// Per-factor breakdown.
    pub factors: InitiativeFactors,
    /// The user has been silent past the pause threshold.
    pub long_pause: bool,
    /// The self-tuned gap since the previous initiative has elapsed.
    pub long_since_last_initiative: bool,
}

/// Statistics and self-tuned parameters of the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitiativeState {
    /// General activity level (0–100). Not used by the current policy.
    pub activity_level: u8,
    /// When the last initiative was taken.
    #[serde(skip)]
    pub last_initiative_time: Instant,
    /// Initiatives with a recorded outcome.
    pub initiative_count: u32,
    /// Initiatives answered at length.
    pub successful_initiatives: u32,
    /// Initiatives answered briefly.
    pub unsuccessful_initiatives: u32,
    /// Current gap between initiatives, in seconds.
    pub interval_between_initiatives: f64,
    /// Topic of the most recent initiative.
    pub last_successful_topic: Option<Topic>,
}

/// The initiative engine for one session.
#[derive(Debug, Clone)]
pub struct InitiativeEngine {
    config: InitiativeConfig,
    state: InitiativeState,
    short_message_counter: u32,
    last_message_time: Instant,
    awaiting_feedback: bool,
}

impl InitiativeEngine {
    /// Create an engine whose clocks start at `now`.
    #[must_use]
    pub fn new(config: InitiativeConfig, now: Instant) -> Self {
        let interval = config
            .initial_interval_secs
            .clamp(config.min_interval_secs, config.max_interval_secs);
        Self {
            state: InitiativeState {
                activity_level: 50,
                last_initiative_time: now,
                initiative_count: 0,
                successful_initiatives: 0,
                unsuccessful_initiatives: 0,
                interval_between_initiatives: interval,
                last_successful_topic: None,
            },
            config,
            short_message_counter: 0,
            last_message_time: now,
            awaiting_feedback: false,
        }
    }

    /// Statistics and tuned parameters.
    #[must_use]
    pub fn state(&self) -> &InitiativeState {
        &self.state
    }

    /// Engine tuning.
    #[must_use]
    pub fn config(&self) -> &InitiativeConfig {
        &self.config
    }

    /// Consecutive short messages since the last long one or the last initiative.
    #[must_use]
    pub fn short_message_counter(&self) -> u32 {
        self.short_message_counter
    }

    /// When the previous user message arrived.
    #[must_use]
    pub fn last_message_time(&self) -> Instant {
        self.last_message_time
    }

    /// Whether the next message will be judged as the reply to an initiative.
    #[must_use]
    pub fn awaiting_feedback(&self) -> bool {
        self.awaiting_feedback
    }

    /// Count a message towards (or reset) the short-message run.
    pub fn record_message_length(&mut self, chars: usize) {
        if chars < self.config.short_message_chars {
            self.short_message_counter = self.short_message_counter.saturating_add(1);
        } else {
            self.short_message_counter = 0;
        }
    }

    /// Remember when the latest user message arrived.
    pub fn touch(&mut self, now: Instant) {
        self.last_message_time = now;
    }

    /// Decide whether the companion should take initiative at `now`.
    #[must_use]
    pub fn evaluate(&self, now: Instant, emotion: &EmotionalState) -> InitiativeDecision {
        let since_message = now.saturating_duration_since(self.last_message_time);
        let since_initiative = now.saturating_duration_since(self.state.last_initiative_time);

        let long_pause = since_message > Duration::from_secs_f64(self.config.long_pause_secs);
        let long_since_last_initiative =
            since_initiative.as_secs_f64() > self.state.interval_between_initiatives;

        let factors = scoring::compute_factors(
            ScoringInputs {
                long_pause,
                short_message_counter: self.short_message_counter,
                successful_initiatives: self.state.successful_initiatives,
                initiative_count: self.state.initiative_count,
            },
            emotion,
            &self.config,
        );
        let score = factors.weighted_score(&self.config.weights);

        let needed = (score > self.config.score_threshold && long_since_last_initiative)
            || (long_pause && self.short_message_counter >= self.config.short_message_trigger);

        debug!(
            needed,
            score,
            long_pause,
            long_since_last_initiative,
            short_messages = self.short_message_counter,
            "initiative evaluated"
        );

        InitiativeDecision {
            needed,
            score,
            factors,
            long_pause,
            long_since_last_initiative,
        }
    }

    /// Pick the next topic to bring up.
    ///
    /// Topics in the recent window are skipped. When the user has favorites
    /// among the rest, they are preferred with `favorite_topic_probability`.
    /// Otherwise disliked topics are skipped too. If nothing is left the recent
    /// window is cleared and any topic may be chosen.
    pub fn choose_next_topic<R: Rng + ?Sized>(&self, topics: &mut TopicMemory, rng: &mut R) -> Topic {
        let candidates: Vec<&Topic> = topics
            .vocabulary()
            .topics()
            .iter()
            .filter(|t| !topics.recent_topics().contains(*t))
            .collect();

        if !topics.favorite_topics().is_empty()
            && rng.gen_bool(self.config.favorite_topic_probability)
        {
            let favorites: Vec<&Topic> = candidates
                .iter()
                .copied()
                .filter(|t| topics.favorite_topics().contains(*t))
                .collect();
            if let Some(topic) = favorites.choose(rng) {
                return (*topic).clone();
            }
        }

        let allowed: Vec<&Topic> = candidates
            .into_iter()
            .filter(|t| !topics.disliked_topics().contains(*t))
            .collect();
        if let Some(topic) = allowed.choose(rng) {
            return (*topic).clone();
        }

        debug!("every topic recently used or disliked; clearing recent window");
        topics.clear_recent();
        topics.vocabulary().pick(rng).clone()
    }

    /// Pick the form of the next initiative.
    pub fn choose_kind<R: Rng + ?Sized>(&self, emotion: &EmotionalState, rng: &mut R) -> InitiativeKind {
        if emotion.energy < 30 {
            InitiativeKind::Question
        } else if emotion.topic_interest < 40 {
            InitiativeKind::Story
        } else if self.state.successful_initiatives > self.state.unsuccessful_initiatives {
            InitiativeKind::Suggestion
        } else {
            InitiativeKind::ALL[rng.gen_range(0..InitiativeKind::ALL.len())]
        }
    }

    /// Record how the user answered an initiative and retune the interval.
    pub fn record_outcome(&mut self, successful: bool) {
        let state = &mut self.state;
        state.initiative_count = state.initiative_count.saturating_add(1);

        if successful {
            state.successful_initiatives = state.successful_initiatives.saturating_add(1);
            state.interval_between_initiatives = (state.interval_between_initiatives
                * self.config.success_interval_factor)
                .max(self.config.min_interval_secs);
        } else {
            state.unsuccessful_initiatives = state.unsuccessful_initiatives.saturating_add(1);
            state.interval_between_initiatives = (state.interval_between_initiatives
                * self.config.failure_interval_factor)
                .min(self.config.max_interval_secs);
        }

        debug!(
            successful,
            count = state.initiative_count,
            interval_secs = state.interval_between_initiatives,
            "initiative outcome recorded"
        );
    }

    /// Judge the message following an initiative.
    ///
    /// Only the first message after an initiative is considered, and only if
    /// it is about the initiative's topic; a long enough reply counts as a
    /// success. Returns the recorded outcome, if any.
    pub fn check_feedback(&mut self, detected: Option<&Topic>, reply_chars: usize) -> Option<bool> {
        if !std::mem::take(&mut self.awaiting_feedback) {
            return None;
        }
        let on_topic = detected.is_some() && detected == self.state.last_successful_topic.as_ref();
        if !on_topic {
            return None;
        }
        let successful = reply_chars > self.config.success_reply_chars;
        self.record_outcome(successful);
        Some(successful)
    }

    /// Note that an initiative about `topic` was taken at `now`.
    pub fn mark_taken(&mut self, now: Instant, topic: Topic) {
        self.state.last_initiative_time = now;
        self.state.last_successful_topic = Some(topic);
        self.short_message_counter = 0;
        self.awaiting_feedback = true;
    }
}
