//! The Response Selector: one companion session.
//!
//! [`Companion`] owns the engagement state, the conversation history and a
//! [`ChatBackend`]. Each user message is first run through the engagement
//! pipeline; the reply then comes from the remote backend when one is
//! available, and from canned templates otherwise or when the backend fails.

use std::fmt;
use std::time::Instant;

use companion_core::config::CompanionConfig;
use companion_core::persona::Persona;
use companion_core::templates;
use companion_core::{CompanionError, Engagement, TurnAssessment};
use companion_llm::{ChatBackend, ChatMessage, prompt};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::canned;
use crate::history::ConversationHistory;
use crate::reply::{Reply, ReplySource, SpokenInitiative};

/// Identifies one session in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A running conversation with the companion.
pub struct Companion<B: ChatBackend, R: Rng = StdRng> {
    id: SessionId,
    engagement: Engagement<R>,
    backend: B,
    history: ConversationHistory,
    conversation_paused: bool,
}

impl<B: ChatBackend, R: Rng> Companion<B, R> {
    /// Start a session whose clocks begin now.
    ///
    /// # Errors
    /// Same as [`Companion::starting_at`].
    pub fn new(
        persona: Persona,
        config: &CompanionConfig,
        backend: B,
        rng: R,
    ) -> Result<Self, CompanionError> {
        Self::starting_at(persona, config, backend, rng, Instant::now())
    }

    /// Start a session whose clocks begin at `now`.
    ///
    /// # Errors
    /// Returns `CompanionError::Config` if `config` fails validation, and
    /// `CompanionError::EmptyVocabulary` if the persona has no topics.
    pub fn starting_at(
        persona: Persona,
        config: &CompanionConfig,
        backend: B,
        rng: R,
        now: Instant,
    ) -> Result<Self, CompanionError> {
        config.validate()?;
        let id = SessionId::new();
        let engagement = Engagement::new(persona, &config.initiative, now, rng)?;
        info!(session = %id, remote = backend.is_available(), "session created");
        Ok(Self {
            id,
            engagement,
            backend,
            history: ConversationHistory::new(config.llm.history_limit),
            conversation_paused: false,
        })
    }

    /// Opening line; recorded in the history.
    pub fn greeting(&mut self) -> String {
        let persona = self.engagement.persona();
        let text = templates::greeting(persona.style, &persona.name);
        self.history.push(ChatMessage::assistant(text.clone()));
        text
    }

    /// Answer a message received now.
    pub async fn respond(&mut self, message: &str) -> Reply {
        self.respond_at(message, Instant::now()).await
    }

    /// Answer a message received at `now`.
    pub async fn respond_at(&mut self, message: &str, now: Instant) -> Reply {
        let TurnAssessment { decision, .. } = self.engagement.observe(message, now);
        let initiative_needed = decision.needed;
        let mut notice = None;
        self.history.push(ChatMessage::user(message));

        if self.backend.is_available() {
            let messages = self.remote_request(initiative_needed);

            match self.backend.complete(&messages).await {
                Ok(response) => {
                    debug!(
                        session = %self.id,
                        latency_ms = response.latency_ms,
                        tokens = response.tokens_generated,
                        "remote reply"
                    );
                    self.history.push(ChatMessage::assistant(response.text.clone()));
                    if initiative_needed {
                        // The model was told to take initiative itself; only the bookkeeping is ours.
                        let topic = self.engagement.choose_topic_and_mark(now);
                        debug!(session = %self.id, topic = %topic, "initiative delegated to remote reply");
                    }
                    return Reply {
                        text: response.text,
                        initiative: None,
                        notice: None,
                        source: ReplySource::Remote,
                    };
                }
                Err(e) => {
                    warn!(session = %self.id, error = %e, "remote reply failed; using canned reply");
                    let detail = e.to_string();
                    let detail = detail.split_whitespace().collect::<Vec<_>>().join(" ");
                    notice = Some(format!("Error when calling API: {detail}"));
                }
            }
        }

        let reply = self.canned_reply(message, initiative_needed, now, notice);
        self.history.push(ChatMessage::assistant(reply.to_string()));
        reply
    }

    /// Take initiative without a user message (the user has gone quiet).
    pub fn proactive_initiative(&mut self, now: Instant) -> SpokenInitiative {
        let spoken = self.speak_initiative(now);
        self.history.push(ChatMessage::assistant(spoken.text.clone()));
        spoken
    }

    /// Whether the companion already spoke up during the current silence.
    #[must_use]
    pub fn conversation_paused(&self) -> bool {
        self.conversation_paused
    }

    /// Set or clear the paused flag.
    pub fn set_conversation_paused(&mut self, paused: bool) {
        self.conversation_paused = paused;
    }

    /// Session id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Engagement state.
    #[must_use]
    pub fn engagement(&self) -> &Engagement<R> {
        &self.engagement
    }

    /// Conversation history.
    #[must_use]
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// The completion backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn remote_request(&self, initiative_needed: bool) -> Vec<ChatMessage> {
        let persona = self.engagement.persona();
        let directive = initiative_needed.then(|| templates::initiative_directive(persona.style));
        let system = prompt::system_instruction(
            &persona.description(),
            templates::style_instruction(persona.style),
            directive,
        );
        prompt::build_messages(system, self.history.as_slice())
    }

    fn canned_reply(
        &mut self,
        message: &str,
        initiative_needed: bool,
        now: Instant,
        notice: Option<String>,
    ) -> Reply {
        let style = self.engagement.persona().style;
        let body = canned::reply_body(style, message, &mut self.engagement);
        let adverb = templates::mood_adverb(style, self.engagement.emotion().mood);
        let initiative = initiative_needed.then(|| self.speak_initiative(now));

        Reply {
            text: format!("{adverb} {body}"),
            initiative,
            source: if notice.is_some() {
                ReplySource::Fallback
            } else {
                ReplySource::Canned
            },
            notice,
        }
    }

    fn speak_initiative(&mut self, now: Instant) -> SpokenInitiative {
        let initiative = self.engagement.take_initiative(now);
        let text = initiative.text(self.engagement.persona().style);
        SpokenInitiative { initiative, text }
    }
}
