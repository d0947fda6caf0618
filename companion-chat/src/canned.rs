//! Keyword-triggered canned replies.

use companion_core::templates;
use companion_core::{CommunicationStyle, Engagement, message_len};
use rand::Rng;
use rand::seq::SliceRandom;

const GOODBYE_WORDS: &[&str] = &["bye", "goodbye", "farewell", "see you"];
const MOOD_INQUIRIES: &[&str] = &["how are you", "how are things", "how's your mood"];
const COMPLIMENT_WORDS: &[&str] = &["beautiful", "cute", "smart", "cool"];

/// Below this many chars a message gets a topic suggestion instead of a generic reply.
pub const TOPIC_SUGGESTION_BELOW: usize = 10;

/// What the user seems to be doing, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Saying goodbye.
    Goodbye,
    /// Asking how the companion is.
    MoodInquiry,
    /// Paying a compliment.
    Compliment,
    /// Anything else.
    Other,
}

impl Intent {
    /// Classify a message by keyword, in priority order.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
        if has(GOODBYE_WORDS) {
            Intent::Goodbye
        } else if has(MOOD_INQUIRIES) {
            Intent::MoodInquiry
        } else if has(COMPLIMENT_WORDS) {
            Intent::Compliment
        } else {
            Intent::Other
        }
    }
}

/// Canned reply body for `message`, without the mood adverb.
pub fn reply_body<R: Rng>(
    style: CommunicationStyle,
    message: &str,
    engagement: &mut Engagement<R>,
) -> String {
    match Intent::classify(message) {
        Intent::Goodbye => templates::goodbye(style).to_string(),
        Intent::MoodInquiry => templates::mood_reply(style).to_string(),
        Intent::Compliment => templates::compliment_reply(style).to_string(),
        Intent::Other if message_len(message) < TOPIC_SUGGESTION_BELOW => {
            let topic = engagement.random_topic();
            templates::topic_suggestion(style, &topic)
        }
        Intent::Other => templates::generic_replies(style)
            .choose(engagement.rng_mut())
            .map(|line| (*line).to_string())
            .unwrap_or_default(),
    }
}
