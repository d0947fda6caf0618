//! Canned phrasing, keyed on communication style.
//!
//! Every table is an exhaustive `match` over [`CommunicationStyle`], so a new
//! style cannot be added without giving it a line in each table.

use crate::initiative::InitiativeKind;
use crate::types::{CommunicationStyle, Mood, Topic};

use CommunicationStyle::{Formal, Friendly, Playful, Romantic};

// ---------------------------------------------------------------------------
// Session bookends
// ---------------------------------------------------------------------------

/// Opening line of a session.
#[must_use]
pub fn greeting(style: CommunicationStyle, name: &str) -> String {
    match style {
        Formal => format!("Hello! My name is {name}. Nice to meet you."),
        Friendly => format!("Hi! I'm {name}! Nice to meet you!"),
        Romantic => format!("Hello... I'm {name}... I'm very glad to see you..."),
        Playful => format!("Hey! I'm {name}! What should we do today?"),
    }
}

/// Reply to a farewell.
#[must_use]
pub fn goodbye(style: CommunicationStyle) -> &'static str {
    match style {
        Formal => "Goodbye! It was nice talking to you.",
        Friendly => "Bye-bye! Hope we chat again soon!",
        Romantic => "I'll miss you... Write to me soon...",
        Playful => "Well, see you later!",
    }
}

// ---------------------------------------------------------------------------
// Intent replies
// ---------------------------------------------------------------------------

/// Reply to "how are you" and friends.
#[must_use]
pub fn mood_reply(style: CommunicationStyle) -> &'static str {
    match style {
        Formal => "Thank you for your interest. I'm doing well.",
        Friendly => "I'm in a great mood, especially when chatting with you!",
        Romantic => "Just saw your message, and my mood immediately became magical...",
        Playful => "Super-duper mood! How about you?",
    }
}

/// Reply to a compliment.
#[must_use]
pub fn compliment_reply(style: CommunicationStyle) -> &'static str {
    match style {
        Formal => "Thank you for the compliment. Tell me, what interests you the most?",
        Friendly => {
            "Oh, that's so nice! And you're such a great conversation partner! Tell me more about yourself!"
        }
        Romantic => "Thank you... That means a lot to me... Tell me, what do you dream about?",
        Playful => "Heh, you know how to give compliments! Let's talk about something fun now!",
    }
}

/// Catch-all replies; one is picked at random.
#[must_use]
pub fn generic_replies(style: CommunicationStyle) -> &'static [&'static str] {
    match style {
        Formal => &[
            "Interesting thought. Shall we explore this topic in more detail?",
            "Your point of view is quite curious. What else do you think about this?",
            "Indeed an important question. How did you come to this opinion?",
        ],
        Friendly => &[
            "Wow, that's so interesting! What else do you think about this?",
            "Yes, yes, I think so too! Let's share opinions?",
            "Listen, I have a similar story! Want me to tell you?",
        ],
        Romantic => &[
            "Your words touch something special... Tell me more...",
            "How interesting you think... Share more of your ideas...",
            "This is so inspiring... What else do you like to think about?",
        ],
        Playful => &[
            "Wow, what a twist! What happens next? Tell me!",
            "Haha, you're so funny! Let's discuss something else!",
            "Oh, I know something even more interesting! Want to know?",
        ],
    }
}

/// Nudge towards a topic when the user's message is too short to reply to.
#[must_use]
pub fn topic_suggestion(style: CommunicationStyle, topic: &Topic) -> String {
    match style {
        Formal => format!("May I suggest discussing {topic}. What do you think about this?"),
        Friendly => format!("Listen, let's chat about {topic}? What's your opinion?"),
        Romantic => {
            format!("You know... I'd like to talk about {topic}... What do you feel when you think about it?")
        }
        Playful => format!("Hey, let's talk about {topic}! You surely have something to say!"),
    }
}

/// Adverb prefixed to canned replies, from mood and style.
#[must_use]
pub fn mood_adverb(style: CommunicationStyle, mood: Mood) -> &'static str {
    match (mood, style) {
        (Mood::Good, Formal) => "with pleasure",
        (Mood::Good, Friendly) => "happily",
        (Mood::Good, Romantic) => "tenderly",
        (Mood::Good, Playful) => "enthusiastically",
        (Mood::Bad, Formal) => "understandingly",
        (Mood::Bad, Friendly) => "caringly",
        (Mood::Bad, Romantic) => "sensitively",
        (Mood::Bad, Playful) => "supportively",
        (Mood::Neutral, Formal) => "attentively",
        (Mood::Neutral, Friendly) => "with interest",
        (Mood::Neutral, Romantic) => "softly",
        (Mood::Neutral, Playful) => "lively",
    }
}

// ---------------------------------------------------------------------------
// Initiative
// ---------------------------------------------------------------------------

/// The proactive line for an initiative.
#[must_use]
pub fn initiative_line(kind: InitiativeKind, style: CommunicationStyle, topic: &Topic) -> String {
    match (kind, style) {
        (InitiativeKind::Question, Formal) => {
            format!("What do you think about {topic}? I'm very interested to hear your opinion.")
        }
        (InitiativeKind::Question, Friendly) => {
            format!("Hey, what's your take on {topic}? Share your thoughts!")
        }
        (InitiativeKind::Question, Romantic) => {
            format!("You know... I'm so curious to know your opinion about {topic}... Would you tell me?")
        }
        (InitiativeKind::Question, Playful) => {
            format!("Bet you have a cool story about {topic}? Spill it!")
        }
        (InitiativeKind::Suggestion, Formal) => {
            format!("Let's discuss {topic}. You surely have interesting thoughts about this.")
        }
        (InitiativeKind::Suggestion, Friendly) => {
            format!("Listen, let's chat about {topic}? I think it would be super interesting!")
        }
        (InitiativeKind::Suggestion, Romantic) => {
            format!("I so want to talk with you about {topic}... Would you share your thoughts?")
        }
        (InitiativeKind::Suggestion, Playful) => {
            format!("Folks, let's discuss {topic}! You definitely have something to say!")
        }
        (InitiativeKind::Story, Formal) => {
            format!("You know, I have an interesting thought about {topic}. Would you like to discuss it?")
        }
        (InitiativeKind::Story, Friendly) => {
            format!("Can you imagine what I recently learned about {topic}? Let's discuss it!")
        }
        (InitiativeKind::Story, Romantic) => format!(
            "I have a special story about {topic}... Would you like me to share it and hear your opinion?"
        ),
        (InitiativeKind::Story, Playful) => {
            format!("You won't believe what I know about {topic}! Want me to tell you and discuss it?")
        }
    }
}

// ---------------------------------------------------------------------------
// Remote completion instructions
// ---------------------------------------------------------------------------

/// Speech-style instruction appended to the persona description.
#[must_use]
pub fn style_instruction(style: CommunicationStyle) -> &'static str {
    match style {
        Formal => "Communicate politely and formally. Use a business-like speech style.",
        Friendly => {
            "Communicate in a friendly and positive way. Use emojis, abbreviations, and conversational style."
        }
        Romantic => "Communicate gently and dreamily. Use poetic expressions and talk about feelings.",
        Playful => "Communicate playfully and cheerfully. Use jokes, be energetic.",
    }
}

/// Instruction telling the remote model to take initiative itself.
#[must_use]
pub fn initiative_directive(style: CommunicationStyle) -> &'static str {
    match style {
        Formal => {
            "The conversation seems to be slowing down. MANDATORY: ask an interesting question \
             or suggest a new topic for discussion, considering the user's age."
        }
        Friendly => {
            "The conversation is becoming less active. MANDATORY: take initiative: tell something \
             interesting, ask an unexpected question, or suggest discussing something exciting."
        }
        Romantic => {
            "The dialogue is becoming less intense. MANDATORY: support the conversation: share your \
             feelings, ask a personal question, or suggest talking about something interesting."
        }
        Playful => {
            "Oh, the conversation is dying! MANDATORY: shake up the conversation: tell a funny story, \
             challenge the user, or ask an interesting question!"
        }
    }
}
