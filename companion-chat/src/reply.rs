//! What a turn produces.

use std::fmt;

use companion_core::Initiative;

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// The remote completion service.
    Remote,
    /// Canned templates; no remote service configured.
    Canned,
    /// Canned templates after the remote service failed.
    Fallback,
}

/// An initiative together with the line that voices it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenInitiative {
    /// Topic and form.
    pub initiative: Initiative,
    /// The rendered line.
    pub text: String,
}

/// The companion's answer to one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Main reply text.
    pub text: String,
    /// Initiative appended to the reply, if one was taken.
    pub initiative: Option<SpokenInitiative>,
    /// One-line non-fatal notice, e.g. a remote failure.
    pub notice: Option<String>,
    /// Origin of `text`.
    pub source: ReplySource,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(initiative) = &self.initiative {
            write!(f, "\n\n{}", initiative.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::{InitiativeKind, Topic};

    #[test]
    fn display_appends_initiative_after_blank_line() {
        let reply = Reply {
            text: "happily Hello!".into(),
            initiative: Some(SpokenInitiative {
                initiative: Initiative {
                    topic: Topic::from("art"),
                    kind: InitiativeKind::Question,
                },
                text: "What about art?".into(),
            }),
            notice: None,
            source: ReplySource::Canned,
        };
        assert_eq!(reply.to_string(), "happily Hello!\n\nWhat about art?");
    }
}
