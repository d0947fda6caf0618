//! Session Loop — reads user lines, prints replies, speaks up during silences.
//!
//! Waiting for input is bounded by the idle threshold. When it runs out and
//! the companion has not yet spoken during this silence, it takes initiative
//! once; the next user line clears the paused flag.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use companion_core::config::SessionConfig;
use companion_core::Engagement;
use companion_llm::ChatBackend;
use crossterm::style::Stylize;
use rand::Rng;
use tokio::io::{AsyncBufRead, Lines};
use tracing::{debug, info};

use crate::companion::Companion;

/// Typed in place of a message to print the engagement state.
pub const STATUS_COMMAND: &str = "/status";

/// Loop behavior.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Silence after which the companion speaks up.
    pub idle_prompt: Duration,
    /// Lines (case-insensitive) that end the session.
    pub exit_commands: Vec<String>,
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            idle_prompt: Duration::from_secs(config.idle_prompt_secs),
            exit_commands: config.exit_commands.clone(),
        }
    }
}

impl SessionOptions {
    fn is_exit(&self, message: &str) -> bool {
        self.exit_commands.iter().any(|c| c.eq_ignore_ascii_case(message))
    }
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed an exit command.
    ExitCommand,
    /// Input was closed.
    EndOfInput,
}

/// Run the conversation until an exit command or end of input.
///
/// # Errors
/// Fails only on I/O errors reading input or writing output.
pub async fn run<B, R, I, W>(
    companion: &mut Companion<B, R>,
    lines: &mut Lines<I>,
    out: &mut W,
    options: &SessionOptions,
) -> Result<SessionEnd>
where
    B: ChatBackend,
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "\n{}", "Starting conversation...".cyan())?;
    let greeting = companion.greeting();
    writeln!(out, "{}", greeting.magenta())?;

    let mut show_prompt = true;
    loop {
        if show_prompt {
            write!(out, "{}", "You: ".green())?;
            out.flush()?;
        }
        show_prompt = true;

        let line = match tokio::time::timeout(options.idle_prompt, lines.next_line()).await {
            Err(_) => {
                if !companion.conversation_paused() {
                    debug!(session = %companion.id(), "idle threshold reached");
                    let spoken = companion.proactive_initiative(Instant::now());
                    writeln!(out, "\n{}", spoken.text.cyan())?;
                    companion.set_conversation_paused(true);
                } else {
                    show_prompt = false;
                }
                continue;
            }
            Ok(read) => read.context("failed to read input")?,
        };

        let Some(line) = line else {
            info!(session = %companion.id(), "input closed");
            return Ok(SessionEnd::EndOfInput);
        };

        companion.set_conversation_paused(false);
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        if options.is_exit(message) {
            writeln!(out, "\n{}", "Ending program. Goodbye!".cyan())?;
            info!(session = %companion.id(), "session ended by user");
            return Ok(SessionEnd::ExitCommand);
        }

        if message == STATUS_COMMAND {
            write_status(out, companion.engagement(), Instant::now())?;
            continue;
        }

        let reply = companion.respond(message).await;
        if let Some(notice) = &reply.notice {
            writeln!(out, "{}", notice.as_str().red())?;
        }
        writeln!(out, "{}", reply.text.as_str().magenta())?;
        if let Some(initiative) = &reply.initiative {
            writeln!(out, "\n{}", initiative.text.as_str().cyan())?;
        }
    }
}

/// Print a snapshot of the emotional, topic and initiative state.
///
/// # Errors
/// Fails only if `out` cannot be written.
pub fn write_status<R: Rng>(
    out: &mut impl Write,
    engagement: &Engagement<R>,
    now: Instant,
) -> Result<()> {
    let emotion = engagement.emotion();
    let topics = engagement.topics();
    let engine = engagement.initiative();
    let state = engine.state();
    let decision = engagement.evaluate(now);

    let list = |items: Vec<&str>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    let mut lines = vec![
        format!(
            "mood {} | energy {} | attachment {} | interest {}",
            emotion.mood, emotion.energy, emotion.attachment, emotion.topic_interest
        ),
        format!(
            "topic {} | recent {} | liked {} | disliked {}",
            topics.current_topic().map_or("-", |t| t.as_str()),
            list(topics.recent_topics().iter().map(|t| t.as_str()).collect()),
            list(topics.favorite_topics().iter().map(|t| t.as_str()).collect()),
            list(topics.disliked_topics().iter().map(|t| t.as_str()).collect()),
        ),
        format!(
            "initiatives {} ({} ok / {} ignored) | interval {:.1}s | short run {} | score now {:.2}",
            state.initiative_count,
            state.successful_initiatives,
            state.unsuccessful_initiatives,
            state.interval_between_initiatives,
            engine.short_message_counter(),
            decision.score,
        ),
    ];
    for (category, fact) in topics.important_info() {
        lines.push(format!("{category}: {fact}"));
    }

    for line in lines {
        writeln!(out, "{}", line.dark_grey())?;
    }
    Ok(())
}
