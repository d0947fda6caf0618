//! # companion-chat — Conversation Layer of the Companion
//!
//! Turns engagement decisions into text and runs the interactive session:
//!
//! - [`Companion`]: one session; picks a remote or canned reply for each
//!   message and appends initiatives when the engine calls for them
//! - [`canned`]: keyword intents and the canned reply bodies
//! - [`session`]: the input loop with idle detection and `/status`
//! - [`setup`]: the age and style menu shown before a session
//! - [`backend`]: the completion client chosen from configuration
//!
//! The `companion` binary wires these to stdin/stdout.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod canned;
pub mod companion;
pub mod history;
pub mod reply;
pub mod session;
pub mod setup;

pub use companion::{Companion, SessionId};
pub use history::ConversationHistory;
pub use reply::{Reply, ReplySource, SpokenInitiative};
pub use session::{SessionEnd, SessionOptions};
