//! # companion-llm — Remote Chat Completion for the Companion
//!
//! A thin, failure-tolerant client for chat-completion services:
//!   - **OpenAI-compatible API** (`/v1/chat/completions`, bearer key)
//!   - **Ollama** (`/api/chat`, local, no key)
//!
//! Every call either yields a non-empty reply or an [`LlmError`]. Callers are
//! expected to treat any error as "use the canned reply instead"; nothing in
//! here is fatal to a session.
//!
//! [`ChatBackend`] is the seam the chat layer depends on, so sessions can be
//! driven by [`LlmClient`] in production and by an in-memory double in tests.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{ChatBackend, LlmClient, LlmProvider};
pub use error::LlmError;
pub use types::{ChatMessage, CompletionSettings, LlmResponse, Role};
