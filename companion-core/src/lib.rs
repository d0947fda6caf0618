//! # Companion Core Library
//!
//! The decision-making half of the companion: everything that happens to a
//! user message before any text is produced.
//!
//! - **Emotional state** — mood, energy, attachment and topic interest,
//!   nudged by trigger words and message length ([`emotion`])
//! - **Topic memory** — current topic, history, a short recency window,
//!   liked/disliked topics and extracted personal facts ([`topics`])
//! - **Initiative engine** — a weighted score that decides when the companion
//!   should speak up, what about, and in which form, and that retunes its own
//!   cadence from how the user reacts ([`initiative`])
//!
//! [`Engagement`] ties the three together into a single per-turn pipeline.
//! The persona tables ([`persona`]) and canned phrasing ([`templates`]) are
//! keyed on a closed [`CommunicationStyle`] enum, so every style is covered by
//! exhaustive matches.
//!
//! This crate performs no I/O and never reads the environment: all inputs
//! (age, style, tunables, clock, randomness) are constructor parameters.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod emotion;
pub mod engagement;
pub mod error;
pub mod initiative;
pub mod persona;
pub mod templates;
pub mod topics;
pub mod types;

pub use config::CompanionConfig;
pub use engagement::{Engagement, TurnAssessment};
pub use error::CompanionError;
pub use initiative::{Initiative, InitiativeDecision, InitiativeEngine, InitiativeKind};
pub use types::*;
