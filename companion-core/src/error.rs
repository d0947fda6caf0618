//! Error types for the companion core library.

use thiserror::Error;

/// Top-level error type for all companion core operations.
///
/// Only construction can fail: once a session is built every per-turn update
/// is a total function over validated inputs.
#[derive(Error, Debug)]
pub enum CompanionError {
    /// The user's age is outside the supported range.
    #[error("Invalid age: {value} (expected {min}..={max})")]
    InvalidAge {
        /// The rejected value.
        value: i64,
        /// Smallest accepted age.
        min: u8,
        /// Largest accepted age.
        max: u8,
    },

    /// The communication style could not be recognized.
    #[error("Invalid communication style: {0}")]
    InvalidStyle(String),

    /// A topic vocabulary must contain at least one topic.
    #[error("Topic vocabulary is empty")]
    EmptyVocabulary,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CompanionError>;
