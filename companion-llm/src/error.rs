//! Remote completion error types.
//!
//! Every variant renders as a single line, since the chat layer shows the
//! error to the user as a one-line notice before falling back to canned
//! replies.

use serde_json::Value;
use thiserror::Error;

/// Longest service detail kept in a [`LlmError::Status`].
const MAX_DETAIL_CHARS: usize = 200;

/// Why the remote service could not produce the companion's next line.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The service answered with a non-success status.
    #[error("service answered HTTP {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The service's own message, collapsed to one line.
        detail: String,
    },

    /// The request never got a status back (connection reset, bad URL, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// Response body was not valid JSON.
    #[error("reply was not JSON: {0}")]
    ParseError(String),

    /// Response parsed but carried no usable reply text.
    #[error("reply had no content: {0}")]
    MalformedResponse(String),

    /// No answer within the configured timeout (milliseconds).
    #[error("no reply within {0}ms")]
    Timeout(u64),

    /// No backend is configured or reachable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Every attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Attempts made.
        attempts: u32,
        /// Error of the final attempt.
        last_error: String,
    },

    /// The client is configured in a way that cannot work.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Classify a transport-level `reqwest` failure for a request that was
    /// sent with a `timeout_ms` deadline.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::Unavailable(one_line(&err.to_string()))
        } else if err.is_decode() {
            Self::ParseError(one_line(&err.to_string()))
        } else {
            Self::Transport(one_line(&err.to_string()))
        }
    }

    /// Build a [`LlmError::Status`] from a status code and the raw body.
    ///
    /// OpenAI (`{"error": {"message": ..}}`) and Ollama (`{"error": ".."}`)
    /// error bodies are reduced to their message; anything else is kept
    /// with its whitespace collapsed.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            let error = &json["error"];
            error["message"]
                .as_str()
                .or_else(|| error.as_str())
                .map(str::to_owned)
        });
        let detail = one_line(message.as_deref().unwrap_or(body));
        Self::Status {
            status,
            detail: truncate(&detail, MAX_DETAIL_CHARS),
        }
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// Client errors other than 408 and 429 are final, as are replies that
    /// arrived but were unusable and configuration problems.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => matches!(status, 408 | 429 | 500..),
            Self::Transport(_) | Self::Timeout(_) | Self::Unavailable(_) | Self::ParseError(_) => {
                true
            }
            Self::MalformedResponse(_) | Self::RetriesExhausted { .. } | Self::ConfigError(_) => {
                false
            }
        }
    }
}

/// Collapse all runs of whitespace, newlines included, to single spaces.
pub(crate) fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
