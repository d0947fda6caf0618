//! Rolling conversation history sent to the remote service.

use companion_llm::ChatMessage;

/// The most recent messages of a conversation, oldest first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
    limit: usize,
}

impl ConversationHistory {
    /// An empty history keeping at most `limit` messages.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Append a message, dropping the oldest ones past the limit.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > self.limit {
            let excess = self.messages.len() - self.limit;
            self.messages.drain(..excess);
        }
    }

    /// Messages, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been said yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of messages kept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
