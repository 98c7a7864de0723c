//! Inter-stage messages and the append-only log that records them.
//!
//! A stage hands its output forward by appending a [`Message`] addressed to
//! the next stage; the next stage reads [`MessageLog::latest_for`] itself. The
//! log lives for exactly one run and is returned to the caller for auditing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{StageId, Timestamp};

/// Number of content characters shown by a message's [`Display`] form.
///
/// [`Display`]: std::fmt::Display
const PREVIEW_CHARS: usize = 100;

/// A single hand-off between two stages. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    sender: StageId,
    recipient: StageId,
    content: String,
    timestamp: Timestamp,
}

impl Message {
    /// Stage that produced the content.
    pub fn sender(&self) -> StageId {
        self.sender
    }

    /// Stage the content is addressed to.
    pub fn recipient(&self) -> StageId {
        self.recipient
    }

    /// The handed-off text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was appended.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        write!(
            f,
            "[{}] {} → {}: {}...",
            self.timestamp.clock(),
            self.sender,
            self.recipient,
            preview
        )
    }
}

// ---------------------------------------------------------------------------

/// Ordered, append-only record of the messages exchanged during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps and stores a message, returning the stored record.
    pub fn append(
        &mut self,
        sender: StageId,
        recipient: StageId,
        content: impl Into<String>,
    ) -> &Message {
        let message = Message {
            sender,
            recipient,
            content: content.into(),
            timestamp: Timestamp::now(),
        };
        debug!(
            sender = %message.sender,
            recipient = %message.recipient,
            chars = message.content.chars().count(),
            position = self.messages.len(),
            "message appended"
        );
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Returns the most recently appended message addressed to `recipient`.
    pub fn latest_for(&self, recipient: StageId) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
    }

    /// Number of messages exchanged so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
