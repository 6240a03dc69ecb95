//! Messages forming a session's transcript.

use crate::domain::foundation::{MessageId, SessionId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageRole {
    Customer,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageRole::Customer => "CUSTOMER",
            MessageRole::Assistant => "ASSISTANT",
        };
        write!(f, "{}", s)
    }
}

/// One immutable turn in a session transcript.
///
/// Messages are never mutated or deleted; transcript order is creation
/// time ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    /// Unique identifier for this message.
    pub id: MessageId,
    /// Session this message belongs to.
    pub session_id: SessionId,
    /// Who authored the message.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
    /// Creation time; defines the transcript total order.
    pub created_at: Timestamp,
}

impl FeedbackMessage {
    /// Creates a new customer message.
    pub fn customer(session_id: SessionId, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::Customer, content)
    }

    /// Creates a new assistant message.
    pub fn assistant(session_id: SessionId, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::Assistant, content)
    }

    fn new(session_id: SessionId, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            session_id,
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }
}
