//! Feedback assistant port - interface to the external language model.
//!
//! Two operations: `converse` drives one chat turn, `summarize` digests a
//! finished transcript. Implementations own the strict-shape coercion of
//! whatever the model returns: malformed-but-received output is absorbed
//! into the documented fallback values and never surfaced as an error.
//! Only transport-level failures (network, timeout, auth, 5xx) escape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Sentiment;
use crate::domain::session::{FeedbackMessage, MessageRole};

/// Canned reply used when the model's chat output cannot be parsed.
pub const FALLBACK_REPLY: &str = "Thanks for sharing. Anything else we should improve?";

/// Canned summary used when the model's digest output cannot be parsed.
pub const FALLBACK_SUMMARY: &str =
    "Customer shared feedback. No additional summary was generated.";

/// Generic wire role handed to the external model.
///
/// Domain roles map `CUSTOMER -> User` and `ASSISTANT -> Assistant`
/// before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    User,
    Assistant,
}

impl TranscriptRole {
    /// Returns the wire-format role string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
        }
    }
}

/// One transcript entry in wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub content: String,
}

impl TranscriptEntry {
    /// Maps a stored transcript message into wire format.
    pub fn from_message(message: &FeedbackMessage) -> Self {
        let role = match message.role {
            MessageRole::Customer => TranscriptRole::User,
            MessageRole::Assistant => TranscriptRole::Assistant,
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }

    /// Maps a full stored transcript into wire format, preserving order.
    pub fn from_transcript(messages: &[FeedbackMessage]) -> Vec<Self> {
        messages.iter().map(Self::from_message).collect()
    }
}

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantTurn {
    /// Reply to show the customer (fallback text if coerced).
    pub reply: String,
    /// True when the model judges the conversation complete.
    pub should_finalize: bool,
}

/// Result of summarizing a transcript, already coerced into the fixed
/// schema: normalized sentiment and a clamped (or absent) score.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDigest {
    pub summary: String,
    pub sentiment: Sentiment,
    pub score: Option<f64>,
}

/// Assistant call failures that escape the adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    /// The service could not be reached or returned a server error.
    #[error("assistant unavailable: {message}")]
    Unavailable { message: String },

    /// The request exceeded the configured timeout.
    #[error("assistant request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Network-level failure during the request.
    #[error("network error: {0}")]
    Network(String),

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },
}

impl AssistantError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true if this error is retryable. Timeouts, network errors,
    /// rate limits and 5xx responses all classify as transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AssistantError::AuthenticationFailed)
    }
}

/// Port for the external conversational and summarization model.
#[async_trait]
pub trait FeedbackAssistant: Send + Sync {
    /// Runs one chat turn: ordered instruction blocks plus the transcript
    /// so far, returning the reply and the model's finalize judgment.
    async fn converse(
        &self,
        instructions: &[String],
        transcript: &[TranscriptEntry],
    ) -> Result<AssistantTurn, AssistantError>;

    /// Summarizes a full transcript into the fixed digest schema.
    async fn summarize(
        &self,
        transcript: &[TranscriptEntry],
    ) -> Result<SessionDigest, AssistantError>;
}
