//! Error type shared by the feedback flow handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::AssistantError;

/// Errors surfaced by the start/turn/finalize handlers.
#[derive(Debug, Clone, Error)]
pub enum FeedbackError {
    /// No location matches the given slug.
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// The session id is unknown.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session has been finalized; its transcript is immutable.
    #[error("Session is closed")]
    SessionClosed,

    /// The request is missing required input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transcript is empty; nothing to summarize.
    #[error("No messages to summarize")]
    NoMessages,

    /// The assistant service could not be reached. Retryable: the
    /// transcript is already consistent, resubmitting the turn is safe.
    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(String),

    /// A persistence operation failed.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl From<DomainError> for FeedbackError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionClosed => FeedbackError::SessionClosed,
            ErrorCode::NoMessages => FeedbackError::NoMessages,
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest => {
                FeedbackError::InvalidRequest(err.message)
            }
            _ => FeedbackError::Persistence(err.to_string()),
        }
    }
}

impl From<AssistantError> for FeedbackError {
    fn from(err: AssistantError) -> Self {
        FeedbackError::AssistantUnavailable(err.to_string())
    }
}
