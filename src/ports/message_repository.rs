//! Transcript store port: append-only ordered message log per session.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::FeedbackMessage;
use async_trait::async_trait;

/// Repository port for the session transcript.
///
/// Messages are immutable rows; the transcript order is creation time
/// ascending and must be stable across repeated reads.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append one message to a session's transcript.
    ///
    /// Does not touch session status.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session id is unknown
    /// - `DatabaseError` on persistence failure
    async fn append(&self, message: &FeedbackMessage) -> Result<(), DomainError>;

    /// List all messages for a session in ascending creation order.
    ///
    /// Returns an empty vec when no messages exist yet. Repeated calls
    /// are idempotent reads.
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<FeedbackMessage>, DomainError>;
}
