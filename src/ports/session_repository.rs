//! Session repository port (write side).

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::FeedbackSession;
use async_trait::async_trait;

/// Repository port for FeedbackSession persistence.
///
/// Only the conversation turn handler and the summarization pipeline
/// mutate sessions through this port; dashboards read through
/// [`super::SessionReader`].
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &FeedbackSession) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackSession>, DomainError>;

    /// Persist a session's current status.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_status(&self, session: &FeedbackSession) -> Result<(), DomainError>;
}
