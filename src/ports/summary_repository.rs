//! Summary store port: at most one summary per session.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::SessionSummary;
use async_trait::async_trait;

/// Repository port for session summaries.
///
/// Keyed uniquely by session id; `upsert` replaces on conflict so
/// finalizing twice never creates duplicates.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Insert or replace the summary for a session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, summary: &SessionSummary) -> Result<(), DomainError>;

    /// Find the summary for a session, if one exists.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError>;
}
