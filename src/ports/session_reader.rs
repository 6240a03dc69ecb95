//! Session reader port (dashboard read side).

use async_trait::async_trait;

use crate::domain::dashboard::SessionOverview;
use crate::domain::foundation::{BusinessId, DomainError, SessionId};
use crate::domain::session::{FeedbackMessage, SessionSummary};

/// Full detail view of one session for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDetail {
    pub overview: SessionOverview,
    pub messages: Vec<FeedbackMessage>,
    pub summary: Option<SessionSummary>,
}

/// Read-side port for dashboard session queries.
///
/// Rows come back joined with location name and summary data; statistics
/// and filtering are computed in the domain layer.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// All sessions for a business, newest first.
    async fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> Result<Vec<SessionOverview>, DomainError>;

    /// Full detail for one session. Returns `None` if not found.
    async fn find_detail(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionDetail>, DomainError>;
}
