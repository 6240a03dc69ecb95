//! GetSession query handler: full transcript and summary for one session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{AccessChecker, SessionDetail, SessionReader};

use super::DashboardError;

/// Query for one session's detail view.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Handler for GetSession queries.
pub struct GetSessionHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    access: Arc<C>,
    reader: Arc<R>,
}

impl<C, R> GetSessionHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(access: Arc<C>, reader: Arc<R>) -> Self {
        Self { access, reader }
    }

    /// Handles a session detail query.
    ///
    /// The ownership check runs before the read, so a session belonging to
    /// another business is indistinguishable from a missing one only after
    /// the checker has rejected it.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionDetail, DashboardError> {
        self.access
            .check_session_access(&query.user_id, &query.session_id)
            .await?;

        self.reader
            .find_detail(&query.session_id)
            .await?
            .ok_or(DashboardError::SessionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::dashboard::testing::{MockAccess, MockReader};
    use crate::domain::dashboard::SessionOverview;
    use crate::domain::foundation::{LocationId, SessionStatus, Timestamp};
    use crate::domain::session::FeedbackMessage;

    fn detail(session_id: SessionId) -> SessionDetail {
        SessionDetail {
            overview: SessionOverview {
                session_id,
                location_id: LocationId::new(),
                location_name: "Downtown".to_string(),
                customer_name: Some("Dana".to_string()),
                status: SessionStatus::Closed,
                created_at: Timestamp::now(),
                summary: None,
            },
            messages: vec![FeedbackMessage::customer(session_id, "Great service")],
            summary: None,
        }
    }

    #[tokio::test]
    async fn returns_detail_for_owned_session() {
        let session_id = SessionId::new();
        let handler = GetSessionHandler::new(
            Arc::new(MockAccess::allowing()),
            Arc::new(MockReader::with_detail(detail(session_id))),
        );

        let result = handler
            .handle(GetSessionQuery {
                user_id: UserId::new("owner-1").unwrap(),
                session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.overview.session_id, session_id);
        assert_eq!(result.messages.len(), 1);
    }

    #[tokio::test]
    async fn missing_detail_maps_to_not_found() {
        let handler = GetSessionHandler::new(
            Arc::new(MockAccess::allowing()),
            Arc::new(MockReader::default()),
        );

        let result = handler
            .handle(GetSessionQuery {
                user_id: UserId::new("owner-1").unwrap(),
                session_id: SessionId::new(),
            })
            .await;

        assert!(matches!(result, Err(DashboardError::SessionNotFound)));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let session_id = SessionId::new();
        let handler = GetSessionHandler::new(
            Arc::new(MockAccess::denying()),
            Arc::new(MockReader::with_detail(detail(session_id))),
        );

        let result = handler
            .handle(GetSessionQuery {
                user_id: UserId::new("intruder").unwrap(),
                session_id,
            })
            .await;

        assert!(matches!(result, Err(DashboardError::Forbidden)));
    }
}
