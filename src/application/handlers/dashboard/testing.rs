//! In-memory port implementations shared by the dashboard handler tests.

use async_trait::async_trait;

use crate::domain::dashboard::SessionOverview;
use crate::domain::foundation::{BusinessId, DomainError, ErrorCode, SessionId, UserId};
use crate::ports::{AccessChecker, SessionDetail, SessionReader};

/// Access checker with a fixed verdict.
pub struct MockAccess {
    allow: bool,
    business_id: BusinessId,
}

impl MockAccess {
    pub fn allowing() -> Self {
        Self {
            allow: true,
            business_id: BusinessId::new(),
        }
    }

    pub fn denying() -> Self {
        Self {
            allow: false,
            business_id: BusinessId::new(),
        }
    }
}

#[async_trait]
impl AccessChecker for MockAccess {
    async fn check_business_access(
        &self,
        _user_id: &UserId,
        _business_id: &BusinessId,
    ) -> Result<(), DomainError> {
        if self.allow {
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::Forbidden, "Access denied"))
        }
    }

    async fn check_session_access(
        &self,
        _user_id: &UserId,
        _session_id: &SessionId,
    ) -> Result<BusinessId, DomainError> {
        if self.allow {
            Ok(self.business_id)
        } else {
            Err(DomainError::new(ErrorCode::Forbidden, "Access denied"))
        }
    }
}

/// Session reader backed by fixed rows.
#[derive(Default)]
pub struct MockReader {
    pub rows: Vec<SessionOverview>,
    pub details: Vec<SessionDetail>,
}

impl MockReader {
    pub fn with_rows(rows: Vec<SessionOverview>) -> Self {
        Self {
            rows,
            details: Vec::new(),
        }
    }

    pub fn with_detail(detail: SessionDetail) -> Self {
        Self {
            rows: Vec::new(),
            details: vec![detail],
        }
    }
}

#[async_trait]
impl SessionReader for MockReader {
    async fn list_for_business(
        &self,
        _business_id: &BusinessId,
    ) -> Result<Vec<SessionOverview>, DomainError> {
        Ok(self.rows.clone())
    }

    async fn find_detail(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionDetail>, DomainError> {
        Ok(self
            .details
            .iter()
            .find(|d| d.overview.session_id == *session_id)
            .cloned())
    }
}
