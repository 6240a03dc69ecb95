//! Access control port.
//!
//! Ownership verification is delegated to an external authorization
//! collaborator: every dashboard-facing operation must confirm the
//! requesting principal owns the business before touching session data.

use async_trait::async_trait;

use crate::domain::foundation::{BusinessId, DomainError, SessionId, UserId};

/// Port for verifying a principal's access to business-scoped data.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Checks that the user owns the given business.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user does not own the business
    async fn check_business_access(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> Result<(), DomainError>;

    /// Checks that the user owns the business that owns the session's
    /// location, returning that business id.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session id is unknown
    /// - `Forbidden` if the ownership chain does not reach the user
    async fn check_session_access(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<BusinessId, DomainError>;
}
