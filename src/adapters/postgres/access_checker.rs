//! PostgreSQL implementation of AccessChecker.
//!
//! Ownership lives on the `businesses.owner_id` column; session access
//! follows the session -> location -> business chain in one query.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{BusinessId, DomainError, ErrorCode, SessionId, UserId};
use crate::ports::AccessChecker;

use super::db_error;

/// PostgreSQL implementation of AccessChecker.
#[derive(Clone)]
pub struct PostgresAccessChecker {
    pool: PgPool,
}

impl PostgresAccessChecker {
    /// Creates a new PostgresAccessChecker.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessChecker for PostgresAccessChecker {
    async fn check_business_access(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> Result<(), DomainError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT owner_id FROM businesses WHERE id = $1")
                .bind(business_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch business owner", e))?;

        match row {
            Some((owner_id,)) if owner_id == user_id.as_str() => Ok(()),
            Some(_) => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Business belongs to another owner",
            )),
            None => Err(DomainError::new(
                ErrorCode::BusinessNotFound,
                format!("Business not found: {}", business_id),
            )),
        }
    }

    async fn check_session_access(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<BusinessId, DomainError> {
        let row: Option<(uuid::Uuid, String)> = sqlx::query_as(
            r#"
            SELECT b.id, b.owner_id
            FROM feedback_sessions s
            JOIN locations l ON l.id = s.location_id
            JOIN businesses b ON b.id = l.business_id
            WHERE s.id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session ownership", e))?;

        match row {
            Some((business_id, owner_id)) if owner_id == user_id.as_str() => {
                Ok(BusinessId::from_uuid(business_id))
            }
            Some(_) => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Session belongs to another owner",
            )),
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session_id),
            )),
        }
    }
}
