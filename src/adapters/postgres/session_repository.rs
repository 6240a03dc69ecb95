//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, LocationId, SessionId, SessionStatus, Timestamp,
};
use crate::domain::session::FeedbackSession;
use crate::ports::SessionRepository;

use super::{db_error, get_column};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: &FeedbackSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback_sessions (id, location_id, customer_name, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.location_id().as_uuid())
        .bind(session.customer_name())
        .bind(session_status_to_str(session.status()))
        .bind(session.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert session", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, location_id, customer_name, status, created_at
            FROM feedback_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn update_status(&self, session: &FeedbackSession) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE feedback_sessions SET status = $2 WHERE id = $1")
            .bind(session.id().as_uuid())
            .bind(session_status_to_str(session.status()))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update session status", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }
}

pub(crate) fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Active => "ACTIVE",
        SessionStatus::Closed => "CLOSED",
    }
}

pub(crate) fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "ACTIVE" => Ok(SessionStatus::Active),
        "CLOSED" => Ok(SessionStatus::Closed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn row_to_session(row: PgRow) -> Result<FeedbackSession, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let location_id: uuid::Uuid = get_column(&row, "location_id")?;
    let customer_name: Option<String> = get_column(&row, "customer_name")?;
    let status_str: String = get_column(&row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(FeedbackSession::reconstitute(
        SessionId::from_uuid(id),
        LocationId::from_uuid(location_id),
        customer_name,
        str_to_session_status(&status_str)?,
        Timestamp::from_datetime(created_at),
    ))
}
