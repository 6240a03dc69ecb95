//! PostgreSQL implementation of MessageRepository.
//!
//! Transcript rows are append-only; ordering is `created_at` ascending
//! with the insert sequence as tiebreak.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, MessageId, SessionId, Timestamp};
use crate::domain::session::{FeedbackMessage, MessageRole};
use crate::ports::MessageRepository;

use super::{db_error, get_column};

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// Creates a new PostgresMessageRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, message: &FeedbackMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback_messages (id, session_id, role, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.session_id.as_uuid())
        .bind(role_to_str(message.role))
        .bind(&message.content)
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session not found: {}", message.session_id),
                )
            } else {
                db_error("Failed to insert message", e)
            }
        })?;

        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<FeedbackMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, content, created_at
            FROM feedback_messages
            WHERE session_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch messages", e))?;

        rows.into_iter().map(row_to_message).collect()
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(
        e.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::ForeignKeyViolation)
    )
}

pub(crate) fn role_to_str(role: MessageRole) -> &'static str {
    match role {
        MessageRole::Customer => "CUSTOMER",
        MessageRole::Assistant => "ASSISTANT",
    }
}

pub(crate) fn str_to_role(s: &str) -> Result<MessageRole, DomainError> {
    match s {
        "CUSTOMER" => Ok(MessageRole::Customer),
        "ASSISTANT" => Ok(MessageRole::Assistant),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid message role: {}", s),
        )),
    }
}

pub(crate) fn row_to_message(row: PgRow) -> Result<FeedbackMessage, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let session_id: uuid::Uuid = get_column(&row, "session_id")?;
    let role_str: String = get_column(&row, "role")?;
    let content: String = get_column(&row, "content")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(FeedbackMessage {
        id: MessageId::from_uuid(id),
        session_id: SessionId::from_uuid(session_id),
        role: str_to_role(&role_str)?,
        content,
        created_at: Timestamp::from_datetime(created_at),
    })
}
