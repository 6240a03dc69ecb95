//! PostgreSQL implementation of SessionReader (dashboard read side).
//!
//! Overview rows come back pre-joined with location name and summary
//! brief; statistics and filtering stay in the domain layer.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::dashboard::{SessionOverview, SummaryBrief};
use crate::domain::foundation::{BusinessId, DomainError, LocationId, SessionId, Timestamp};
use crate::ports::{SessionDetail, SessionReader};

use super::message_repository::row_to_message;
use super::session_repository::str_to_session_status;
use super::summary_repository::str_to_sentiment;
use super::{db_error, get_column};

/// PostgreSQL implementation of SessionReader.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    /// Creates a new PostgresSessionReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_overview(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionOverview>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT s.id, s.location_id, l.name AS location_name, s.customer_name,
                   s.status, s.created_at, m.sentiment, m.score
            FROM feedback_sessions s
            JOIN locations l ON l.id = s.location_id
            LEFT JOIN feedback_summaries m ON m.session_id = s.id
            WHERE s.id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session overview", e))?;

        row.map(row_to_overview).transpose()
    }
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> Result<Vec<SessionOverview>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.location_id, l.name AS location_name, s.customer_name,
                   s.status, s.created_at, m.sentiment, m.score
            FROM feedback_sessions s
            JOIN locations l ON l.id = s.location_id
            LEFT JOIN feedback_summaries m ON m.session_id = s.id
            WHERE l.business_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(business_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch sessions for business", e))?;

        rows.into_iter().map(row_to_overview).collect()
    }

    async fn find_detail(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionDetail>, DomainError> {
        let overview = match self.fetch_overview(session_id).await? {
            Some(overview) => overview,
            None => return Ok(None),
        };

        let message_rows = sqlx::query(
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
        .map_err(|e| db_error("Failed to fetch session messages", e))?;

        let messages = message_rows
            .into_iter()
            .map(row_to_message)
            .collect::<Result<Vec<_>, _>>()?;

        let summary_row = sqlx::query(
            r#"
            SELECT session_id, summary, sentiment, score, created_at
            FROM feedback_summaries
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session summary", e))?;

        let summary = summary_row
            .map(super::summary_repository::row_to_summary)
            .transpose()?;

        Ok(Some(SessionDetail {
            overview,
            messages,
            summary,
        }))
    }
}

fn row_to_overview(row: PgRow) -> Result<SessionOverview, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let location_id: uuid::Uuid = get_column(&row, "location_id")?;
    let location_name: String = get_column(&row, "location_name")?;
    let customer_name: Option<String> = get_column(&row, "customer_name")?;
    let status_str: String = get_column(&row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;
    let sentiment_str: Option<String> = get_column(&row, "sentiment")?;
    let score: Option<f64> = get_column(&row, "score")?;

    let summary = sentiment_str
        .as_deref()
        .map(str_to_sentiment)
        .transpose()?
        .map(|sentiment| SummaryBrief { sentiment, score });

    Ok(SessionOverview {
        session_id: SessionId::from_uuid(id),
        location_id: LocationId::from_uuid(location_id),
        location_name,
        customer_name,
        status: str_to_session_status(&status_str)?,
        created_at: Timestamp::from_datetime(created_at),
        summary,
    })
}
