//! PostgreSQL implementation of SummaryRepository.
//!
//! `feedback_summaries` is keyed by session id; the upsert replaces on
//! conflict so finalizing a session twice never creates a second row.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Sentiment, SessionId, Timestamp};
use crate::domain::session::SessionSummary;
use crate::ports::SummaryRepository;

use super::{db_error, get_column};

/// PostgreSQL implementation of SummaryRepository.
#[derive(Clone)]
pub struct PostgresSummaryRepository {
    pool: PgPool,
}

impl PostgresSummaryRepository {
    /// Creates a new PostgresSummaryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PostgresSummaryRepository {
    async fn upsert(&self, summary: &SessionSummary) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedback_summaries (session_id, summary, sentiment, score, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_id) DO UPDATE SET
                summary = EXCLUDED.summary,
                sentiment = EXCLUDED.sentiment,
                score = EXCLUDED.score,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(summary.session_id.as_uuid())
        .bind(&summary.summary)
        .bind(summary.sentiment.as_str())
        .bind(summary.score)
        .bind(summary.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert summary", e))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT session_id, summary, sentiment, score, created_at
            FROM feedback_summaries
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch summary", e))?;

        row.map(row_to_summary).transpose()
    }
}

pub(crate) fn str_to_sentiment(s: &str) -> Result<Sentiment, DomainError> {
    match s {
        "POSITIVE" => Ok(Sentiment::Positive),
        "NEUTRAL" => Ok(Sentiment::Neutral),
        "NEGATIVE" => Ok(Sentiment::Negative),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid sentiment: {}", s),
        )),
    }
}

pub(crate) fn row_to_summary(row: PgRow) -> Result<SessionSummary, DomainError> {
    let session_id: uuid::Uuid = get_column(&row, "session_id")?;
    let summary: String = get_column(&row, "summary")?;
    let sentiment_str: String = get_column(&row, "sentiment")?;
    let score: Option<f64> = get_column(&row, "score")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(SessionSummary {
        session_id: SessionId::from_uuid(session_id),
        summary,
        sentiment: str_to_sentiment(&sentiment_str)?,
        score,
        created_at: Timestamp::from_datetime(created_at),
    })
}
