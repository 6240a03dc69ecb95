//! PostgreSQL implementation of the location ports.
//!
//! One store backs both sides: slug resolution and prompt context for the
//! public feedback flow, plus the writes used by location management.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::{BusinessId, DomainError, LocationId, Timestamp};
use crate::ports::{LocationContext, LocationReader, LocationRecord, LocationRepository};

use super::{db_error, get_column};

/// PostgreSQL implementation of LocationReader and LocationRepository.
#[derive(Clone)]
pub struct PostgresLocationStore {
    pool: PgPool,
}

impl PostgresLocationStore {
    /// Creates a new PostgresLocationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationReader for PostgresLocationStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LocationRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, business_id, name, slug, created_at
            FROM locations
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch location by slug", e))?;

        row.map(row_to_location).transpose()
    }

    async fn context_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<LocationContext>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT l.name AS location_name,
                   b.name AS business_name, b.business_type, b.description,
                   b.focus_topic_1, b.focus_topic_2, b.focus_topic_3
            FROM locations l
            JOIN businesses b ON b.id = l.business_id
            WHERE l.id = $1
            "#,
        )
        .bind(location_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch location context", e))?;

        row.map(row_to_context).transpose()
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationStore {
    async fn create(&self, location: &LocationRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, business_id, name, slug, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(location.id.as_uuid())
        .bind(location.business_id.as_uuid())
        .bind(&location.name)
        .bind(&location.slug)
        .bind(location.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert location", e))?;

        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check slug", e))?;

        Ok(result.0 > 0)
    }

    async fn count_for_business(&self, business_id: &BusinessId) -> Result<u32, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM locations WHERE business_id = $1")
                .bind(business_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count locations", e))?;

        Ok(result.0 as u32)
    }
}

fn row_to_location(row: PgRow) -> Result<LocationRecord, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let business_id: uuid::Uuid = get_column(&row, "business_id")?;
    let name: String = get_column(&row, "name")?;
    let slug: String = get_column(&row, "slug")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(LocationRecord {
        id: LocationId::from_uuid(id),
        business_id: BusinessId::from_uuid(business_id),
        name,
        slug,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_context(row: PgRow) -> Result<LocationContext, DomainError> {
    let location_name: String = get_column(&row, "location_name")?;

    let business = BusinessProfile {
        name: get_column(&row, "business_name")?,
        business_type: get_column(&row, "business_type")?,
        description: get_column(&row, "description")?,
        focus_topic_1: get_column(&row, "focus_topic_1")?,
        focus_topic_2: get_column(&row, "focus_topic_2")?,
        focus_topic_3: get_column(&row, "focus_topic_3")?,
    };

    Ok(LocationContext {
        location_name,
        business,
    })
}
