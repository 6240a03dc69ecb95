//! PostgreSQL implementation of PlanProvider.
//!
//! The current plan tier is stored on the business row; the billing
//! platform's webhook keeps that column up to date, so reads here never
//! call out to the billing API.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::business::Plan;
use crate::domain::foundation::{BusinessId, DomainError, ErrorCode};
use crate::ports::PlanProvider;

use super::db_error;

/// PostgreSQL implementation of PlanProvider.
#[derive(Clone)]
pub struct PostgresPlanProvider {
    pool: PgPool,
}

impl PostgresPlanProvider {
    /// Creates a new PostgresPlanProvider.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanProvider for PostgresPlanProvider {
    async fn plan_for_business(&self, business_id: &BusinessId) -> Result<Plan, DomainError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT plan FROM businesses WHERE id = $1")
            .bind(business_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch plan", e))?;

        match row {
            Some((plan,)) => str_to_plan(&plan),
            None => Err(DomainError::new(
                ErrorCode::BusinessNotFound,
                format!("Business not found: {}", business_id),
            )),
        }
    }
}

fn str_to_plan(s: &str) -> Result<Plan, DomainError> {
    match s {
        "STARTER" => Ok(Plan::Starter),
        "PRO" => Ok(Plan::Pro),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan: {}", s),
        )),
    }
}
