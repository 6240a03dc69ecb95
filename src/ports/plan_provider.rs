//! Billing collaborator port.

use async_trait::async_trait;

use crate::domain::business::Plan;
use crate::domain::foundation::{BusinessId, DomainError};

/// Port to the external subscription platform: resolves the current plan
/// tier for a business. Consumed only to gate surrounding functionality
/// such as location count limits.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Returns the business's current plan tier.
    ///
    /// # Errors
    ///
    /// - `BusinessNotFound` if the business id is unknown
    async fn plan_for_business(&self, business_id: &BusinessId) -> Result<Plan, DomainError>;
}
