//! CreateLocation command handler.
//!
//! Dashboard-side: a business owner registers a new location, which gets a
//! unique feedback-link slug derived from its name. Plan tier caps how
//! many locations a business may have.

use std::sync::Arc;

use crate::domain::business::{slug_candidates, slugify};
use crate::domain::foundation::{BusinessId, LocationId, Timestamp, UserId};
use crate::ports::{AccessChecker, LocationRecord, LocationRepository, PlanProvider};

use super::LocationError;

/// Fallback slug base when a name yields no usable characters.
const SLUG_FALLBACK: &str = "location";

/// Slug probes before giving up; only reachable under pathological data.
const MAX_SLUG_ATTEMPTS: usize = 50;

/// Command to create a location.
#[derive(Debug, Clone)]
pub struct CreateLocationCommand {
    pub user_id: UserId,
    pub business_id: BusinessId,
    pub name: String,
}

/// Handler for CreateLocation commands.
pub struct CreateLocationHandler<C, P, R>
where
    C: AccessChecker,
    P: PlanProvider,
    R: LocationRepository,
{
    access: Arc<C>,
    plans: Arc<P>,
    locations: Arc<R>,
}

impl<C, P, R> CreateLocationHandler<C, P, R>
where
    C: AccessChecker,
    P: PlanProvider,
    R: LocationRepository,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(access: Arc<C>, plans: Arc<P>, locations: Arc<R>) -> Self {
        Self {
            access,
            plans,
            locations,
        }
    }

    /// Handles a create location command.
    pub async fn handle(
        &self,
        cmd: CreateLocationCommand,
    ) -> Result<LocationRecord, LocationError> {
        self.access
            .check_business_access(&cmd.user_id, &cmd.business_id)
            .await?;

        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(LocationError::InvalidRequest(
                "Location name must not be empty".to_string(),
            ));
        }

        let plan = self.plans.plan_for_business(&cmd.business_id).await?;
        let count = self.locations.count_for_business(&cmd.business_id).await?;
        if count >= plan.max_locations() {
            return Err(LocationError::LimitReached {
                max: plan.max_locations(),
            });
        }

        let base = slugify(name, SLUG_FALLBACK);
        let slug = self.free_slug(&base).await?;

        let location = LocationRecord {
            id: LocationId::new(),
            business_id: cmd.business_id,
            name: name.to_string(),
            slug,
            created_at: Timestamp::now(),
        };
        self.locations.create(&location).await?;

        tracing::info!(
            location_id = %location.id,
            business_id = %location.business_id,
            slug = %location.slug,
            "location created"
        );

        Ok(location)
    }

    /// Probes slug candidates until one is free.
    async fn free_slug(&self, base: &str) -> Result<String, LocationError> {
        for candidate in slug_candidates(base).take(MAX_SLUG_ATTEMPTS) {
            if !self.locations.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(LocationError::Persistence(format!(
            "No free slug found for base '{}'",
            base
        )))
    }
}
