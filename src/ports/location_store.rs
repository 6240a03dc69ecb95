//! Location ports: slug resolution, prompt context, and location writes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::{BusinessId, DomainError, LocationId, Timestamp};

/// A business location as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub business_id: BusinessId,
    pub name: String,
    /// URL-safe slug embedded in the QR feedback link. Unique.
    pub slug: String,
    pub created_at: Timestamp,
}

/// Everything the turn handler needs to build prompts for a session's
/// location: the location name plus its business profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationContext {
    pub location_name: String,
    pub business: BusinessProfile,
}

/// Read-side port for locations.
#[async_trait]
pub trait LocationReader: Send + Sync {
    /// Resolve a feedback-link slug to its location.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LocationRecord>, DomainError>;

    /// Fetch the prompt context for a location. Returns `None` if the
    /// location (or its business) no longer exists.
    async fn context_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<LocationContext>, DomainError>;
}

/// Write-side port for locations, consumed by location management.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Persist a new location.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (including slug conflicts
    ///   lost to a concurrent insert)
    async fn create(&self, location: &LocationRecord) -> Result<(), DomainError>;

    /// Check whether a slug is already taken.
    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    /// Count locations belonging to a business (for plan limits).
    async fn count_for_business(&self, business_id: &BusinessId) -> Result<u32, DomainError>;
}
