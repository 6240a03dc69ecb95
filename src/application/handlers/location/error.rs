//! Error type for location management handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by location management.
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    /// The requesting user does not own the business.
    #[error("Forbidden")]
    Forbidden,

    /// The request is missing required input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The business's plan does not allow more locations.
    #[error("Location limit reached: plan allows {max}")]
    LimitReached { max: u32 },

    /// A persistence or collaborator operation failed.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl From<DomainError> for LocationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => LocationError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest => {
                LocationError::InvalidRequest(err.message)
            }
            _ => LocationError::Persistence(err.to_string()),
        }
    }
}
