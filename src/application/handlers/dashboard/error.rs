//! Error type shared by the dashboard query handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by the dashboard queries.
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// The requesting user does not own the data being read.
    #[error("Forbidden")]
    Forbidden,

    /// The session id is unknown (or not visible to the user).
    #[error("Session not found")]
    SessionNotFound,

    /// A persistence operation failed.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl From<DomainError> for DashboardError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => DashboardError::Forbidden,
            ErrorCode::SessionNotFound => DashboardError::SessionNotFound,
            _ => DashboardError::Persistence(err.to_string()),
        }
    }
}
