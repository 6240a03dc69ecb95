//! FeedbackSession aggregate entity.
//!
//! A session is one customer's feedback conversation at one location.
//! It is created when the customer opens a location's feedback link and
//! closed exactly once by the summarization pipeline.

use crate::domain::foundation::{
    DomainError, ErrorCode, LocationId, SessionId, SessionStatus, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Maximum length for the optional customer display name.
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 120;

/// Feedback session aggregate.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `status` only moves `Active -> Closed`, never back
/// - Closed sessions reject all transcript mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// Location the customer is giving feedback about.
    location_id: LocationId,

    /// Optional display name the customer entered.
    customer_name: Option<String>,

    /// Current status (Active or Closed).
    status: SessionStatus,

    /// When the session was created.
    created_at: Timestamp,
}

impl FeedbackSession {
    /// Create a new active session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the customer name is too long
    pub fn new(
        id: SessionId,
        location_id: LocationId,
        customer_name: Option<String>,
    ) -> Result<Self, DomainError> {
        let customer_name = normalize_customer_name(customer_name)?;
        Ok(Self {
            id,
            location_id,
            customer_name,
            status: SessionStatus::Active,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        location_id: LocationId,
        customer_name: Option<String>,
        status: SessionStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            location_id,
            customer_name,
            status,
            created_at,
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the location this session belongs to.
    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Returns the customer display name, if given.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Validates that the transcript can still be mutated.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session has been finalized
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionClosed,
                "Session is closed",
            ))
        }
    }

    /// Close the session. Called only by the summarization pipeline after
    /// the summary write succeeds.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already closed
    pub fn close(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&SessionStatus::Closed) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Session is already closed",
            ));
        }

        self.status = SessionStatus::Closed;
        Ok(())
    }
}

fn normalize_customer_name(name: Option<String>) -> Result<Option<String>, DomainError> {
    match name {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.len() > MAX_CUSTOMER_NAME_LENGTH {
                return Err(DomainError::validation(
                    "customer_name",
                    format!(
                        "Customer name must be {} characters or less",
                        MAX_CUSTOMER_NAME_LENGTH
                    ),
                ));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}
