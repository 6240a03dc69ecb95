//! StartSession command handler.
//!
//! Resolves a location slug (from a scanned QR code) and opens a new
//! active feedback session for that location.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::FeedbackSession;
use crate::ports::{LocationReader, SessionRepository};

use super::FeedbackError;

/// Command to start a feedback session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    /// Slug from the location's feedback link.
    pub location_slug: String,
    /// Optional display name the customer entered.
    pub customer_name: Option<String>,
}

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
}

/// Handler for StartSession commands.
pub struct StartSessionHandler<L, S>
where
    L: LocationReader,
    S: SessionRepository,
{
    locations: Arc<L>,
    sessions: Arc<S>,
}

impl<L, S> StartSessionHandler<L, S>
where
    L: LocationReader,
    S: SessionRepository,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(locations: Arc<L>, sessions: Arc<S>) -> Self {
        Self {
            locations,
            sessions,
        }
    }

    /// Handles a start session command.
    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, FeedbackError> {
        let slug = cmd.location_slug.trim();
        if slug.is_empty() {
            return Err(FeedbackError::InvalidRequest(
                "Missing location slug".to_string(),
            ));
        }

        let location = self
            .locations
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| FeedbackError::LocationNotFound(slug.to_string()))?;

        let session = FeedbackSession::new(SessionId::new(), location.id, cmd.customer_name)
            .map_err(FeedbackError::from)?;
        self.sessions.create(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            location = %location.slug,
            "feedback session started"
        );

        Ok(StartSessionResult {
            session_id: *session.id(),
        })
    }
}
