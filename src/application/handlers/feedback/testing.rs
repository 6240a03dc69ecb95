//! In-memory port implementations shared by the feedback handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::{
    BusinessId, DomainError, ErrorCode, LocationId, SessionId, Timestamp,
};
use crate::domain::session::{FeedbackMessage, FeedbackSession, SessionSummary};
use crate::ports::{
    LocationContext, LocationReader, LocationRecord, MessageRepository, SessionRepository,
    SummaryRepository,
};

/// In-memory location reader with a fixed set of locations.
pub struct MockLocations {
    locations: Vec<(LocationRecord, LocationContext)>,
}

impl MockLocations {
    pub fn empty() -> Self {
        Self {
            locations: Vec::new(),
        }
    }

    /// Creates a reader with one location under a default business profile.
    pub fn with_location(slug: &str, name: &str) -> Self {
        let record = LocationRecord {
            id: LocationId::new(),
            business_id: BusinessId::new(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Timestamp::now(),
        };
        let context = LocationContext {
            location_name: name.to_string(),
            business: BusinessProfile::named("Corner Cafe"),
        };
        Self {
            locations: vec![(record, context)],
        }
    }

    /// Returns the id of the location registered under `slug`.
    ///
    /// # Panics
    ///
    /// Panics if no such location was registered.
    pub fn location_id(&self, slug: &str) -> LocationId {
        self.locations
            .iter()
            .find(|(record, _)| record.slug == slug)
            .map(|(record, _)| record.id)
            .unwrap()
    }
}

#[async_trait]
impl LocationReader for MockLocations {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LocationRecord>, DomainError> {
        Ok(self
            .locations
            .iter()
            .find(|(record, _)| record.slug == slug)
            .map(|(record, _)| record.clone()))
    }

    async fn context_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<LocationContext>, DomainError> {
        Ok(self
            .locations
            .iter()
            .find(|(record, _)| record.id == *location_id)
            .map(|(_, context)| context.clone()))
    }
}

/// In-memory session store.
#[derive(Default)]
pub struct MockSessions {
    sessions: Mutex<HashMap<SessionId, FeedbackSession>>,
}

impl MockSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: FeedbackSession) {
        self.sessions.lock().unwrap().insert(*session.id(), session);
    }

    pub fn get(&self, id: &SessionId) -> Option<FeedbackSession> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    /// Force-closes a stored session, bypassing the handlers.
    pub fn close(&self, id: &SessionId) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(id) {
            session.close().unwrap();
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessions {
    async fn create(&self, session: &FeedbackSession) -> Result<(), DomainError> {
        self.insert(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackSession>, DomainError> {
        Ok(self.get(id))
    }

    async fn update_status(&self, session: &FeedbackSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }
}

/// In-memory transcript store, insertion-ordered per session.
#[derive(Default)]
pub struct MockMessages {
    messages: Mutex<HashMap<SessionId, Vec<FeedbackMessage>>>,
}

impl MockMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one customer message directly, bypassing the handlers.
    pub fn seed_customer(&self, session_id: SessionId, content: &str) {
        self.messages
            .lock()
            .unwrap()
            .entry(session_id)
            .or_default()
            .push(FeedbackMessage::customer(session_id, content));
    }

    pub fn list(&self, session_id: &SessionId) -> Vec<FeedbackMessage> {
        self.messages
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageRepository for MockMessages {
    async fn append(&self, message: &FeedbackMessage) -> Result<(), DomainError> {
        self.messages
            .lock()
            .unwrap()
            .entry(message.session_id)
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<FeedbackMessage>, DomainError> {
        Ok(self.list(session_id))
    }
}

/// In-memory summary store keyed by session id.
#[derive(Default)]
pub struct MockSummaries {
    summaries: Mutex<HashMap<SessionId, SessionSummary>>,
}

impl MockSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &SessionId) -> Option<SessionSummary> {
        self.summaries.lock().unwrap().get(session_id).cloned()
    }

    /// Number of stored summaries for a session (0 or 1 by construction).
    pub fn count_for(&self, session_id: &SessionId) -> usize {
        usize::from(self.summaries.lock().unwrap().contains_key(session_id))
    }
}

#[async_trait]
impl SummaryRepository for MockSummaries {
    async fn upsert(&self, summary: &SessionSummary) -> Result<(), DomainError> {
        self.summaries
            .lock()
            .unwrap()
            .insert(summary.session_id, summary.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError> {
        Ok(self.get(session_id))
    }
}
