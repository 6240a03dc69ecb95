//! Integration tests for the feedback flow.
//!
//! These tests wire the real handlers against in-memory port
//! implementations and drive the full customer journey: start a session,
//! chat, finalize, and read back the summary - including through the HTTP
//! layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use urvue::adapters::ai::MockAssistant;
use urvue::adapters::http::feedback::{feedback_routes, FeedbackHandlers};
use urvue::application::handlers::feedback::{
    FeedbackError, FinalizeSessionCommand, FinalizeSessionHandler, SessionGuard,
    StartSessionCommand, StartSessionHandler, SubmitTurnCommand, SubmitTurnHandler,
};
use urvue::domain::business::BusinessProfile;
use urvue::domain::foundation::{
    BusinessId, DomainError, ErrorCode, LocationId, Sentiment, SessionId, SessionStatus, Timestamp,
};
use urvue::domain::session::{FeedbackMessage, FeedbackSession, MessageRole, SessionSummary};
use urvue::ports::{
    AssistantTurn, LocationContext, LocationReader, LocationRecord, MessageRepository,
    SessionDigest, SessionRepository, SummaryRepository,
};

// =============================================================================
// Test infrastructure
// =============================================================================

struct InMemoryLocations {
    record: LocationRecord,
    context: LocationContext,
}

impl InMemoryLocations {
    fn new(slug: &str) -> Self {
        Self {
            record: LocationRecord {
                id: LocationId::new(),
                business_id: BusinessId::new(),
                name: "Downtown".to_string(),
                slug: slug.to_string(),
                created_at: Timestamp::now(),
            },
            context: LocationContext {
                location_name: "Downtown".to_string(),
                business: BusinessProfile::named("Corner Cafe"),
            },
        }
    }
}

#[async_trait]
impl LocationReader for InMemoryLocations {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LocationRecord>, DomainError> {
        Ok((self.record.slug == slug).then(|| self.record.clone()))
    }

    async fn context_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<LocationContext>, DomainError> {
        Ok((self.record.id == *location_id).then(|| self.context.clone()))
    }
}

#[derive(Default)]
struct InMemorySessions {
    sessions: Mutex<HashMap<SessionId, FeedbackSession>>,
}

impl InMemorySessions {
    fn status_of(&self, id: &SessionId) -> Option<SessionStatus> {
        self.sessions.lock().unwrap().get(id).map(|s| s.status())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create(&self, session: &FeedbackSession) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackSession>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
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

#[derive(Default)]
struct InMemoryMessages {
    messages: Mutex<Vec<FeedbackMessage>>,
}

impl InMemoryMessages {
    fn roles_for(&self, session_id: &SessionId) -> Vec<MessageRole> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id == *session_id)
            .map(|m| m.role)
            .collect()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessages {
    async fn append(&self, message: &FeedbackMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<FeedbackMessage>, DomainError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id == *session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemorySummaries {
    summaries: Mutex<HashMap<SessionId, SessionSummary>>,
}

impl InMemorySummaries {
    fn count(&self) -> usize {
        self.summaries.lock().unwrap().len()
    }

    fn get(&self, session_id: &SessionId) -> Option<SessionSummary> {
        self.summaries.lock().unwrap().get(session_id).cloned()
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaries {
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

struct Harness {
    sessions: Arc<InMemorySessions>,
    messages: Arc<InMemoryMessages>,
    summaries: Arc<InMemorySummaries>,
    start: Arc<StartSessionHandler<InMemoryLocations, InMemorySessions>>,
    turn: Arc<
        SubmitTurnHandler<
            InMemorySessions,
            InMemoryMessages,
            InMemorySummaries,
            InMemoryLocations,
            MockAssistant,
        >,
    >,
    finalize: Arc<
        FinalizeSessionHandler<InMemorySessions, InMemoryMessages, InMemorySummaries, MockAssistant>,
    >,
}

fn harness(assistant: MockAssistant) -> Harness {
    let locations = Arc::new(InMemoryLocations::new("corner-cafe"));
    let sessions = Arc::new(InMemorySessions::default());
    let messages = Arc::new(InMemoryMessages::default());
    let summaries = Arc::new(InMemorySummaries::default());
    let assistant = Arc::new(assistant);
    let guard = Arc::new(SessionGuard::new());

    let start = Arc::new(StartSessionHandler::new(
        Arc::clone(&locations),
        Arc::clone(&sessions),
    ));
    let finalize = Arc::new(FinalizeSessionHandler::new(
        Arc::clone(&sessions),
        Arc::clone(&messages),
        Arc::clone(&summaries),
        Arc::clone(&assistant),
        Arc::clone(&guard),
    ));
    let turn = Arc::new(SubmitTurnHandler::new(
        Arc::clone(&sessions),
        Arc::clone(&messages),
        locations,
        assistant,
        Arc::clone(&finalize),
        guard,
    ));

    Harness {
        sessions,
        messages,
        summaries,
        start,
        turn,
        finalize,
    }
}

// =============================================================================
// Handler-level flow
// =============================================================================

#[tokio::test]
async fn full_conversation_produces_exactly_one_summary() {
    let assistant = MockAssistant::new()
        .with_turn(AssistantTurn {
            reply: "What did you like most?".to_string(),
            should_finalize: false,
        })
        .with_turn(AssistantTurn {
            reply: "Thanks for the feedback!".to_string(),
            should_finalize: true,
        })
        .with_digest(SessionDigest {
            summary: "- loved the espresso\n- wants longer hours".to_string(),
            sentiment: Sentiment::Positive,
            score: Some(0.85),
        });
    let h = harness(assistant);

    let started = h
        .start
        .handle(StartSessionCommand {
            location_slug: "corner-cafe".to_string(),
            customer_name: Some("Dana".to_string()),
        })
        .await
        .unwrap();
    let session_id = started.session_id;

    let first = h
        .turn
        .handle(SubmitTurnCommand {
            session_id,
            message: Some("The espresso was excellent".to_string()),
            finalize_requested: false,
        })
        .await
        .unwrap();
    assert!(!first.finalized);

    let second = h
        .turn
        .handle(SubmitTurnCommand {
            session_id,
            message: Some("Wish you were open later. That's all!".to_string()),
            finalize_requested: false,
        })
        .await
        .unwrap();
    assert!(second.finalized);
    assert_eq!(
        second.summary.as_ref().unwrap().sentiment,
        Sentiment::Positive
    );

    // Transcript alternates customer/assistant and is complete.
    assert_eq!(
        h.messages.roles_for(&session_id),
        vec![
            MessageRole::Customer,
            MessageRole::Assistant,
            MessageRole::Customer,
            MessageRole::Assistant,
        ]
    );
    assert_eq!(h.summaries.count(), 1);
    assert_eq!(h.sessions.status_of(&session_id), Some(SessionStatus::Closed));

    // A turn on the closed session is rejected without widening the transcript.
    let rejected = h
        .turn
        .handle(SubmitTurnCommand {
            session_id,
            message: Some("One more thing".to_string()),
            finalize_requested: false,
        })
        .await;
    assert!(matches!(rejected, Err(FeedbackError::SessionClosed)));
    assert_eq!(h.messages.roles_for(&session_id).len(), 4);
}

#[tokio::test]
async fn refinalizing_overwrites_the_summary_in_place() {
    let assistant = MockAssistant::new()
        .with_turn(AssistantTurn {
            reply: "Noted!".to_string(),
            should_finalize: true,
        })
        .with_digest(SessionDigest {
            summary: "first".to_string(),
            sentiment: Sentiment::Neutral,
            score: None,
        })
        .with_digest(SessionDigest {
            summary: "second".to_string(),
            sentiment: Sentiment::Negative,
            score: Some(0.6),
        });
    let h = harness(assistant);

    let started = h
        .start
        .handle(StartSessionCommand {
            location_slug: "corner-cafe".to_string(),
            customer_name: None,
        })
        .await
        .unwrap();
    let session_id = started.session_id;

    h.turn
        .handle(SubmitTurnCommand {
            session_id,
            message: Some("The line was too long".to_string()),
            finalize_requested: false,
        })
        .await
        .unwrap();

    // Explicit re-finalize on the closed session.
    let summary = h
        .finalize
        .handle(FinalizeSessionCommand { session_id })
        .await
        .unwrap();

    assert_eq!(summary.summary, "second");
    assert_eq!(h.summaries.count(), 1);
    assert_eq!(h.summaries.get(&session_id).unwrap().sentiment, Sentiment::Negative);
}

#[tokio::test]
async fn concurrent_turns_on_one_session_do_not_interleave() {
    let assistant = MockAssistant::new();
    let h = harness(assistant);

    let started = h
        .start
        .handle(StartSessionCommand {
            location_slug: "corner-cafe".to_string(),
            customer_name: None,
        })
        .await
        .unwrap();
    let session_id = started.session_id;

    let mut tasks = Vec::new();
    for i in 0..4 {
        let turn = Arc::clone(&h.turn);
        tasks.push(tokio::spawn(async move {
            turn.handle(SubmitTurnCommand {
                session_id,
                message: Some(format!("message {}", i)),
                finalize_requested: false,
            })
            .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // Each turn's customer/assistant pair stays adjacent.
    let roles = h.messages.roles_for(&session_id);
    assert_eq!(roles.len(), 8);
    for pair in roles.chunks(2) {
        assert_eq!(pair, [MessageRole::Customer, MessageRole::Assistant]);
    }
}

// =============================================================================
// HTTP layer
// =============================================================================

mod http_api {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(assistant: MockAssistant) -> (axum::Router, Harness) {
        let h = harness(assistant);
        let handlers = FeedbackHandlers::new(
            Arc::clone(&h.start),
            Arc::clone(&h.turn),
            Arc::clone(&h.finalize),
        );
        (feedback_routes(handlers), h)
    }

    async fn post_json(router: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn start_chat_summary_roundtrip() {
        let assistant = MockAssistant::new()
            .with_turn(AssistantTurn {
                reply: "Glad to hear it! Anything to improve?".to_string(),
                should_finalize: false,
            })
            .with_digest(SessionDigest {
                summary: "- happy customer".to_string(),
                sentiment: Sentiment::Positive,
                score: Some(0.9),
            });
        let (router, _h) = app(assistant);

        let (status, body) = post_json(
            &router,
            "/session",
            json!({"slug": "corner-cafe", "customerName": "Dana"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, body) = post_json(
            &router,
            "/chat",
            json!({"sessionId": session_id, "message": "Great coffee"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Glad to hear it! Anything to improve?");
        assert_eq!(body["finalized"], false);

        let (status, body) =
            post_json(&router, "/summary", json!({"sessionId": session_id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "POSITIVE");
        assert_eq!(body["score"], 0.9);
    }

    #[tokio::test]
    async fn finalize_only_chat_turn_returns_closeout_reply() {
        let assistant = MockAssistant::new()
            .with_turn(AssistantTurn {
                reply: "What stood out?".to_string(),
                should_finalize: false,
            })
            .with_turn(AssistantTurn {
                reply: "Thanks, your feedback is on its way to the team!".to_string(),
                should_finalize: false,
            })
            .with_digest(SessionDigest {
                summary: "- friendly staff".to_string(),
                sentiment: Sentiment::Positive,
                score: Some(0.8),
            });
        let (router, h) = app(assistant);

        let (_, body) =
            post_json(&router, "/session", json!({"slug": "corner-cafe"})).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, _) = post_json(
            &router,
            "/chat",
            json!({"sessionId": session_id, "message": "Staff was lovely"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // The "I'm done" button sends finalize with no message.
        let (status, body) = post_json(
            &router,
            "/chat",
            json!({"sessionId": session_id, "finalize": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["reply"],
            "Thanks, your feedback is on its way to the team!"
        );
        assert_eq!(body["finalized"], true);
        assert_eq!(body["summary"]["sentiment"], "POSITIVE");

        // No empty customer message lands in the transcript.
        let id: SessionId = session_id.parse().unwrap();
        assert_eq!(
            h.messages.roles_for(&id),
            vec![
                MessageRole::Customer,
                MessageRole::Assistant,
                MessageRole::Assistant,
            ]
        );
        assert_eq!(h.sessions.status_of(&id), Some(SessionStatus::Closed));
    }

    #[tokio::test]
    async fn chat_with_neither_message_nor_finalize_returns_400() {
        let (router, _h) = app(MockAssistant::new());

        let (_, body) =
            post_json(&router, "/session", json!({"slug": "corner-cafe"})).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, _) =
            post_json(&router, "/chat", json!({"sessionId": session_id})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_slug_returns_404() {
        let (router, _h) = app(MockAssistant::new());

        let (status, body) =
            post_json(&router, "/session", json!({"slug": "no-such-place"})).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn chat_on_closed_session_returns_409() {
        let assistant = MockAssistant::new()
            .with_turn(AssistantTurn {
                reply: "Bye!".to_string(),
                should_finalize: true,
            })
            .with_digest(SessionDigest {
                summary: "done".to_string(),
                sentiment: Sentiment::Neutral,
                score: None,
            });
        let (router, _h) = app(assistant);

        let (_, body) =
            post_json(&router, "/session", json!({"slug": "corner-cafe"})).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, _) = post_json(
            &router,
            "/chat",
            json!({"sessionId": session_id, "message": "All done", "finalize": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json(
            &router,
            "/chat",
            json!({"sessionId": session_id, "message": "wait"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn summary_without_messages_returns_422() {
        let (router, _h) = app(MockAssistant::new());

        let (_, body) =
            post_json(&router, "/session", json!({"slug": "corner-cafe"})).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, _) =
            post_json(&router, "/summary", json!({"sessionId": session_id})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_session_id_returns_400() {
        let (router, _h) = app(MockAssistant::new());

        let (status, _) = post_json(
            &router,
            "/chat",
            json!({"sessionId": "not-a-uuid", "message": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
