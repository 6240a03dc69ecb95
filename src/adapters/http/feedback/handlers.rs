//! HTTP handlers for the public feedback endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::feedback::{
    FeedbackError, FinalizeSessionCommand, FinalizeSessionHandler, StartSessionCommand,
    StartSessionHandler, SubmitTurnCommand, SubmitTurnHandler,
};
use crate::domain::foundation::SessionId;
use crate::ports::{
    FeedbackAssistant, LocationReader, MessageRepository, SessionRepository, SummaryRepository,
};

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, StartSessionRequest, StartSessionResponse,
    SummaryRequest, SummaryResponse,
};

/// Shared state for the feedback routes: one handler per endpoint.
pub struct FeedbackHandlers<L, S, M, U, A>
where
    L: LocationReader,
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    A: FeedbackAssistant,
{
    start: Arc<StartSessionHandler<L, S>>,
    turn: Arc<SubmitTurnHandler<S, M, U, L, A>>,
    finalize: Arc<FinalizeSessionHandler<S, M, U, A>>,
}

impl<L, S, M, U, A> Clone for FeedbackHandlers<L, S, M, U, A>
where
    L: LocationReader,
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    A: FeedbackAssistant,
{
    fn clone(&self) -> Self {
        Self {
            start: Arc::clone(&self.start),
            turn: Arc::clone(&self.turn),
            finalize: Arc::clone(&self.finalize),
        }
    }
}

impl<L, S, M, U, A> FeedbackHandlers<L, S, M, U, A>
where
    L: LocationReader,
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    A: FeedbackAssistant,
{
    pub fn new(
        start: Arc<StartSessionHandler<L, S>>,
        turn: Arc<SubmitTurnHandler<S, M, U, L, A>>,
        finalize: Arc<FinalizeSessionHandler<S, M, U, A>>,
    ) -> Self {
        Self {
            start,
            turn,
            finalize,
        }
    }
}

/// POST /api/feedback/session - start a session for a location slug
pub async fn start_session<L, S, M, U, A>(
    State(handlers): State<FeedbackHandlers<L, S, M, U, A>>,
    Json(req): Json<StartSessionRequest>,
) -> Response
where
    L: LocationReader + 'static,
    S: SessionRepository + 'static,
    M: MessageRepository + 'static,
    U: SummaryRepository + 'static,
    A: FeedbackAssistant + 'static,
{
    let cmd = StartSessionCommand {
        location_slug: req.slug,
        customer_name: req.customer_name,
    };

    match handlers.start.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(StartSessionResponse {
                session_id: result.session_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => feedback_error_response(e),
    }
}

/// POST /api/feedback/chat - submit one customer turn
pub async fn chat<L, S, M, U, A>(
    State(handlers): State<FeedbackHandlers<L, S, M, U, A>>,
    Json(req): Json<ChatRequest>,
) -> Response
where
    L: LocationReader + 'static,
    S: SessionRepository + 'static,
    M: MessageRepository + 'static,
    U: SummaryRepository + 'static,
    A: FeedbackAssistant + 'static,
{
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitTurnCommand {
        session_id,
        message: req.message,
        finalize_requested: req.finalize,
    };

    match handlers.turn.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from(result))).into_response(),
        Err(e) => feedback_error_response(e),
    }
}

/// POST /api/feedback/summary - finalize a session explicitly
pub async fn summarize<L, S, M, U, A>(
    State(handlers): State<FeedbackHandlers<L, S, M, U, A>>,
    Json(req): Json<SummaryRequest>,
) -> Response
where
    L: LocationReader + 'static,
    S: SessionRepository + 'static,
    M: MessageRepository + 'static,
    U: SummaryRepository + 'static,
    A: FeedbackAssistant + 'static,
{
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .finalize
        .handle(FinalizeSessionCommand { session_id })
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(SummaryResponse::from(summary))).into_response(),
        Err(e) => feedback_error_response(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid session ID")),
        )
            .into_response()
    })
}

/// Maps feedback errors to HTTP status codes.
pub(crate) fn feedback_error_response(error: FeedbackError) -> Response {
    let status = match &error {
        FeedbackError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        FeedbackError::LocationNotFound(_) | FeedbackError::SessionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        FeedbackError::SessionClosed => StatusCode::CONFLICT,
        FeedbackError::NoMessages => StatusCode::UNPROCESSABLE_ENTITY,
        FeedbackError::AssistantUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        FeedbackError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(%error, "feedback request failed");
    }

    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}
