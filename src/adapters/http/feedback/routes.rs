//! HTTP routes for the public feedback endpoints.

use axum::{routing::post, Router};

use crate::ports::{
    FeedbackAssistant, LocationReader, MessageRepository, SessionRepository, SummaryRepository,
};

use super::handlers::{chat, start_session, summarize, FeedbackHandlers};

/// Creates the feedback router. Mounted under `/api/feedback`.
pub fn feedback_routes<L, S, M, U, A>(handlers: FeedbackHandlers<L, S, M, U, A>) -> Router
where
    L: LocationReader + 'static,
    S: SessionRepository + 'static,
    M: MessageRepository + 'static,
    U: SummaryRepository + 'static,
    A: FeedbackAssistant + 'static,
{
    Router::new()
        .route("/session", post(start_session::<L, S, M, U, A>))
        .route("/chat", post(chat::<L, S, M, U, A>))
        .route("/summary", post(summarize::<L, S, M, U, A>))
        .with_state(handlers)
}
