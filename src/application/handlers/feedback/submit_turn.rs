//! SubmitTurn command handler: one customer chat turn.
//!
//! Writes are persist-first: the customer message lands in the transcript
//! before the assistant is called, so an assistant outage never loses what
//! the customer typed and the turn is safe to resubmit.

use std::sync::Arc;

use crate::domain::conversation::prompt;
use crate::domain::foundation::SessionId;
use crate::domain::session::{FeedbackMessage, SessionSummary};
use crate::ports::{
    FeedbackAssistant, LocationReader, MessageRepository, SessionRepository, SummaryRepository,
    TranscriptEntry,
};

use super::{FeedbackError, FinalizeSessionHandler, SessionGuard};

/// Command for one customer turn.
///
/// A turn carries a customer message, a finalize request, or both. A
/// finalize-only turn ("I'm done" without typing anything) still runs an
/// assistant turn so the customer gets a close-out reply.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub session_id: SessionId,
    /// The customer's message text, absent on a finalize-only turn.
    pub message: Option<String>,
    /// Client-requested finalize ("I'm done" button).
    pub finalize_requested: bool,
}

/// Result of a turn: the assistant's reply, whether the session was
/// finalized this turn, and the summary when it was.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    pub reply: String,
    pub finalized: bool,
    pub summary: Option<SessionSummary>,
}

/// Handler for SubmitTurn commands.
pub struct SubmitTurnHandler<S, M, U, L, A>
where
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    L: LocationReader,
    A: FeedbackAssistant,
{
    sessions: Arc<S>,
    messages: Arc<M>,
    locations: Arc<L>,
    assistant: Arc<A>,
    finalize: Arc<FinalizeSessionHandler<S, M, U, A>>,
    guard: Arc<SessionGuard>,
}

impl<S, M, U, L, A> SubmitTurnHandler<S, M, U, L, A>
where
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    L: LocationReader,
    A: FeedbackAssistant,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(
        sessions: Arc<S>,
        messages: Arc<M>,
        locations: Arc<L>,
        assistant: Arc<A>,
        finalize: Arc<FinalizeSessionHandler<S, M, U, A>>,
        guard: Arc<SessionGuard>,
    ) -> Self {
        Self {
            sessions,
            messages,
            locations,
            assistant,
            finalize,
            guard,
        }
    }

    /// Handles one customer turn.
    ///
    /// The session's lock is held for the whole turn, including the
    /// finalize pipeline when the turn triggers it, so concurrent turns on
    /// the same session cannot interleave transcript writes.
    pub async fn handle(&self, cmd: SubmitTurnCommand) -> Result<SubmitTurnResult, FeedbackError> {
        let message = cmd.message.as_deref().map(str::trim).unwrap_or_default();
        if message.is_empty() && !cmd.finalize_requested {
            return Err(FeedbackError::InvalidRequest(
                "Message or finalize signal required".to_string(),
            ));
        }

        let _lock = self.guard.acquire(cmd.session_id).await;

        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(FeedbackError::SessionNotFound(cmd.session_id))?;
        session.ensure_open()?;

        // Finalize-only turns carry no customer message to persist.
        if !message.is_empty() {
            let customer_message = FeedbackMessage::customer(*session.id(), message);
            self.messages.append(&customer_message).await?;
        }

        let transcript = self.messages.list_for_session(session.id()).await?;
        let entries = TranscriptEntry::from_transcript(&transcript);

        let context = self
            .locations
            .context_for_location(session.location_id())
            .await?
            .ok_or_else(|| {
                FeedbackError::LocationNotFound(session.location_id().to_string())
            })?;

        let instructions =
            prompt::conversation_instructions(&context.business, &context.location_name);
        let turn = self.assistant.converse(&instructions, &entries).await?;

        let assistant_message = FeedbackMessage::assistant(*session.id(), &turn.reply);
        self.messages.append(&assistant_message).await?;

        let finalized = turn.should_finalize || cmd.finalize_requested;
        let summary = if finalized {
            Some(self.finalize.run(&mut session).await?)
        } else {
            None
        };

        tracing::debug!(
            session_id = %session.id(),
            finalized,
            "feedback turn completed"
        );

        Ok(SubmitTurnResult {
            reply: turn.reply,
            finalized,
            summary,
        })
    }
}
