//! FinalizeSession command handler: the summarization pipeline.
//!
//! Loads the full transcript, asks the assistant for a digest, upserts
//! the single summary row, then closes the session. The status write
//! happens last: if it fails after the summary write, a valid summary
//! sits on a still-active session until a retry overwrites it, which is
//! an accepted transient state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{FeedbackSession, SessionSummary};
use crate::ports::{
    FeedbackAssistant, MessageRepository, SessionRepository, SummaryRepository, TranscriptEntry,
};

use super::{FeedbackError, SessionGuard};

/// Command to finalize a session explicitly.
#[derive(Debug, Clone)]
pub struct FinalizeSessionCommand {
    pub session_id: SessionId,
}

/// Handler for FinalizeSession commands.
pub struct FinalizeSessionHandler<S, M, U, A>
where
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    A: FeedbackAssistant,
{
    sessions: Arc<S>,
    messages: Arc<M>,
    summaries: Arc<U>,
    assistant: Arc<A>,
    guard: Arc<SessionGuard>,
}

impl<S, M, U, A> FinalizeSessionHandler<S, M, U, A>
where
    S: SessionRepository,
    M: MessageRepository,
    U: SummaryRepository,
    A: FeedbackAssistant,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(
        sessions: Arc<S>,
        messages: Arc<M>,
        summaries: Arc<U>,
        assistant: Arc<A>,
        guard: Arc<SessionGuard>,
    ) -> Self {
        Self {
            sessions,
            messages,
            summaries,
            assistant,
            guard,
        }
    }

    /// Handles an explicit finalize request.
    ///
    /// Finalizing an already-closed session is legal and idempotent: the
    /// summary is regenerated and the upsert overwrites the previous row.
    pub async fn handle(&self, cmd: FinalizeSessionCommand) -> Result<SessionSummary, FeedbackError> {
        let _lock = self.guard.acquire(cmd.session_id).await;

        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(FeedbackError::SessionNotFound(cmd.session_id))?;

        self.run(&mut session).await
    }

    /// Runs the pipeline for a session whose per-session lock the caller
    /// already holds. The turn handler calls this directly when the model
    /// signals completion.
    pub(crate) async fn run(
        &self,
        session: &mut FeedbackSession,
    ) -> Result<SessionSummary, FeedbackError> {
        let transcript = self.messages.list_for_session(session.id()).await?;
        if transcript.is_empty() {
            return Err(FeedbackError::NoMessages);
        }

        let entries = TranscriptEntry::from_transcript(&transcript);
        let digest = self.assistant.summarize(&entries).await?;

        let summary = SessionSummary::new(
            *session.id(),
            digest.summary,
            digest.sentiment,
            digest.score,
        );
        self.summaries.upsert(&summary).await?;

        // Status transition is the final step, after the summary write.
        if session.status().is_mutable() {
            session.close()?;
            self.sessions.update_status(session).await?;
        }

        tracing::info!(
            session_id = %session.id(),
            sentiment = %summary.sentiment,
            "session finalized"
        );

        Ok(summary)
    }
}
