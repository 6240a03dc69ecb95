//! Mock feedback assistant for testing.
//!
//! Configurable implementation of the FeedbackAssistant port, allowing
//! handler and integration tests to run without calling a real model.
//!
//! # Features
//!
//! - Pre-configured turns and digests (consumed in order)
//! - Error injection for resilience testing
//! - Call tracking for verification

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::Sentiment;
use crate::ports::{
    AssistantError, AssistantTurn, FeedbackAssistant, SessionDigest, TranscriptEntry,
    FALLBACK_REPLY, FALLBACK_SUMMARY,
};

/// A recorded assistant call, kept for test verification.
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Converse {
        instructions: Vec<String>,
        transcript: Vec<TranscriptEntry>,
    },
    Summarize {
        transcript: Vec<TranscriptEntry>,
    },
}

/// Mock assistant with queued responses.
///
/// When a queue is exhausted the mock answers with the documented
/// fallback values, mirroring what the real adapter does for output it
/// cannot parse.
#[derive(Debug, Clone, Default)]
pub struct MockAssistant {
    turns: Arc<Mutex<VecDeque<AssistantTurn>>>,
    digests: Arc<Mutex<VecDeque<SessionDigest>>>,
    failure: Arc<Mutex<Option<AssistantError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAssistant {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a conversational turn.
    pub fn with_turn(self, turn: AssistantTurn) -> Self {
        self.turns.lock().unwrap().push_back(turn);
        self
    }

    /// Queues a summarization digest.
    pub fn with_digest(self, digest: SessionDigest) -> Self {
        self.digests.lock().unwrap().push_back(digest);
        self
    }

    /// Makes every subsequent call fail with the given error.
    pub fn with_failure(self, error: AssistantError) -> Self {
        *self.failure.lock().unwrap() = Some(error);
        self
    }

    /// Returns the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), AssistantError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FeedbackAssistant for MockAssistant {
    async fn converse(
        &self,
        instructions: &[String],
        transcript: &[TranscriptEntry],
    ) -> Result<AssistantTurn, AssistantError> {
        self.calls.lock().unwrap().push(RecordedCall::Converse {
            instructions: instructions.to_vec(),
            transcript: transcript.to_vec(),
        });
        self.check_failure()?;

        Ok(self
            .turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| AssistantTurn {
                reply: FALLBACK_REPLY.to_string(),
                should_finalize: false,
            }))
    }

    async fn summarize(
        &self,
        transcript: &[TranscriptEntry],
    ) -> Result<SessionDigest, AssistantError> {
        self.calls.lock().unwrap().push(RecordedCall::Summarize {
            transcript: transcript.to_vec(),
        });
        self.check_failure()?;

        Ok(self
            .digests
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| SessionDigest {
                summary: FALLBACK_SUMMARY.to_string(),
                sentiment: Sentiment::Neutral,
                score: None,
            }))
    }
}
