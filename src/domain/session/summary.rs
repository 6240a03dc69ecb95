//! Session summary value object.

use crate::domain::foundation::{Sentiment, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

/// The single digest of a finalized session.
///
/// # Invariants
///
/// - At most one summary exists per session (upsert keyed by session id)
/// - `score`, when present, is clamped to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session this summary belongs to. Unique: one summary per session.
    pub session_id: SessionId,
    /// Free-text summary of the conversation.
    pub summary: String,
    /// Normalized sentiment classification.
    pub sentiment: Sentiment,
    /// Optional confidence score in [0, 1].
    pub score: Option<f64>,
    /// When the summary was produced.
    pub created_at: Timestamp,
}

impl SessionSummary {
    /// Creates a summary, clamping the score into [0, 1].
    ///
    /// Non-finite scores are treated as absent.
    pub fn new(
        session_id: SessionId,
        summary: impl Into<String>,
        sentiment: Sentiment,
        score: Option<f64>,
    ) -> Self {
        Self {
            session_id,
            summary: summary.into(),
            sentiment,
            score: score.and_then(clamp_score),
            created_at: Timestamp::now(),
        }
    }
}

/// Clamps a raw confidence score into [0, 1]; `None` for NaN/infinite input.
pub fn clamp_score(raw: f64) -> Option<f64> {
    if raw.is_finite() {
        Some(raw.clamp(0.0, 1.0))
    } else {
        None
    }
}
