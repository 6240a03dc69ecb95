//! HTTP DTOs for the public feedback endpoints.
//!
//! These types decouple the widget-facing API from domain types. The wire
//! format is camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::application::handlers::feedback::SubmitTurnResult;
use crate::domain::session::SessionSummary;

/// Request to start a feedback session from a scanned QR link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Missing slug deserializes as empty and is rejected by the handler
    /// with a 400, not by serde.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Response carrying the new session id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// Request for one chat turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    /// Optional on a finalize-only turn; a turn with neither a message
    /// nor the finalize flag is rejected by the handler with a 400.
    #[serde(default)]
    pub message: Option<String>,
    /// Client-side "I'm done" signal.
    #[serde(default)]
    pub finalize: bool,
}

/// Response for one chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub finalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
}

impl From<SubmitTurnResult> for ChatResponse {
    fn from(result: SubmitTurnResult) -> Self {
        Self {
            reply: result.reply,
            finalized: result.finalized,
            summary: result.summary.map(SummaryResponse::from),
        }
    }
}

/// Request to finalize a session explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub session_id: String,
}

/// A session digest on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub sentiment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<SessionSummary> for SummaryResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            summary: summary.summary,
            sentiment: summary.sentiment.as_str().to_string(),
            score: summary.score,
        }
    }
}

/// Error body shared by all feedback endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
