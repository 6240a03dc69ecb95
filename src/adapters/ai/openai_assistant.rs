//! OpenAI-backed feedback assistant.
//!
//! Implements the FeedbackAssistant port against the chat completions API
//! with `response_format: json_object`, so the model is contractually
//! asked for JSON. What comes back is still coerced defensively: any
//! malformed or partial output degrades to the documented fallback values
//! instead of failing the request. Only transport-level errors escape.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIAssistantConfig::new(api_key)
//!     .with_chat_model("gpt-4o-mini")
//!     .with_summary_model("gpt-4o-mini");
//!
//! let assistant = OpenAIAssistant::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::domain::conversation::prompt;
use crate::domain::foundation::Sentiment;
use crate::domain::session::clamp_score;
use crate::ports::{
    AssistantError, AssistantTurn, FeedbackAssistant, SessionDigest, TranscriptEntry,
    FALLBACK_REPLY, FALLBACK_SUMMARY,
};

/// Most bullet entries kept when the model returns the summary as a list.
const MAX_SUMMARY_BULLETS: usize = 8;

/// Configuration for the OpenAI assistant.
#[derive(Debug, Clone)]
pub struct OpenAIAssistantConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model used for conversation turns.
    pub chat_model: String,
    /// Model used for transcript summarization.
    pub summary_model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAIAssistantConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            chat_model: "gpt-4o-mini".to_string(),
            summary_model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    /// Sets the conversation model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Sets the summarization model.
    pub fn with_summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completions implementation of the assistant port.
pub struct OpenAIAssistant {
    config: OpenAIAssistantConfig,
    client: Client,
}

impl OpenAIAssistant {
    /// Creates a new assistant with the given configuration.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be constructed
    pub fn new(config: OpenAIAssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Sends one completion request and returns the first choice's content.
    /// Transient failures are retried with exponential backoff.
    async fn complete(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let mut last_error = AssistantError::network("No attempts made");
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                sleep(Duration::from_secs(1 << (attempt - 1))).await;
            }

            match self.send_request(&request).await {
                Ok(content) => return Ok(content),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    tracing::warn!(attempt, error = %err, "assistant request failed, retrying");
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AssistantError::network(format!("Connection failed: {}", e))
                } else {
                    AssistantError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::network(format!("Failed to read response: {}", e)))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default())
    }

    /// Maps non-success statuses to assistant errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AssistantError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AssistantError::AuthenticationFailed),
            429 => Err(AssistantError::RateLimited {
                retry_after_secs: parse_retry_after(&error_body),
            }),
            500..=599 => Err(AssistantError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AssistantError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    fn transcript_messages(transcript: &[TranscriptEntry]) -> impl Iterator<Item = ChatMessage> + '_ {
        transcript.iter().map(|entry| ChatMessage {
            role: entry.role.as_str().to_string(),
            content: entry.content.clone(),
        })
    }
}

#[async_trait]
impl FeedbackAssistant for OpenAIAssistant {
    async fn converse(
        &self,
        instructions: &[String],
        transcript: &[TranscriptEntry],
    ) -> Result<AssistantTurn, AssistantError> {
        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: instructions.join("\n\n"),
        }];
        messages.extend(Self::transcript_messages(transcript));

        let content = self.complete(&self.config.chat_model, messages).await?;
        Ok(coerce_turn(&content))
    }

    async fn summarize(
        &self,
        transcript: &[TranscriptEntry],
    ) -> Result<SessionDigest, AssistantError> {
        let serialized = transcript
            .iter()
            .map(|entry| format!("{}: {}", entry.role.as_str(), entry.content))
            .collect::<Vec<_>>()
            .join("\n");

        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: prompt::summary_instruction(&serialized),
        }];

        let content = self.complete(&self.config.summary_model, messages).await?;
        Ok(coerce_digest(&content))
    }
}

/// Raw turn output as the model is asked to shape it. Every field is
/// optional so partial output still deserializes.
#[derive(Debug, Deserialize)]
struct RawTurn {
    reply: Option<String>,
    finalize: Option<bool>,
}

/// Coerces raw chat output into a turn.
///
/// - unparseable JSON: fallback reply, no finalize
/// - missing or blank `reply`: fallback reply
/// - missing `finalize`: false
fn coerce_turn(content: &str) -> AssistantTurn {
    let raw: RawTurn = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(_) => {
            tracing::warn!("assistant chat output was not valid JSON, using fallback reply");
            return AssistantTurn {
                reply: FALLBACK_REPLY.to_string(),
                should_finalize: false,
            };
        }
    };

    let reply = match raw.reply {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => FALLBACK_REPLY.to_string(),
    };

    AssistantTurn {
        reply,
        should_finalize: raw.finalize.unwrap_or(false),
    }
}

/// Raw digest output. `summary` may arrive as a string or an array of
/// bullet strings; `score` as a number or numeric string.
#[derive(Debug, Deserialize)]
struct RawDigest {
    summary: Option<serde_json::Value>,
    sentiment: Option<String>,
    score: Option<serde_json::Value>,
}

/// Coerces raw summarization output into a digest.
///
/// - unparseable JSON: fallback summary, neutral, no score
/// - array summary: bullets joined, capped at [`MAX_SUMMARY_BULLETS`]
/// - sentiment: substring-normalized, anything unrecognized is neutral
/// - score: clamped to [0, 1], non-numeric becomes `None`
fn coerce_digest(content: &str) -> SessionDigest {
    let raw: RawDigest = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(_) => {
            tracing::warn!("assistant digest output was not valid JSON, using fallback summary");
            return SessionDigest {
                summary: FALLBACK_SUMMARY.to_string(),
                sentiment: Sentiment::Neutral,
                score: None,
            };
        }
    };

    SessionDigest {
        summary: coerce_summary_text(raw.summary.as_ref()),
        sentiment: raw
            .sentiment
            .as_deref()
            .map(Sentiment::from_label)
            .unwrap_or_default(),
        score: raw.score.as_ref().and_then(coerce_score).and_then(clamp_score),
    }
}

fn coerce_summary_text(value: Option<&serde_json::Value>) -> String {
    let text = match value {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_SUMMARY_BULLETS)
            .map(|line| {
                if line.starts_with('-') {
                    line.to_string()
                } else {
                    format!("- {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    };

    if text.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        text
    }
}

fn coerce_score(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses retry-after seconds from a rate limit error body; OpenAI
/// sometimes embeds "try again in Xs" in the message.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

// ----- OpenAI API types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
