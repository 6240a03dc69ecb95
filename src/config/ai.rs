//! Assistant (OpenAI) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model used for conversation turns
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for transcript summarization
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        if self
            .openai_api_key
            .as_ref()
            .is_some_and(|k| !k.starts_with("sk-"))
        {
            return Err(ValidationError::InvalidOpenAiKey);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            chat_model: default_chat_model(),
            summary_model: default_summary_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_summary_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_validation() {
        assert!(AiConfig::default().validate().is_err());
    }

    #[test]
    fn sk_prefixed_key_passes_validation() {
        let config = AiConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_key_fails_validation() {
        let config = AiConfig {
            openai_api_key: Some("not-a-key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
