pub(crate) mod groq;

use async_trait::async_trait;
use thiserror::Error;

pub(crate) use groq::GroqClient;

#[derive(Debug, Error)]
pub(crate) enum LlmError {
    #[error("failed to reach LLM API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LLM API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("LLM API returned no content")]
    EmptyResponse,
    #[error("failed to decode LLM API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LlmError {
    /// Upstream status worth proxying to the caller, if any.
    pub(crate) fn upstream_status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } if (400..600).contains(status) => Some(*status),
            _ => None,
        }
    }
}

/// A chat-completion backend that answers with a JSON object.
#[async_trait]
pub(crate) trait CompletionClient: Send + Sync {
    async fn complete_json(&self, prompt: &str) -> Result<String, LlmError>;
}
