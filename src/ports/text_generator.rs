//! Text Generator Port - Interface for an external generative-text service.
//!
//! The engine only uses generated text to enrich examples. Every failure
//! is recoverable: callers fall back to static example content.

use async_trait::async_trait;

/// Errors from text generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextGenerationError {
    /// Service did not answer in time.
    #[error("text generation timed out after {0}ms")]
    Timeout(u64),

    /// Service is unavailable.
    #[error("text generator unavailable: {0}")]
    Unavailable(String),

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Service answered with no usable text.
    #[error("empty response")]
    EmptyResponse,
}

impl TextGenerationError {
    /// Whether a retry might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TextGenerationError::Timeout(_)
                | TextGenerationError::Unavailable(_)
                | TextGenerationError::Network(_)
        )
    }
}

/// Port for free-text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for one prompt.
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}
