//! HTTP Text Generator - `TextGenerator` backed by a messages-style API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpTextGeneratorConfig::new(api_key)
//!     .with_model("claude-3-haiku-20240307")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let generator = HttpTextGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{TextGenerationError, TextGenerator};

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// Token cap per generated example.
const MAX_TOKENS: u32 = 512;

/// Configuration for the HTTP text generator.
#[derive(Debug, Clone)]
pub struct HttpTextGeneratorConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl HttpTextGeneratorConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a configuration from an already wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "claude-3-haiku-20240307".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 1,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Text generator calling a remote messages endpoint.
pub struct HttpTextGenerator {
    config: HttpTextGeneratorConfig,
    client: Client,
}

impl HttpTextGenerator {
    /// Creates a generator with its own HTTP client.
    pub fn new(config: HttpTextGeneratorConfig) -> Result<Self, TextGenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TextGenerationError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, TextGenerationError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TextGenerationError::Timeout(self.config.timeout.as_millis() as u64)
                } else if e.is_connect() {
                    TextGenerationError::Network(format!("Connection failed: {}", e))
                } else {
                    TextGenerationError::Network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, TextGenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status.as_u16(), &body))
    }

    fn status_error(status: u16, body: &str) -> TextGenerationError {
        match status {
            401 | 403 => TextGenerationError::AuthenticationFailed,
            429 => TextGenerationError::Unavailable(format!("Rate limited: {}", body)),
            500..=599 => TextGenerationError::Unavailable(format!("Server error {}: {}", status, body)),
            _ => TextGenerationError::Network(format!("Unexpected status {}: {}", status, body)),
        }
    }

    async fn parse_response(response: Response) -> Result<String, TextGenerationError> {
        let response = Self::handle_response_status(response).await?;
        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::Parse(format!("Failed to parse response: {}", e)))?;
        Self::extract_text(body)
    }

    fn extract_text(body: MessagesResponse) -> Result<String, TextGenerationError> {
        let text = body
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let text = text.trim();
        if text.is_empty() {
            return Err(TextGenerationError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let mut retry_count = 0;

        loop {
            let attempt = match self.send_request(prompt).await {
                Ok(response) => Self::parse_response(response).await,
                Err(err) => Err(err),
            };

            match attempt {
                Ok(text) => return Ok(text),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err)
                }
                Err(err) => {
                    tracing::debug!(error = %err, retry_count, "retrying text generation");
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ----- API Types -----

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = HttpTextGeneratorConfig::new("test-key")
            .with_model("custom-model")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(3))
            .with_max_retries(4);

        assert_eq!(config.model, "custom-model");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let config = HttpTextGeneratorConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let generator =
            HttpTextGenerator::new(HttpTextGeneratorConfig::new("k").with_base_url("http://localhost:9/")).unwrap();
        assert_eq!(generator.messages_url(), "http://localhost:9/v1/messages");
    }

    #[test]
    fn request_carries_prompt_as_single_user_message() {
        let generator = HttpTextGenerator::new(HttpTextGeneratorConfig::new("k")).unwrap();
        let json = serde_json::to_value(generator.to_request("Write an opening")).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Write an opening");
        assert_eq!(json["max_tokens"], MAX_TOKENS);
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            HttpTextGenerator::status_error(401, ""),
            TextGenerationError::AuthenticationFailed
        );
        assert!(HttpTextGenerator::status_error(429, "slow down").is_retryable());
        assert!(HttpTextGenerator::status_error(503, "").is_retryable());
        assert!(matches!(
            HttpTextGenerator::status_error(404, "missing"),
            TextGenerationError::Network(_)
        ));
    }

    #[test]
    fn text_blocks_are_joined() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Hello "},{"type":"tool_use"},{"type":"text","text":"there"}]}"#,
        )
        .unwrap();
        assert_eq!(HttpTextGenerator::extract_text(body).unwrap(), "Hello there");
    }

    #[test]
    fn blank_text_is_empty_response() {
        let body: MessagesResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"  "}]}"#).unwrap();
        assert_eq!(
            HttpTextGenerator::extract_text(body).unwrap_err(),
            TextGenerationError::EmptyResponse
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_without_panicking() {
        let config = HttpTextGeneratorConfig::new("k")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(200))
            .with_max_retries(0);
        let generator = HttpTextGenerator::new(config).unwrap();
        assert!(generator.generate("hi").await.is_err());
    }
}
