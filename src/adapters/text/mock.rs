//! Mock Text Generator for testing.
//!
//! Returns queued responses in order, so tests can exercise example
//! enrichment without a real service.
//!
//! # Features
//!
//! - Pre-configured responses
//! - Simulated delays for timeout testing
//! - Error injection for degraded-enrichment testing
//! - Prompt tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("A vivid opening example")
//!     .with_delay(Duration::from_millis(50));
//!
//! let text = generator.generate("Write an opening").await?;
//! assert_eq!(text, "A vivid opening example");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{TextGenerationError, TextGenerator};

const DEFAULT_RESPONSE: &str = "Generated example text.";

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Error(MockError),
}

/// Mock error types for testing fallback handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate an answer with no text.
    Empty,
}

impl From<MockError> for TextGenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Unavailable { message } => TextGenerationError::Unavailable(message),
            MockError::AuthenticationFailed => TextGenerationError::AuthenticationFailed,
            MockError::Network { message } => TextGenerationError::Network(message),
            MockError::Empty => TextGenerationError::EmptyResponse,
        }
    }
}

/// Mock text generator for testing.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompts received, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    /// Creates a mock with no queued responses and no delay.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Text(text.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Returns the prompts received so far.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn push(&self, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or_else(|| MockResponse::Text(DEFAULT_RESPONSE.to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(prompt.to_string());
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate("a").await.unwrap(), "first");
        assert_eq!(generator.generate("b").await.unwrap(), "second");
        assert_eq!(generator.generate("c").await.unwrap(), DEFAULT_RESPONSE);
    }

    #[tokio::test]
    async fn injected_errors_are_converted() {
        let generator = MockTextGenerator::new()
            .with_error(MockError::AuthenticationFailed)
            .with_error(MockError::Empty);

        assert_eq!(
            generator.generate("a").await.unwrap_err(),
            TextGenerationError::AuthenticationFailed
        );
        assert_eq!(
            generator.generate("b").await.unwrap_err(),
            TextGenerationError::EmptyResponse
        );
    }

    #[tokio::test]
    async fn tracks_prompts() {
        let generator = MockTextGenerator::new();
        generator.generate("hello").await.unwrap();
        generator.generate("world").await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.get_calls(), vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let generator = MockTextGenerator::new().with_response("shared");
        let clone = generator.clone();

        assert_eq!(clone.generate("x").await.unwrap(), "shared");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let generator = MockTextGenerator::new().with_delay(Duration::from_millis(50));
        let started = tokio::time::Instant::now();
        generator.generate("slow").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
