//! Example enrichment configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;
use crate::adapters::HttpTextGeneratorConfig;

/// Generative-text enrichment settings
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Call the text generator at all
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the messages API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    pub api_key: Option<Secret<String>>,

    /// Per-phase timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl EnrichmentConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// HTTP generator settings, when enrichment is enabled and keyed.
    pub fn generator_config(&self) -> Option<HttpTextGeneratorConfig> {
        if !self.enabled {
            return None;
        }
        let api_key = self.api_key.clone()?;
        Some(
            HttpTextGeneratorConfig::from_secret(api_key)
                .with_base_url(self.endpoint.clone())
                .with_model(self.model.clone())
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )
    }

    /// Validate enrichment configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.has_api_key() {
            return Err(ConfigValidationError::MissingRequired("ENRICHMENT__API_KEY"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigValidationError::InvalidEndpoint);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            max_retries: default_retries(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_retries() -> u32 {
    1
}
