//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! and an optional file using the `config` and `dotenvy` crates. Environment
//! variables use the `CHOICE_PATHS` prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use choice_paths::adapters::InMemoryPathStore;
//! use choice_paths::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init().expect("Failed to install logging");
//!
//! let engine = config
//!     .engine_builder(Arc::new(InMemoryPathStore::new()))
//!     .expect("Failed to wire engine")
//!     .build();
//! ```

mod catalog;
mod engine;
mod enrichment;
mod error;
mod logging;

pub use catalog::CatalogConfig;
pub use engine::{EngineConfig, MAX_AUDIENCE_COUNT};
pub use enrichment::EnrichmentConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::HttpTextGenerator;
use crate::application::{ChoiceEngineBuilder, ExampleEnricher};
use crate::ports::PathStore;

/// Environment variable prefix
const ENV_PREFIX: &str = "CHOICE_PATHS";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// engine with the built-in catalogs and enrichment off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scoring weights and audience count
    #[serde(default)]
    pub engine: EngineConfig,

    /// Catalog override files
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Generative-text enrichment
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Tracing subscriber
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHOICE_PATHS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHOICE_PATHS__ENGINE__AUDIENCE_COUNT=4` -> `engine.audience_count = 4`
    /// - `CHOICE_PATHS__ENRICHMENT__ENABLED=true` -> `enrichment.enabled = true`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from a file (any format the `config` crate detects from the
    /// extension), with environment variables taking precedence.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__")
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.engine.validate()?;
        self.catalog.validate()?;
        self.enrichment.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Wires catalogs, weights and the text generator into an engine builder.
    ///
    /// # Errors
    /// - `ConfigError::Catalog` when an override file cannot be loaded
    /// - `ConfigError::Enrichment` when the HTTP client cannot be built
    pub fn engine_builder(&self, store: Arc<dyn PathStore>) -> Result<ChoiceEngineBuilder, ConfigError> {
        let enricher = match self.enrichment.generator_config() {
            Some(generator) => {
                let generator = HttpTextGenerator::new(generator)
                    .map_err(|e| ConfigError::Enrichment(e.to_string()))?;
                ExampleEnricher::new(Arc::new(generator)).with_timeout(self.enrichment.timeout())
            }
            None => ExampleEnricher::disabled(),
        };

        Ok(ChoiceEngineBuilder::new(store)
            .with_catalog(self.catalog.audience_catalog()?)
            .with_templates(self.catalog.template_library()?)
            .with_match_weights(self.engine.match_weights.clone())
            .with_branch_weights(self.engine.branch_weights.clone())
            .with_audience_count(self.engine.audience_count)
            .with_enricher(enricher))
    }
}
