//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::CatalogError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),

    #[error("Catalog loading failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Text generator setup failed: {0}")]
    Enrichment(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Audience count must be between 1 and {max}, got {actual}")]
    InvalidAudienceCount { max: usize, actual: usize },

    #[error("Branch weight '{0}' must be a finite number")]
    InvalidBranchWeight(&'static str),

    #[error("Branch time tolerance must be positive")]
    InvalidTimeTolerance,

    #[error("Catalog file not found: {0}")]
    CatalogFileMissing(String),

    #[error("Invalid enrichment endpoint URL")]
    InvalidEndpoint,

    #[error("Invalid enrichment timeout")]
    InvalidTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
