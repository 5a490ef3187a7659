//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

use super::PathId;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Lookup errors
    UnknownPurpose,
    PathNotFound,
    NoCandidatePaths,

    // Infrastructure errors
    StoreError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnknownPurpose => "UNKNOWN_PURPOSE",
            ErrorCode::PathNotFound => "PATH_NOT_FOUND",
            ErrorCode::NoCandidatePaths => "NO_CANDIDATE_PATHS",
            ErrorCode::StoreError => "STORE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Fatal errors returned by the choice path engine.
///
/// Degraded enrichment is not an error; it travels as a warning next to
/// the fallback content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChoiceError {
    #[error("no audience archetypes registered for purpose '{0}'")]
    UnknownPurpose(String),

    #[error("choice path not found: {0}")]
    PathNotFound(PathId),

    #[error("no candidate paths to select from")]
    NoCandidatePaths,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("path store failure: {0}")]
    Store(String),
}

impl ChoiceError {
    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ChoiceError::UnknownPurpose(_) => ErrorCode::UnknownPurpose,
            ChoiceError::PathNotFound(_) => ErrorCode::PathNotFound,
            ChoiceError::NoCandidatePaths => ErrorCode::NoCandidatePaths,
            ChoiceError::Validation(_) => ErrorCode::ValidationFailed,
            ChoiceError::Store(_) => ErrorCode::StoreError,
        }
    }
}

/// Errors raised while loading static catalogs (archetypes, templates).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog has no entries for purpose '{0}'")]
    MissingPurpose(String),

    #[error("duplicate catalog id '{id}' under purpose '{purpose}'")]
    DuplicateId { purpose: String, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("stress_level", 0, 10, 15);
        assert_eq!(
            format!("{}", err),
            "Field 'stress_level' must be between 0 and 10, got 15"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("purpose", "unrecognized value");
        assert_eq!(
            format!("{}", err),
            "Field 'purpose' has invalid format: unrecognized value"
        );
    }

    #[test]
    fn error_code_displays_screaming_case() {
        assert_eq!(ErrorCode::UnknownPurpose.to_string(), "UNKNOWN_PURPOSE");
        assert_eq!(ErrorCode::PathNotFound.to_string(), "PATH_NOT_FOUND");
    }

    #[test]
    fn choice_error_maps_to_codes() {
        let id = PathId::new();
        assert_eq!(ChoiceError::PathNotFound(id).code(), ErrorCode::PathNotFound);
        assert_eq!(
            ChoiceError::UnknownPurpose("sing".into()).code(),
            ErrorCode::UnknownPurpose
        );
        assert_eq!(
            ChoiceError::from(ValidationError::empty_field("user_id")).code(),
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn path_not_found_mentions_id() {
        let id = PathId::new();
        let msg = ChoiceError::PathNotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
