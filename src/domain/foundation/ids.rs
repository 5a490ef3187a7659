//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a random v4 UUID newtype with the standard accessors.
///
/// Every generated id is fresh, so two objects built from identical inputs
/// in the same millisecond still get distinct identities.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", stringify!($name), ".")]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", stringify!($name), " from an existing UUID.")]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a generated choice path.
    PathId
);

uuid_id!(
    /// Unique identifier for a contextualized audience.
    AudienceId
);

uuid_id!(
    /// Unique identifier for a path-specific strategy.
    StrategyId
);

uuid_id!(
    /// Unique identifier for a personalized execution plan.
    ExecutionId
);

uuid_id!(
    /// Unique identifier for an execution variant.
    VariantId
);

uuid_id!(
    /// Unique identifier for an adaptive template instance.
    TemplateId
);

/// User identifier supplied by the caller (opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Placeholder identity for contexts that did not name a user.
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn path_id_generates_unique_values() {
        let ids: HashSet<PathId> = (0..1000).map(|_| PathId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn path_id_parses_from_display() {
        let id = PathId::new();
        let parsed: PathId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn path_id_rejects_invalid_string() {
        assert!("not-a-uuid".parse::<PathId>().is_err());
    }

    #[test]
    fn audience_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = AudienceId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn user_id_rejects_blank_string() {
        match UserId::new("   ") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            other => panic!("expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn user_id_defaults_to_anonymous() {
        assert_eq!(UserId::default().as_str(), "anonymous");
    }
}
