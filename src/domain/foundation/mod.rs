//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the choice path domain.

mod errors;
mod ids;
mod purpose;
mod timestamp;
mod traits;

pub use errors::{CatalogError, ChoiceError, ErrorCode, ValidationError};
pub use ids::{AudienceId, ExecutionId, PathId, StrategyId, TemplateId, UserId, VariantId};
pub use purpose::Purpose;
pub use timestamp::Timestamp;
pub use traits::{
    CommunicationStyle, DecisionStyle, Difficulty, ExperienceLevel, TechComfort, TimeConstraint,
};
