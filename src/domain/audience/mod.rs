//! Audience module - Archetype catalog, matching and contextualization.
//!
//! # Components
//!
//! - `AudienceCatalog` - Read-only archetypes keyed by purpose
//! - `AudienceMatcher` - Weighted scoring plus diversity-constrained top-K
//! - `Contextualizer` - Adapts one archetype to one request

mod archetype;
mod catalog;
mod contextualizer;
mod matcher;

pub use archetype::{
    AdaptiveContext, AudienceArchetype, Demographics, DiversityKey, DynamicAudience,
    Psychographics,
};
pub use catalog::AudienceCatalog;
pub use contextualizer::Contextualizer;
pub use matcher::{AudienceMatcher, MatchWeights, ScoredArchetype, DEFAULT_AUDIENCE_COUNT};
