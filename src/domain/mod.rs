//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `context` - Caller-supplied user context and path constraints
//! - `audience` - Archetype catalog, matching and contextualization
//! - `strategy` - Purpose strategies adapted to one audience
//! - `execution` - Execution variants, confidence support and metrics
//! - `path` - ChoicePath aggregate, assembly, branching, adaptation, selection

pub mod audience;
pub mod context;
pub mod execution;
pub mod foundation;
pub mod path;
pub mod strategy;
