//! Application layer - Handlers and the `ChoiceEngine` facade.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (generate, adapt) write to the `PathStore`; queries (branches,
//! enrichment) only read.

mod engine;
pub mod handlers;

pub use engine::{ChoiceEngine, ChoiceEngineBuilder};
pub use handlers::{
    AdaptPathCommand, AdaptPathHandler, DegradedEnrichment, EnrichedExample, EnrichedExamples,
    ExampleEnricher, GeneratePathCommand, GeneratePathHandler, NavigateBranchesHandler,
    NavigateBranchesQuery, DEFAULT_ENRICHMENT_TIMEOUT,
};
