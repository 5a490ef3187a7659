//! Command and query handlers for choice paths.

// Command handlers
mod adapt_path;
mod generate_path;

// Query handlers
mod enrich_examples;
mod navigate_branches;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapt_path::{AdaptPathCommand, AdaptPathHandler};
pub use enrich_examples::{
    DegradedEnrichment, EnrichedExample, EnrichedExamples, ExampleEnricher,
    DEFAULT_ENRICHMENT_TIMEOUT,
};
pub use generate_path::{GeneratePathCommand, GeneratePathHandler};
pub use navigate_branches::{NavigateBranchesHandler, NavigateBranchesQuery};
