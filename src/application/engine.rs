//! ChoiceEngine - Single entry point over the path handlers.
//!
//! # Example
//!
//! ```ignore
//! let engine = ChoiceEngine::builder(Arc::new(InMemoryPathStore::new())).build();
//! let path = engine.generate(Purpose::SolveProblems, &ctx, None)?;
//! let branches = engine.navigate_branches(&path, &ctx)?;
//! ```

use std::sync::Arc;

use crate::domain::audience::{AudienceCatalog, MatchWeights, DEFAULT_AUDIENCE_COUNT};
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::{ChoiceError, PathId, Purpose};
use crate::domain::path::{
    BranchNavigation, BranchWeights, ChoicePath, PathSelection, PathSelector, PerformanceData,
    PriorityFactor, UserFeedback,
};
use crate::domain::strategy::TemplateLibrary;
use crate::ports::PathStore;

use super::handlers::{
    AdaptPathCommand, AdaptPathHandler, EnrichedExamples, ExampleEnricher, GeneratePathCommand,
    GeneratePathHandler, NavigateBranchesHandler, NavigateBranchesQuery,
};

/// Facade over generation, branching, adaptation, selection and enrichment.
pub struct ChoiceEngine {
    generate: GeneratePathHandler,
    navigate: NavigateBranchesHandler,
    adapt: AdaptPathHandler,
    enricher: ExampleEnricher,
}

impl ChoiceEngine {
    pub fn builder(store: Arc<dyn PathStore>) -> ChoiceEngineBuilder {
        ChoiceEngineBuilder::new(store)
    }

    /// Builds and stores a new path.
    ///
    /// # Errors
    /// `UnknownPurpose` when no archetypes exist for `purpose`, `Store` when
    /// persisting fails.
    pub fn generate(
        &self,
        purpose: Purpose,
        context: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> Result<ChoicePath, ChoiceError> {
        self.generate.handle(GeneratePathCommand {
            purpose,
            context: context.clone(),
            constraints: constraints.cloned(),
        })
    }

    /// Ranked branch recommendations for a stored path.
    pub fn navigate_branches(
        &self,
        path: &ChoicePath,
        context: &UserContext,
    ) -> Result<BranchNavigation, ChoiceError> {
        self.navigate.handle(NavigateBranchesQuery {
            path: path.clone(),
            context: context.clone(),
        })
    }

    /// Records feedback and returns the adapted copy, stored under a new id.
    pub fn adapt(
        &self,
        path_id: PathId,
        feedback: UserFeedback,
        performance: PerformanceData,
    ) -> Result<ChoicePath, ChoiceError> {
        self.adapt.handle(AdaptPathCommand {
            path_id,
            feedback,
            performance,
        })
    }

    pub fn select_optimal(
        &self,
        paths: Vec<ChoicePath>,
        context: &UserContext,
        priorities: &[PriorityFactor],
    ) -> Result<PathSelection, ChoiceError> {
        let context = context.normalized();
        let selection = PathSelector::select(paths, &context, priorities)?;
        tracing::debug!(
            selected = %selection.selected.id,
            alternatives = selection.alternatives.len(),
            confidence = selection.confidence,
            "path selected"
        );
        Ok(selection)
    }

    /// Generated examples for each narrative phase, falling back to the
    /// static ones. Never fails.
    pub async fn enrich_examples(&self, path: &ChoicePath) -> EnrichedExamples {
        self.enricher.enrich(path).await
    }
}

/// Assembles a `ChoiceEngine` from its collaborators.
pub struct ChoiceEngineBuilder {
    store: Arc<dyn PathStore>,
    catalog: Arc<AudienceCatalog>,
    templates: Arc<TemplateLibrary>,
    match_weights: MatchWeights,
    branch_weights: BranchWeights,
    audience_count: usize,
    enricher: ExampleEnricher,
}

impl ChoiceEngineBuilder {
    /// Starts from the built-in catalogs, default weights and no enrichment.
    pub fn new(store: Arc<dyn PathStore>) -> Self {
        Self {
            store,
            catalog: Arc::new(AudienceCatalog::builtin().clone()),
            templates: Arc::new(TemplateLibrary::builtin().clone()),
            match_weights: MatchWeights::default(),
            branch_weights: BranchWeights::default(),
            audience_count: DEFAULT_AUDIENCE_COUNT,
            enricher: ExampleEnricher::disabled(),
        }
    }

    pub fn with_catalog(mut self, catalog: AudienceCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_templates(mut self, templates: TemplateLibrary) -> Self {
        self.templates = Arc::new(templates);
        self
    }

    pub fn with_match_weights(mut self, weights: MatchWeights) -> Self {
        self.match_weights = weights;
        self
    }

    pub fn with_branch_weights(mut self, weights: BranchWeights) -> Self {
        self.branch_weights = weights;
        self
    }

    pub fn with_audience_count(mut self, audience_count: usize) -> Self {
        self.audience_count = audience_count;
        self
    }

    pub fn with_enricher(mut self, enricher: ExampleEnricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn build(self) -> ChoiceEngine {
        ChoiceEngine {
            generate: GeneratePathHandler::new(self.store.clone(), self.catalog, self.templates)
                .with_weights(self.match_weights)
                .with_audience_count(self.audience_count),
            navigate: NavigateBranchesHandler::new(self.store.clone())
                .with_weights(self.branch_weights),
            adapt: AdaptPathHandler::new(self.store),
            enricher: self.enricher,
        }
    }
}
