//! GeneratePathHandler - Command handler for building a new choice path.
//!
//! Assembly is pure. The handler persists the result and records it in the
//! user's history.

use std::sync::Arc;

use crate::domain::audience::{AudienceCatalog, MatchWeights, DEFAULT_AUDIENCE_COUNT};
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::{ChoiceError, Purpose};
use crate::domain::path::{ChoicePath, PathAssembler};
use crate::domain::strategy::TemplateLibrary;
use crate::ports::PathStore;

/// Command to generate a path for one purpose and context.
#[derive(Debug, Clone)]
pub struct GeneratePathCommand {
    pub purpose: Purpose,
    pub context: UserContext,
    pub constraints: Option<PathConstraints>,
}

/// Handler for path generation.
pub struct GeneratePathHandler {
    store: Arc<dyn PathStore>,
    catalog: Arc<AudienceCatalog>,
    templates: Arc<TemplateLibrary>,
    weights: MatchWeights,
    audience_count: usize,
}

impl GeneratePathHandler {
    pub fn new(
        store: Arc<dyn PathStore>,
        catalog: Arc<AudienceCatalog>,
        templates: Arc<TemplateLibrary>,
    ) -> Self {
        Self {
            store,
            catalog,
            templates,
            weights: MatchWeights::default(),
            audience_count: DEFAULT_AUDIENCE_COUNT,
        }
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_audience_count(mut self, audience_count: usize) -> Self {
        self.audience_count = audience_count;
        self
    }

    pub fn handle(&self, cmd: GeneratePathCommand) -> Result<ChoicePath, ChoiceError> {
        let context = cmd.context.normalized();

        // 1. Assemble audience, strategy and execution
        let assembler = PathAssembler::new(
            &self.catalog,
            &self.templates,
            self.weights.clone(),
            self.audience_count,
        );
        let path = assembler.assemble(cmd.purpose, &context, cmd.constraints.as_ref())?;

        // 2. Persist and record in the user's history
        self.store.save_path(&path)?;
        self.store.append_history(&path.user_id, &path)?;

        tracing::info!(
            path_id = %path.id,
            purpose = %cmd.purpose.as_str(),
            audience = %path.audience.label,
            difficulty = ?path.metadata.difficulty,
            variants = path.execution.variants.len(),
            "choice path generated"
        );

        Ok(path)
    }
}
