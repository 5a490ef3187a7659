//! ChoicePath aggregate: audience, strategy and execution for one request.

use serde::{Deserialize, Serialize};

use crate::domain::audience::DynamicAudience;
use crate::domain::execution::PersonalizedExecution;
use crate::domain::foundation::{
    AudienceId, Difficulty, ExecutionId, PathId, Purpose, StrategyId, TemplateId, Timestamp,
    UserId, VariantId,
};
use crate::domain::strategy::PathSpecificStrategy;

/// Tracking data carried alongside a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMetadata {
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
    /// 0.0 to 1.0.
    pub completion_rate: f64,
    pub average_confidence: f64,
    /// Minutes.
    pub time_to_complete: f64,
    /// 0.0 to 1.0.
    pub feedback_score: f64,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub prerequisites: Vec<String>,
}

impl PathMetadata {
    /// Fresh metadata with zeroed statistics.
    pub fn new(difficulty: Difficulty, tags: Vec<String>, prerequisites: Vec<String>) -> Self {
        let now = Timestamp::now();
        Self {
            created_at: now,
            last_modified: now,
            completion_rate: 0.0,
            average_confidence: 0.0,
            time_to_complete: 0.0,
            feedback_score: 0.0,
            tags,
            difficulty,
            prerequisites,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The personalized bundle produced for one generation request.
///
/// Paths are immutable once stored. Adaptation derives a new path with a
/// fresh id and records the original in `adapted_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePath {
    pub id: PathId,
    #[serde(default)]
    pub adapted_from: Option<PathId>,
    pub user_id: UserId,
    pub purpose: Purpose,
    pub audience: DynamicAudience,
    #[serde(default)]
    pub alternate_audiences: Vec<DynamicAudience>,
    pub strategy: PathSpecificStrategy,
    pub execution: PersonalizedExecution,
    pub metadata: PathMetadata,
}

impl ChoicePath {
    /// Deep copy under fresh ids, linked back to this path.
    ///
    /// Every nested id (audiences, strategy, templates, execution and
    /// variants) is regenerated so no id is shared between the two paths.
    pub fn derive(&self) -> ChoicePath {
        let mut copy = self.clone();
        copy.id = PathId::new();
        copy.adapted_from = Some(self.id);

        copy.audience.id = AudienceId::new();
        for audience in &mut copy.alternate_audiences {
            audience.id = AudienceId::new();
        }
        copy.strategy.id = StrategyId::new();
        for template in &mut copy.strategy.templates {
            template.id = TemplateId::new();
        }
        copy.execution.id = ExecutionId::new();
        for variant in &mut copy.execution.variants {
            variant.id = VariantId::new();
        }
        copy
    }

    /// Every audience offered for this path, primary first.
    pub fn audiences(&self) -> impl Iterator<Item = &DynamicAudience> {
        std::iter::once(&self.audience).chain(self.alternate_audiences.iter())
    }
}
