//! Feedback-driven adaptation of stored paths.

use serde::{Deserialize, Serialize};

use super::ChoicePath;
use crate::domain::execution::SupportIntervention;
use crate::domain::foundation::{PathId, Timestamp, ValidationError};
use crate::domain::strategy::ApproachModifier;

/// Success rate below which a skill-building intervention is added.
pub const LOW_SUCCESS_RATE: f64 = 0.6;

/// Satisfaction below which a supportive tone modifier is added.
pub const LOW_SATISFACTION: f64 = 0.7;

/// What the user said about a path. Each score is 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    pub satisfaction: f64,
    #[serde(default)]
    pub effectiveness: f64,
    #[serde(default)]
    pub usability: f64,
}

impl UserFeedback {
    /// Rejects non-finite scores. Finite out-of-range scores are clamped later.
    pub fn validate(&self) -> Result<(), ValidationError> {
        finite("satisfaction", self.satisfaction)?;
        finite("effectiveness", self.effectiveness)?;
        finite("usability", self.usability)
    }
}

/// What actually happened when the user followed a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceData {
    /// Minutes.
    #[serde(default)]
    pub completion_time: f64,
    #[serde(default)]
    pub error_count: u32,
    #[serde(default)]
    pub confidence_change: f64,
    /// 0.0 to 1.0.
    pub success_rate: f64,
}

impl PerformanceData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        finite("completion_time", self.completion_time)?;
        finite("confidence_change", self.confidence_change)?;
        finite("success_rate", self.success_rate)
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(field, "must be a finite number"))
    }
}

/// Running statistics for one path id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationData {
    pub path_id: PathId,
    pub adaptation_count: u32,
    pub success_rate: f64,
    pub satisfaction: f64,
    pub last_updated: Timestamp,
}

impl AdaptationData {
    pub fn new(path_id: PathId) -> Self {
        Self {
            path_id,
            adaptation_count: 0,
            success_rate: 0.0,
            satisfaction: 0.0,
            last_updated: Timestamp::now(),
        }
    }

    /// Folds one more sample into the running averages.
    ///
    /// Returns the updated value and leaves `self` untouched, so a caller
    /// holding the stored copy commits only when the whole update succeeds.
    pub fn record(&self, feedback: &UserFeedback, performance: &PerformanceData) -> AdaptationData {
        let previous = self.adaptation_count as f64;
        let count = previous + 1.0;
        let average = |old: f64, sample: f64| (old * previous + sample.clamp(0.0, 1.0)) / count;

        AdaptationData {
            path_id: self.path_id,
            adaptation_count: self.adaptation_count + 1,
            success_rate: average(self.success_rate, performance.success_rate),
            satisfaction: average(self.satisfaction, feedback.satisfaction),
            last_updated: Timestamp::now(),
        }
    }
}

/// Derives improved paths from accumulated statistics.
pub struct AdaptiveLearner;

impl AdaptiveLearner {
    /// Builds the adapted copy of `original`.
    ///
    /// # Algorithm
    /// 1. Deep copy under a fresh id, linked through `adapted_from`
    /// 2. Success rate below 0.6: append a skill-building intervention
    /// 3. Satisfaction below 0.7: append a supportive tone modifier
    /// 4. Copy the running averages into the metadata and stamp `last_modified`
    ///
    /// # Edge Cases
    /// - `original` is borrowed immutably and never changes
    pub fn adapted_path(original: &ChoicePath, data: &AdaptationData) -> ChoicePath {
        let mut adapted = original.derive();

        if data.success_rate < LOW_SUCCESS_RATE {
            adapted
                .execution
                .confidence_support
                .interventions
                .push(SupportIntervention::skill_building());
        }
        if data.satisfaction < LOW_SATISFACTION {
            adapted.strategy.modifiers.push(ApproachModifier::supportive_tone());
        }

        adapted.metadata.completion_rate = data.success_rate;
        adapted.metadata.feedback_score = data.satisfaction;
        adapted.metadata.last_modified = Timestamp::now();

        tracing::debug!(
            original = %original.id,
            adapted = %adapted.id,
            success_rate = data.success_rate,
            satisfaction = data.satisfaction,
            "derived adapted path"
        );

        adapted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, MatchWeights};
    use crate::domain::context::UserContext;
    use crate::domain::execution::InterventionKind;
    use crate::domain::foundation::Purpose;
    use crate::domain::path::PathAssembler;
    use crate::domain::strategy::TemplateLibrary;

    fn path() -> ChoicePath {
        PathAssembler::new(AudienceCatalog::builtin(), TemplateLibrary::builtin(), MatchWeights::default(), 3)
            .assemble(Purpose::InformEducate, &UserContext::default(), None)
            .unwrap()
    }

    fn feedback(satisfaction: f64) -> UserFeedback {
        UserFeedback {
            satisfaction,
            effectiveness: 0.5,
            usability: 0.5,
        }
    }

    fn performance(success_rate: f64) -> PerformanceData {
        PerformanceData {
            completion_time: 12.0,
            error_count: 1,
            confidence_change: 0.5,
            success_rate,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Running averages
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn first_sample_becomes_the_average() {
        let data = AdaptationData::new(PathId::new()).record(&feedback(0.8), &performance(0.4));
        assert_eq!(data.adaptation_count, 1);
        assert!((data.success_rate - 0.4).abs() < 1e-9);
        assert!((data.satisfaction - 0.8).abs() < 1e-9);
    }

    #[test]
    fn later_samples_are_weighted_by_count() {
        let start = AdaptationData::new(PathId::new());
        let data = start
            .record(&feedback(0.9), &performance(0.9))
            .record(&feedback(0.6), &performance(0.3))
            .record(&feedback(0.3), &performance(0.6));
        assert_eq!(data.adaptation_count, 3);
        assert!((data.success_rate - 0.6).abs() < 1e-9);
        assert!((data.satisfaction - 0.6).abs() < 1e-9);
        assert_eq!(start.adaptation_count, 0);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let data = AdaptationData::new(PathId::new()).record(&feedback(4.0), &performance(-1.0));
        assert_eq!(data.satisfaction, 1.0);
        assert_eq!(data.success_rate, 0.0);
    }

    #[test]
    fn non_finite_samples_are_invalid() {
        let mut bad = feedback(0.5);
        bad.usability = f64::NAN;
        assert!(bad.validate().is_err());
        assert!(feedback(2.0).validate().is_ok());

        let mut slow = performance(0.5);
        slow.completion_time = f64::INFINITY;
        assert!(slow.validate().is_err());
    }

    // ───────────────────────────────────────────────────────────────
    // Adapted paths
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn struggling_unhappy_user_gets_both_supports() {
        let original = path();
        let snapshot = original.clone();
        let data = AdaptationData::new(original.id).record(&feedback(0.4), &performance(0.3));
        let adapted = AdaptiveLearner::adapted_path(&original, &data);

        assert_eq!(original, snapshot);
        assert_ne!(adapted.id, original.id);
        assert_eq!(adapted.adapted_from, Some(original.id));
        assert!(adapted
            .execution
            .confidence_support
            .has_intervention(InterventionKind::SkillBuilding));
        let last = adapted.strategy.modifiers.last().unwrap();
        assert_eq!(last.name, "Supportive Tone");
        assert_eq!(last.weight(), 1.0);
        assert_eq!(adapted.strategy.modifiers.len(), original.strategy.modifiers.len() + 1);
        assert!((adapted.metadata.completion_rate - 0.3).abs() < 1e-9);
    }

    #[test]
    fn adapted_copy_shares_no_nested_ids() {
        let original = PathAssembler::new(
            AudienceCatalog::builtin(),
            TemplateLibrary::builtin(),
            MatchWeights::default(),
            3,
        )
        .assemble(Purpose::SolveProblems, &UserContext::default(), None)
        .unwrap();
        let data = AdaptationData::new(original.id).record(&feedback(0.5), &performance(0.5));
        let adapted = AdaptiveLearner::adapted_path(&original, &data);

        assert_eq!(adapted.alternate_audiences.len(), original.alternate_audiences.len());
        for (before, after) in original.audiences().zip(adapted.audiences()) {
            assert_ne!(before.id, after.id);
            assert_eq!(before.label, after.label);
        }
        assert_ne!(adapted.strategy.id, original.strategy.id);
        assert_ne!(adapted.execution.id, original.execution.id);
        for (before, after) in original.execution.variants.iter().zip(&adapted.execution.variants) {
            assert_ne!(before.id, after.id);
        }
        for (before, after) in original.strategy.templates.iter().zip(&adapted.strategy.templates) {
            assert_ne!(before.id, after.id);
        }
    }

    #[test]
    fn successful_happy_user_changes_only_statistics() {
        let original = path();
        let data = AdaptationData::new(original.id).record(&feedback(0.9), &performance(0.95));
        let adapted = AdaptiveLearner::adapted_path(&original, &data);

        assert_eq!(adapted.strategy.modifiers, original.strategy.modifiers);
        assert_eq!(
            adapted.execution.confidence_support.interventions,
            original.execution.confidence_support.interventions
        );
        assert!((adapted.metadata.feedback_score - 0.9).abs() < 1e-9);
        assert!(!adapted.metadata.last_modified.is_before(&original.metadata.last_modified));
    }
}
