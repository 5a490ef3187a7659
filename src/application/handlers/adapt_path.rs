//! AdaptPathHandler - Command handler for feedback-driven adaptation.
//!
//! Folds the feedback into the path's running statistics, derives an
//! improved copy and stores it under a new id. The statistics are committed
//! only once the copy is stored, and the original path is left exactly as
//! it was.

use std::sync::Arc;

use crate::domain::foundation::{ChoiceError, PathId};
use crate::domain::path::{
    AdaptationData, AdaptiveLearner, ChoicePath, PerformanceData, UserFeedback,
};
use crate::ports::PathStore;

/// Command to adapt a stored path.
#[derive(Debug, Clone)]
pub struct AdaptPathCommand {
    pub path_id: PathId,
    pub feedback: UserFeedback,
    pub performance: PerformanceData,
}

/// Handler for path adaptation.
pub struct AdaptPathHandler {
    store: Arc<dyn PathStore>,
}

impl AdaptPathHandler {
    pub fn new(store: Arc<dyn PathStore>) -> Self {
        Self { store }
    }

    pub fn handle(&self, cmd: AdaptPathCommand) -> Result<ChoicePath, ChoiceError> {
        cmd.feedback.validate()?;
        cmd.performance.validate()?;

        // 1. Load the original
        let original = self.store.get_path(cmd.path_id)?;

        // 2. Under the per-path lock: fold the sample, derive the adapted
        //    copy and persist it. A failed save leaves the statistics as
        //    they were.
        let mut adapted: Option<ChoicePath> = None;
        let data = self.store.update_adaptation(cmd.path_id, &mut |current: &AdaptationData| {
            let next = current.record(&cmd.feedback, &cmd.performance);
            let copy = AdaptiveLearner::adapted_path(&original, &next);
            self.store.save_path(&copy)?;
            adapted = Some(copy);
            Ok(next)
        })?;
        let adapted = adapted.ok_or_else(|| {
            ChoiceError::Store("adaptation committed without an adapted path".to_string())
        })?;

        tracing::info!(
            original = %original.id,
            adapted = %adapted.id,
            adaptation_count = data.adaptation_count,
            success_rate = data.success_rate,
            satisfaction = data.satisfaction,
            "choice path adapted"
        );

        Ok(adapted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPathStore;
    use crate::application::handlers::test_support::SaveFailingStore;
    use crate::application::handlers::{GeneratePathCommand, GeneratePathHandler};
    use crate::domain::audience::AudienceCatalog;
    use crate::domain::context::UserContext;
    use crate::domain::foundation::{ErrorCode, Purpose};
    use crate::domain::strategy::TemplateLibrary;

    fn stored_path(store: Arc<InMemoryPathStore>) -> ChoicePath {
        GeneratePathHandler::new(
            store,
            Arc::new(AudienceCatalog::builtin().clone()),
            Arc::new(TemplateLibrary::builtin().clone()),
        )
        .handle(GeneratePathCommand {
            purpose: Purpose::CreateEngagement,
            context: UserContext::default(),
            constraints: None,
        })
        .unwrap()
    }

    fn command(path_id: PathId, satisfaction: f64, success_rate: f64) -> AdaptPathCommand {
        AdaptPathCommand {
            path_id,
            feedback: UserFeedback {
                satisfaction,
                effectiveness: 0.5,
                usability: 0.5,
            },
            performance: PerformanceData {
                completion_time: 20.0,
                error_count: 2,
                confidence_change: 0.1,
                success_rate,
            },
        }
    }

    #[test]
    fn adapted_copy_is_stored_under_new_id() {
        let store = Arc::new(InMemoryPathStore::new());
        let original = stored_path(store.clone());
        let handler = AdaptPathHandler::new(store.clone());

        let adapted = handler.handle(command(original.id, 0.5, 0.4)).unwrap();

        assert_eq!(adapted.adapted_from, Some(original.id));
        assert_eq!(store.get_path(adapted.id).unwrap(), adapted);
        assert_eq!(store.get_path(original.id).unwrap(), original);
        assert_eq!(store.path_count(), 2);
    }

    #[test]
    fn statistics_accumulate_on_the_original_id() {
        let store = Arc::new(InMemoryPathStore::new());
        let original = stored_path(store.clone());
        let handler = AdaptPathHandler::new(store.clone());

        handler.handle(command(original.id, 0.9, 0.9)).unwrap();
        let second = handler.handle(command(original.id, 0.3, 0.1)).unwrap();

        let data = store.adaptation_for(original.id).unwrap();
        assert_eq!(data.adaptation_count, 2);
        assert!((data.success_rate - 0.5).abs() < 1e-9);
        assert!((second.metadata.feedback_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let handler = AdaptPathHandler::new(Arc::new(InMemoryPathStore::new()));
        let err = handler.handle(command(PathId::new(), 0.5, 0.5)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PathNotFound);
    }

    #[test]
    fn invalid_feedback_leaves_statistics_untouched() {
        let store = Arc::new(InMemoryPathStore::new());
        let original = stored_path(store.clone());

        let err = AdaptPathHandler::new(store.clone())
            .handle(command(original.id, f64::NAN, 0.5))
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(store.adaptation_for(original.id).is_none());
    }

    #[test]
    fn failed_save_leaves_statistics_untouched() {
        let inner = Arc::new(InMemoryPathStore::new());
        let original = stored_path(inner.clone());
        let handler = AdaptPathHandler::new(Arc::new(SaveFailingStore::new((*inner).clone())));

        let err = handler.handle(command(original.id, 0.4, 0.3)).unwrap_err();

        assert_eq!(err.code(), ErrorCode::StoreError);
        assert!(inner.adaptation_for(original.id).is_none());
        assert_eq!(inner.path_count(), 1);

        let adapted = AdaptPathHandler::new(inner.clone())
            .handle(command(original.id, 0.4, 0.3))
            .unwrap();
        assert_eq!(inner.adaptation_for(original.id).unwrap().adaptation_count, 1);
        assert_eq!(inner.get_path(adapted.id).unwrap(), adapted);
    }
}
