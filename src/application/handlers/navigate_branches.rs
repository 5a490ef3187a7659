//! NavigateBranchesHandler - Query handler for branch recommendations.

use std::sync::Arc;

use crate::domain::context::UserContext;
use crate::domain::foundation::ChoiceError;
use crate::domain::path::{BranchNavigation, BranchNavigator, BranchWeights, ChoicePath};
use crate::ports::PathStore;

/// Query for the branches available from a stored path.
#[derive(Debug, Clone)]
pub struct NavigateBranchesQuery {
    pub path: ChoicePath,
    pub context: UserContext,
}

/// Handler for branch navigation.
pub struct NavigateBranchesHandler {
    store: Arc<dyn PathStore>,
    navigator: BranchNavigator,
}

impl NavigateBranchesHandler {
    pub fn new(store: Arc<dyn PathStore>) -> Self {
        Self {
            store,
            navigator: BranchNavigator::default(),
        }
    }

    pub fn with_weights(mut self, weights: BranchWeights) -> Self {
        self.navigator = BranchNavigator::new(weights);
        self
    }

    pub fn handle(&self, query: NavigateBranchesQuery) -> Result<BranchNavigation, ChoiceError> {
        let context = query.context.normalized();

        // 1. Only stored paths can be branched
        self.store.get_path(query.path.id)?;

        // 2. Score branches against the caller's copy and the user's history
        let history = self.store.history_for(&context.user_id)?;
        let navigation = self.navigator.navigate(&query.path, &context, &history);

        tracing::debug!(
            path_id = %query.path.id,
            branches = navigation.available_branches.len(),
            history = navigation.history.len(),
            "branches scored"
        );

        Ok(navigation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPathStore;
    use crate::application::handlers::{GeneratePathCommand, GeneratePathHandler};
    use crate::domain::audience::AudienceCatalog;
    use crate::domain::foundation::{ErrorCode, Purpose};
    use crate::domain::path::BranchKind;
    use crate::domain::strategy::TemplateLibrary;

    fn generate(store: Arc<InMemoryPathStore>, context: &UserContext) -> ChoicePath {
        GeneratePathHandler::new(
            store,
            Arc::new(AudienceCatalog::builtin().clone()),
            Arc::new(TemplateLibrary::builtin().clone()),
        )
        .handle(GeneratePathCommand {
            purpose: Purpose::PersuadeConvince,
            context: context.clone(),
            constraints: None,
        })
        .unwrap()
    }

    #[test]
    fn navigates_stored_path_with_history() {
        let store = Arc::new(InMemoryPathStore::new());
        let context = UserContext::default().with_time_available(5);
        generate(store.clone(), &context);
        let path = generate(store.clone(), &context);

        let navigation = NavigateBranchesHandler::new(store)
            .handle(NavigateBranchesQuery { path: path.clone(), context })
            .unwrap();

        assert_eq!(navigation.current_path, path.id);
        assert_eq!(navigation.history.len(), 2);
        assert_eq!(navigation.recommendations[0].kind, BranchKind::Quick);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let store = Arc::new(InMemoryPathStore::new());
        let path = generate(store.clone(), &UserContext::default());
        store.clear();

        let err = NavigateBranchesHandler::new(store)
            .handle(NavigateBranchesQuery {
                path,
                context: UserContext::default(),
            })
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PathNotFound);
    }
}
