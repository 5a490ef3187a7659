//! In-Memory Path Store Adapter
//!
//! Keeps paths, per-user history and adaptation statistics in sharded
//! concurrent maps. Clones share the same underlying maps.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::foundation::{PathId, UserId};
use crate::domain::path::{AdaptationData, ChoicePath};
use crate::ports::{PathStore, PathStoreError};

/// In-memory store for generated paths
#[derive(Debug, Clone, Default)]
pub struct InMemoryPathStore {
    paths: Arc<DashMap<PathId, ChoicePath>>,
    history: Arc<DashMap<UserId, Vec<ChoicePath>>>,
    adaptations: Arc<DashMap<PathId, AdaptationData>>,
}

impl InMemoryPathStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored paths
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Current statistics for a path, if it has ever been adapted
    pub fn adaptation_for(&self, id: PathId) -> Option<AdaptationData> {
        self.adaptations.get(&id).map(|entry| entry.value().clone())
    }

    /// Clear all stored data (useful for tests)
    pub fn clear(&self) {
        self.paths.clear();
        self.history.clear();
        self.adaptations.clear();
    }
}

impl PathStore for InMemoryPathStore {
    fn save_path(&self, path: &ChoicePath) -> Result<(), PathStoreError> {
        self.paths.entry(path.id).or_insert_with(|| path.clone());
        Ok(())
    }

    fn get_path(&self, id: PathId) -> Result<ChoicePath, PathStoreError> {
        self.paths
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(PathStoreError::NotFound(id))
    }

    fn append_history(&self, user_id: &UserId, path: &ChoicePath) -> Result<(), PathStoreError> {
        self.history
            .entry(user_id.clone())
            .or_default()
            .push(path.clone());
        Ok(())
    }

    fn history_for(&self, user_id: &UserId) -> Result<Vec<ChoicePath>, PathStoreError> {
        Ok(self
            .history
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn update_adaptation(
        &self,
        id: PathId,
        update: &mut dyn FnMut(&AdaptationData) -> Result<AdaptationData, PathStoreError>,
    ) -> Result<AdaptationData, PathStoreError> {
        // The entry guard holds the shard lock for this key until dropped.
        match self.adaptations.entry(id) {
            Entry::Occupied(mut entry) => {
                let next = update(entry.get())?;
                *entry.get_mut() = next.clone();
                Ok(next)
            }
            Entry::Vacant(entry) => {
                let next = update(&AdaptationData::new(id))?;
                entry.insert(next.clone());
                Ok(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, MatchWeights};
    use crate::domain::context::UserContext;
    use crate::domain::foundation::Purpose;
    use crate::domain::path::{PathAssembler, PerformanceData, UserFeedback};
    use crate::domain::strategy::TemplateLibrary;

    fn path() -> ChoicePath {
        PathAssembler::new(AudienceCatalog::builtin(), TemplateLibrary::builtin(), MatchWeights::default(), 3)
            .assemble(Purpose::RequestSupport, &UserContext::default(), None)
            .unwrap()
    }

    #[test]
    fn saves_and_loads_paths() {
        let store = InMemoryPathStore::new();
        let path = path();
        store.save_path(&path).unwrap();
        assert_eq!(store.get_path(path.id).unwrap(), path);
        assert_eq!(store.path_count(), 1);
    }

    #[test]
    fn missing_path_is_not_found() {
        let store = InMemoryPathStore::new();
        let id = PathId::new();
        assert_eq!(store.get_path(id).unwrap_err(), PathStoreError::NotFound(id));
    }

    #[test]
    fn stored_paths_are_not_replaced() {
        let store = InMemoryPathStore::new();
        let original = path();
        store.save_path(&original).unwrap();

        let mut altered = original.clone();
        altered.metadata.tags.push("altered".to_string());
        store.save_path(&altered).unwrap();

        assert_eq!(store.get_path(original.id).unwrap(), original);
    }

    #[test]
    fn history_is_kept_per_user_in_order() {
        let store = InMemoryPathStore::new();
        let user = UserId::new("user-1").unwrap();
        let first = path();
        let second = path();
        store.append_history(&user, &first).unwrap();
        store.append_history(&user, &second).unwrap();

        let history = store.history_for(&user).unwrap();
        assert_eq!(history.iter().map(|p| p.id).collect::<Vec<_>>(), vec![first.id, second.id]);
        assert!(store.history_for(&UserId::anonymous()).unwrap().is_empty());
    }

    #[test]
    fn adaptation_updates_accumulate() {
        let store = InMemoryPathStore::new();
        let id = PathId::new();
        let feedback = UserFeedback { satisfaction: 0.5, effectiveness: 0.5, usability: 0.5 };
        let performance = PerformanceData {
            completion_time: 10.0,
            error_count: 0,
            confidence_change: 0.0,
            success_rate: 0.5,
        };

        assert!(store.adaptation_for(id).is_none());
        for _ in 0..3 {
            store
                .update_adaptation(id, &mut |data: &AdaptationData| Ok(data.record(&feedback, &performance)))
                .unwrap();
        }
        assert_eq!(store.adaptation_for(id).unwrap().adaptation_count, 3);
    }

    #[test]
    fn failed_update_commits_nothing() {
        let store = InMemoryPathStore::new();
        let id = PathId::new();
        let feedback = UserFeedback { satisfaction: 0.5, effectiveness: 0.5, usability: 0.5 };
        let performance = PerformanceData {
            completion_time: 10.0,
            error_count: 0,
            confidence_change: 0.0,
            success_rate: 0.5,
        };
        let offline = || PathStoreError::Unavailable("offline".to_string());

        let err = store
            .update_adaptation(id, &mut |_: &AdaptationData| Err(offline()))
            .unwrap_err();
        assert_eq!(err, offline());
        assert!(store.adaptation_for(id).is_none());

        store
            .update_adaptation(id, &mut |data: &AdaptationData| Ok(data.record(&feedback, &performance)))
            .unwrap();
        store
            .update_adaptation(id, &mut |_: &AdaptationData| Err(offline()))
            .unwrap_err();
        assert_eq!(store.adaptation_for(id).unwrap().adaptation_count, 1);
    }

    #[test]
    fn concurrent_adaptations_are_serialized() {
        let store = InMemoryPathStore::new();
        let id = PathId::new();
        let feedback = UserFeedback { satisfaction: 1.0, effectiveness: 1.0, usability: 1.0 };
        let performance = PerformanceData {
            completion_time: 5.0,
            error_count: 0,
            confidence_change: 1.0,
            success_rate: 1.0,
        };

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..25 {
                        store
                            .update_adaptation(id, &mut |data: &AdaptationData| Ok(data.record(&feedback, &performance)))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(store.adaptation_for(id).unwrap().adaptation_count, 200);
    }
}
