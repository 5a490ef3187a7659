//! Store doubles shared by handler tests.

use crate::adapters::InMemoryPathStore;
use crate::domain::foundation::{PathId, UserId};
use crate::domain::path::{AdaptationData, ChoicePath};
use crate::ports::{PathStore, PathStoreError};

/// A store whose every operation fails.
pub struct FailingStore;

impl FailingStore {
    fn error() -> PathStoreError {
        PathStoreError::Unavailable("store offline".to_string())
    }
}

impl PathStore for FailingStore {
    fn save_path(&self, _path: &ChoicePath) -> Result<(), PathStoreError> {
        Err(Self::error())
    }

    fn get_path(&self, _id: PathId) -> Result<ChoicePath, PathStoreError> {
        Err(Self::error())
    }

    fn append_history(&self, _user_id: &UserId, _path: &ChoicePath) -> Result<(), PathStoreError> {
        Err(Self::error())
    }

    fn history_for(&self, _user_id: &UserId) -> Result<Vec<ChoicePath>, PathStoreError> {
        Err(Self::error())
    }

    fn update_adaptation(
        &self,
        _id: PathId,
        _update: &mut dyn FnMut(&AdaptationData) -> Result<AdaptationData, PathStoreError>,
    ) -> Result<AdaptationData, PathStoreError> {
        Err(Self::error())
    }
}

/// An in-memory store that refuses every new path and delegates the rest.
pub struct SaveFailingStore {
    inner: InMemoryPathStore,
}

impl SaveFailingStore {
    pub fn new(inner: InMemoryPathStore) -> Self {
        Self { inner }
    }
}

impl PathStore for SaveFailingStore {
    fn save_path(&self, _path: &ChoicePath) -> Result<(), PathStoreError> {
        Err(PathStoreError::Unavailable("disk full".to_string()))
    }

    fn get_path(&self, id: PathId) -> Result<ChoicePath, PathStoreError> {
        self.inner.get_path(id)
    }

    fn append_history(&self, user_id: &UserId, path: &ChoicePath) -> Result<(), PathStoreError> {
        self.inner.append_history(user_id, path)
    }

    fn history_for(&self, user_id: &UserId) -> Result<Vec<ChoicePath>, PathStoreError> {
        self.inner.history_for(user_id)
    }

    fn update_adaptation(
        &self,
        id: PathId,
        update: &mut dyn FnMut(&AdaptationData) -> Result<AdaptationData, PathStoreError>,
    ) -> Result<AdaptationData, PathStoreError> {
        self.inner.update_adaptation(id, update)
    }
}
