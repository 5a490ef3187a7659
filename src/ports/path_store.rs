//! Path Store Port - Interface for the shared path cache.
//!
//! Holds three keyed maps that outlive a single request: paths by id,
//! each user's generation history, and adaptation statistics per path.
//!
//! # Design
//!
//! - Synchronous: the core pipeline has no suspension points
//! - Reads of one path may interleave with writes of another
//! - `update_adaptation` serializes read-modify-write for one path id

use crate::domain::foundation::{ChoiceError, PathId, UserId};
use crate::domain::path::{AdaptationData, ChoicePath};

/// Errors raised by path store implementations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathStoreError {
    #[error("path not found: {0}")]
    NotFound(PathId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<PathStoreError> for ChoiceError {
    fn from(err: PathStoreError) -> Self {
        match err {
            PathStoreError::NotFound(id) => ChoiceError::PathNotFound(id),
            other => ChoiceError::Store(other.to_string()),
        }
    }
}

/// Port for storing generated paths and their learning state.
pub trait PathStore: Send + Sync {
    /// Stores a path under its id. Stored paths are never replaced.
    fn save_path(&self, path: &ChoicePath) -> Result<(), PathStoreError>;

    /// Fetches a stored path.
    ///
    /// # Errors
    /// `PathStoreError::NotFound` when no path has this id.
    fn get_path(&self, id: PathId) -> Result<ChoicePath, PathStoreError>;

    /// Appends a path to the user's history, oldest first.
    fn append_history(&self, user_id: &UserId, path: &ChoicePath) -> Result<(), PathStoreError>;

    /// The user's generated paths, oldest first. Empty for unknown users.
    fn history_for(&self, user_id: &UserId) -> Result<Vec<ChoicePath>, PathStoreError>;

    /// Applies `update` to the statistics of one path under an exclusive
    /// per-path lock and returns the committed value.
    ///
    /// The current value (or a fresh `AdaptationData`) is passed in. The
    /// returned value replaces it only when `update` returns `Ok`; on `Err`
    /// the stored statistics are left as they were and the error is returned.
    fn update_adaptation(
        &self,
        id: PathId,
        update: &mut dyn FnMut(&AdaptationData) -> Result<AdaptationData, PathStoreError>,
    ) -> Result<AdaptationData, PathStoreError>;
}
