//! Context module - What the caller tells the engine about the user.

mod constraints;
mod user_context;

pub use constraints::PathConstraints;
pub use user_context::{
    ActiveConstraint, LearningPreference, PerformanceRecord, UserContext, DEFAULT_TIME_AVAILABLE,
    LEVEL_MAX, NEUTRAL_LEVEL,
};
