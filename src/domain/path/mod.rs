//! Path module - The ChoicePath aggregate and what happens to it after creation.
//!
//! # Components
//!
//! - `ChoicePath` / `PathMetadata` - Aggregate root
//! - `PathAssembler` - Matcher, strategy adapter and planner in dependency order
//! - `BranchNavigator` - Scores and ranks branch options
//! - `AdaptiveLearner` / `AdaptationData` - Feedback-driven adaptation
//! - `PathSelector` - Picks the best of several candidate paths

mod adaptation;
mod assembler;
mod branching;
mod choice_path;
mod selection;

pub use adaptation::{
    AdaptationData, AdaptiveLearner, PerformanceData, UserFeedback, LOW_SATISFACTION,
    LOW_SUCCESS_RATE,
};
pub use assembler::{PathAssembler, EXCEEDS_CEILING_TAG};
pub use branching::{
    BranchHistoryEntry, BranchImpact, BranchKind, BranchNavigation, BranchNavigator,
    BranchOption, BranchRecommendation, BranchRequirement, BranchTiming, BranchWeights,
};
pub use choice_path::{ChoicePath, PathMetadata};
pub use selection::{PathSelection, PathSelector, PriorityFactor, SelectionFactor, MAX_ALTERNATIVES};
