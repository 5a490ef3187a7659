//! Execution module - Turns an adapted strategy into something to do.
//!
//! # Components
//!
//! - `ExecutionPlanner` - Chooses variants and assembles `PersonalizedExecution`
//! - `ExecutionVariant` - Quick, thorough, collaborative and balanced plans
//! - `ConfidenceSupport` - Boosters per phase plus threshold interventions
//! - `SuccessMetric` - Completion, confidence and purpose metrics

mod metrics;
mod planner;
mod support;
mod variants;

pub use metrics::{MeasurementMethod, SuccessMetric};
pub use planner::{ExecutionPlanner, PersonalizedExecution};
pub use support::{
    BoosterImpact, ConfidenceBooster, ConfidenceSupport, FollowUp, InterventionKind,
    QualityImpact, SupportIntervention, TimeOptimization,
};
pub use variants::{
    AdaptiveFeature, ConditionOperator, ExecutionStep, ExecutionVariant, Timeline,
    TimelineFactor, Troubleshooting, TroubleshootingPriority, VariantCondition, VariantKind,
};
