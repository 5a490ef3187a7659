//! Strategy module - Adapts a purpose's base strategy to one audience.
//!
//! # Components
//!
//! - `StrategyAdapter` - Assembles a `PathSpecificStrategy`
//! - `FrameworkBuilder` - Opening, body, closing, call to action, flow and tone
//! - `NarrativeFramework` - Story arc, teaching moment or invitation
//! - `TemplateLibrary` / `TemplateAdapter` - Base templates and their per-field annotations
//! - `GuidanceBuilder` - Steps, hints and checkpoints

mod adapter;
mod base;
mod framework;
mod guidance;
mod library;
mod narrative;
mod templates;

pub use adapter::{
    ApproachModifier, Modification, ModificationKind, ModifiedElement, PathSpecificStrategy,
    StrategyAdapter,
};
pub use base::BaseStrategy;
pub use framework::{
    AdaptiveElement, AdjustmentDirection, BodyFramework, CallToActionType, ClosingStrategy,
    ContentDepth, ContentFramework, ContentStructure, FrameworkBuilder, MessagePriority,
    OpeningApproach, Pace, PaceControl, ToneAspect, ToneGuideline, ToneRule,
};
pub use guidance::{
    AdaptiveHint, Checkpoint, GuidanceBuilder, GuidanceStep, HintTiming, HintTrigger,
    HintUrgency, PersonalizedGuidance,
};
pub use library::{BaseTemplate, TemplateLibrary};
pub use narrative::{NarrativeFramework, NarrativeKind, NarrativePhase};
pub use templates::{
    AdaptiveField, AdaptiveTemplate, FieldDepth, FieldStyle, PersonalizationLevel,
    TemplateAdapter,
};
