//! Builds a `PathSpecificStrategy` for one purpose, audience and context.

use serde::{Deserialize, Serialize};

use super::{
    AdaptiveTemplate, BaseStrategy, ContentFramework, FrameworkBuilder, GuidanceBuilder,
    PersonalizedGuidance, TemplateAdapter, TemplateLibrary,
};
use crate::domain::audience::DynamicAudience;
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::{
    CommunicationStyle, DecisionStyle, ExperienceLevel, Purpose, StrategyId, TimeConstraint,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifiedElement {
    Tone,
    Structure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    ModifyTone,
    Append,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub element: ModifiedElement,
    pub kind: ModificationKind,
    pub value: String,
    pub weight: f64,
}

/// A weighted adjustment applied on top of the strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachModifier {
    pub name: String,
    pub description: String,
    pub conditions: Vec<String>,
    pub modifications: Vec<Modification>,
}

impl ApproachModifier {
    /// Appended by the learner when satisfaction drops.
    pub fn supportive_tone() -> Self {
        Self {
            name: "Supportive Tone".to_string(),
            description: "Shift toward a more encouraging, supportive voice".to_string(),
            conditions: vec!["low_satisfaction".to_string()],
            modifications: vec![Modification {
                element: ModifiedElement::Tone,
                kind: ModificationKind::ModifyTone,
                value: "supportive".to_string(),
                weight: 1.0,
            }],
        }
    }

    /// Highest modification weight, 0 when empty.
    pub fn weight(&self) -> f64 {
        self.modifications
            .iter()
            .map(|m| m.weight)
            .fold(0.0, f64::max)
    }
}

/// Strategy tailored to one audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSpecificStrategy {
    pub id: StrategyId,
    pub name: String,
    pub description: String,
    pub adaptive_description: String,
    pub approach: String,
    pub key_elements: Vec<String>,
    pub framework: ContentFramework,
    pub templates: Vec<AdaptiveTemplate>,
    pub modifiers: Vec<ApproachModifier>,
    pub guidance: PersonalizedGuidance,
}

/// Adapts base strategies using a template library.
#[derive(Debug, Clone, Copy)]
pub struct StrategyAdapter<'a> {
    templates: &'a TemplateLibrary,
}

impl<'a> StrategyAdapter<'a> {
    pub fn new(templates: &'a TemplateLibrary) -> Self {
        Self { templates }
    }

    pub fn adapt(
        &self,
        purpose: Purpose,
        audience: &DynamicAudience,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> PathSpecificStrategy {
        let base = BaseStrategy::for_purpose(purpose);
        let adapted = base.adapted_for(audience);

        PathSpecificStrategy {
            id: StrategyId::new(),
            name: format!("{} for {}", adapted.name, audience.label),
            adaptive_description: Self::adaptive_description(&adapted.description, audience, ctx),
            description: adapted.description,
            approach: adapted.approach,
            key_elements: adapted.key_elements,
            framework: FrameworkBuilder::build(purpose, audience, ctx),
            templates: TemplateAdapter::adapt(self.templates, purpose, audience, ctx, constraints),
            modifiers: Self::modifiers(purpose, audience, ctx),
            guidance: GuidanceBuilder::build(purpose, audience, ctx),
        }
    }

    /// Base description followed by audience and context modifiers.
    pub fn adaptive_description(base: &str, audience: &DynamicAudience, ctx: &UserContext) -> String {
        let mut audience_parts = Vec::new();
        if audience.time_constraint() == TimeConstraint::VeryLimited {
            audience_parts.push("with a focus on efficiency and quick implementation");
        }
        if audience.decision_style() == DecisionStyle::DataDriven {
            audience_parts.push("backed by data and metrics");
        }
        if audience.communication_style() == CommunicationStyle::WarmPersonal {
            audience_parts.push("with a personal and supportive approach");
        }

        let mut context_parts = Vec::new();
        if ctx.stress_level > 7 {
            context_parts.push("designed to reduce complexity and stress");
        }
        if ctx.confidence_level < 4 {
            context_parts.push("with built-in confidence-building support");
        }
        if ctx.time_available < 15 {
            context_parts.push("optimized for rapid execution");
        }

        let mut description = base.to_string();
        if !audience_parts.is_empty() {
            description.push(' ');
            description.push_str(&audience_parts.join(", "));
        }
        if !context_parts.is_empty() {
            description.push_str(", ");
            description.push_str(&context_parts.join(" and "));
        }
        description
    }

    /// Tone (0.8), formality (0.7) and, for unsure or stressed users,
    /// enhanced support (0.9).
    pub fn modifiers(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> Vec<ApproachModifier> {
        let tone = Self::tone(purpose, audience);
        let formality = Self::formality(audience);

        let mut modifiers = vec![
            ApproachModifier {
                name: "Tone Adjustment".to_string(),
                description: "Adjust tone based on audience and context".to_string(),
                conditions: vec![tone.to_string()],
                modifications: vec![Modification {
                    element: ModifiedElement::Tone,
                    kind: ModificationKind::ModifyTone,
                    value: tone.to_string(),
                    weight: 0.8,
                }],
            },
            ApproachModifier {
                name: "Formality Level".to_string(),
                description: "Adjust formality based on audience".to_string(),
                conditions: vec![formality.to_string()],
                modifications: vec![Modification {
                    element: ModifiedElement::Tone,
                    kind: ModificationKind::ModifyTone,
                    value: formality.to_string(),
                    weight: 0.7,
                }],
            },
        ];

        if ctx.confidence_level < 5 || ctx.stress_level > 7 {
            modifiers.push(ApproachModifier {
                name: "Enhanced Support".to_string(),
                description: "Provide additional support for confidence".to_string(),
                conditions: vec!["low_confidence".to_string(), "high_stress".to_string()],
                modifications: vec![Modification {
                    element: ModifiedElement::Structure,
                    kind: ModificationKind::Append,
                    value: "additional_support".to_string(),
                    weight: 0.9,
                }],
            });
        }

        modifiers
    }

    pub fn tone(purpose: Purpose, audience: &DynamicAudience) -> &'static str {
        match purpose {
            Purpose::InspireMotivate => "inspirational",
            Purpose::EstablishAuthority => "authoritative",
            _ => match audience.communication_style() {
                CommunicationStyle::WarmPersonal => "friendly",
                CommunicationStyle::DirectFactual => "professional",
                _ => "balanced",
            },
        }
    }

    pub fn formality(audience: &DynamicAudience) -> &'static str {
        if audience.demographics.role == "executive"
            || audience.experience_level() == ExperienceLevel::Expert
        {
            "formal"
        } else if audience.communication_style() == CommunicationStyle::CasualFriendly {
            "casual"
        } else {
            "semi-formal"
        }
    }
}
