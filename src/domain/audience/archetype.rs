//! Static audience archetypes and their contextualized instances.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AudienceId, CommunicationStyle, DecisionStyle, ExperienceLevel, TechComfort, TimeConstraint,
};

/// Read-only persona template registered under a purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceArchetype {
    pub id: String,
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub motivations: Vec<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
    pub communication_style: CommunicationStyle,
    pub decision_style: DecisionStyle,
    pub role: String,
    pub experience_level: ExperienceLevel,
    pub time_constraint: TimeConstraint,
    pub tech_comfort: TechComfort,
    /// Flavor sentences appended to the contextual description.
    #[serde(default)]
    pub remarks: Vec<String>,
}

/// What drives the audience and how it prefers to be addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psychographics {
    pub motivations: Vec<String>,
    pub pain_points: Vec<String>,
    pub communication_style: CommunicationStyle,
    pub decision_style: DecisionStyle,
}

/// Situational traits recomputed from the request context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub role: String,
    pub experience_level: ExperienceLevel,
    pub time_constraint: TimeConstraint,
    pub tech_comfort: TechComfort,
}

/// Signals derived purely from `(context, purpose)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveContext {
    pub current_challenges: Vec<String>,
    pub success_triggers: Vec<String>,
    pub stress_factors: Vec<String>,
    pub confidence_builders: Vec<String>,
}

/// Base archetype traits used by the diversity rule.
///
/// Contextualization overwrites level and may overwrite style, so the
/// matcher's diversity guarantee is stated on these original values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiversityKey {
    pub communication_style: CommunicationStyle,
    pub experience_level: ExperienceLevel,
}

impl DiversityKey {
    pub fn of(archetype: &AudienceArchetype) -> Self {
        Self {
            communication_style: archetype.communication_style,
            experience_level: archetype.experience_level,
        }
    }
}

/// An archetype contextualized for one request.
///
/// Owned by the path that created it and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicAudience {
    pub id: AudienceId,
    pub archetype_id: String,
    pub label: String,
    pub description: String,
    pub contextual_description: String,
    pub psychographics: Psychographics,
    pub demographics: Demographics,
    pub adaptive_context: AdaptiveContext,
    pub diversity_key: DiversityKey,
}

impl DynamicAudience {
    pub fn communication_style(&self) -> CommunicationStyle {
        self.psychographics.communication_style
    }

    pub fn decision_style(&self) -> DecisionStyle {
        self.psychographics.decision_style
    }

    pub fn time_constraint(&self) -> TimeConstraint {
        self.demographics.time_constraint
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.demographics.experience_level
    }

    pub fn has_pain_point(&self, name: &str) -> bool {
        self.psychographics.pain_points.iter().any(|p| p == name)
    }

    pub fn has_motivation(&self, name: &str) -> bool {
        self.psychographics.motivations.iter().any(|m| m == name)
    }
}
