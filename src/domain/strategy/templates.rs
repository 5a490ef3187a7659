//! Adaptive templates: base templates annotated per field for one request.

use serde::{Deserialize, Serialize};

use super::{BaseTemplate, TemplateLibrary};
use crate::domain::audience::DynamicAudience;
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::{
    CommunicationStyle, DecisionStyle, Difficulty, ExperienceLevel, Purpose, TemplateId,
    TimeConstraint,
};

const ALWAYS_REQUIRED: [&str; 3] = ["problem_statement", "specific_need", "call_to_action"];
const TIME_ESSENTIAL: [&str; 3] = ["main_point", "action", "key_benefit"];
const EVIDENCE_FIELDS: [&str; 3] = ["evidence", "analysis", "data"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDepth {
    Minimal,
    Standard,
    Comprehensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStyle {
    Conversational,
    Concise,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalizationLevel {
    Basic,
    Moderate,
    Advanced,
    Maximum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveField {
    pub name: String,
    pub required: bool,
    pub depth: FieldDepth,
    pub style: FieldStyle,
}

/// A base template cloned and annotated for one audience and context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveTemplate {
    pub id: TemplateId,
    pub base_id: String,
    pub name: String,
    pub fields: Vec<AdaptiveField>,
    pub personalization: PersonalizationLevel,
    /// Constraint violations this template was accepted with.
    #[serde(default)]
    pub conflicts: usize,
}

impl AdaptiveTemplate {
    pub fn field(&self, name: &str) -> Option<&AdaptiveField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builds adaptive templates from a library.
pub struct TemplateAdapter;

impl TemplateAdapter {
    /// One adaptive template per base template that satisfies the constraints.
    ///
    /// # Algorithm
    /// 1. Take the purpose's base templates (the general template when none)
    /// 2. Count conflicts: excluded features carried plus required features missing
    /// 3. Keep every conflict-free template
    /// 4. If none survive, keep the one with the fewest conflicts
    ///
    /// # Edge Cases
    /// - Never returns an empty list
    /// - Ties in the fallback keep library order
    pub fn adapt(
        library: &TemplateLibrary,
        purpose: Purpose,
        audience: &DynamicAudience,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> Vec<AdaptiveTemplate> {
        let registered = library.templates_for(purpose);
        let general = [BaseTemplate::general()];
        let candidates = if registered.is_empty() { &general[..] } else { registered };

        let scored: Vec<(&BaseTemplate, usize)> = candidates
            .iter()
            .map(|t| (t, constraints.map(|c| Self::conflicts(t, c)).unwrap_or(0)))
            .collect();

        let mut chosen: Vec<(&BaseTemplate, usize)> =
            scored.iter().copied().filter(|(_, n)| *n == 0).collect();

        if chosen.is_empty() {
            if let Some(best) = scored.iter().copied().min_by_key(|(_, n)| *n) {
                tracing::warn!(
                    purpose = purpose.as_str(),
                    template = best.0.id.as_str(),
                    conflicts = best.1,
                    "constraints exclude every template, using least restrictive"
                );
                chosen.push(best);
            }
        }

        let personalization = Self::personalization_level(ctx, constraints);
        chosen
            .into_iter()
            .map(|(template, conflicts)| AdaptiveTemplate {
                id: TemplateId::new(),
                base_id: template.id.clone(),
                name: template.name.clone(),
                fields: template
                    .structure
                    .iter()
                    .map(|field| Self::field(field, audience, ctx, constraints))
                    .collect(),
                personalization,
                conflicts,
            })
            .collect()
    }

    pub fn conflicts(template: &BaseTemplate, constraints: &PathConstraints) -> usize {
        let excluded = constraints
            .excluded_features
            .iter()
            .filter(|f| template.carries(f))
            .count();
        let missing = constraints
            .required_features
            .iter()
            .filter(|f| !template.carries(f))
            .count();
        excluded + missing
    }

    pub fn field(
        name: &str,
        audience: &DynamicAudience,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> AdaptiveField {
        let demanded = constraints
            .map(|c| c.required_features.iter().any(|f| f == name))
            .unwrap_or(false);

        let required = demanded
            || ALWAYS_REQUIRED.contains(&name)
            || ctx.time_available >= 10
            || TIME_ESSENTIAL.contains(&name);

        let depth = if ctx.time_available < 15
            || audience.time_constraint() == TimeConstraint::VeryLimited
        {
            FieldDepth::Minimal
        } else if audience.decision_style() == DecisionStyle::ThoroughAnalytical
            && EVIDENCE_FIELDS.contains(&name)
        {
            FieldDepth::Comprehensive
        } else {
            FieldDepth::Standard
        };

        let style = match audience.communication_style() {
            CommunicationStyle::WarmPersonal => FieldStyle::Conversational,
            CommunicationStyle::DirectFactual => FieldStyle::Concise,
            _ => FieldStyle::Balanced,
        };

        AdaptiveField {
            name: name.to_string(),
            required,
            depth,
            style,
        }
    }

    /// Easy ceiling or beginner → basic; more than three learning
    /// preferences → advanced; more than five performance records →
    /// maximum; otherwise moderate.
    pub fn personalization_level(
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> PersonalizationLevel {
        let easy_ceiling = constraints
            .and_then(|c| c.difficulty_ceiling)
            .map(|d| d == Difficulty::Easy)
            .unwrap_or(false);

        if easy_ceiling || ctx.skill_level == ExperienceLevel::Beginner {
            PersonalizationLevel::Basic
        } else if ctx.learning_preferences.len() > 3 {
            PersonalizationLevel::Advanced
        } else if ctx.past_performance.len() > 5 {
            PersonalizationLevel::Maximum
        } else {
            PersonalizationLevel::Moderate
        }
    }
}
