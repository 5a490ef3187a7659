//! Static per-purpose base strategies and their audience rewrites.

use serde::{Deserialize, Serialize};

use crate::domain::audience::DynamicAudience;
use crate::domain::foundation::{CommunicationStyle, Purpose};

/// Pain point to key-element rewrites: `(pain points, from, to)`.
const KEY_ELEMENT_REWRITES: &[(&[&str], &str, &str)] = &[
    (
        &["time_constraints", "time_pressure"],
        "logical_progression",
        "streamlined_progression",
    ),
    (&["information_overload"], "practical_examples", "focused_examples"),
    (&["complex_processes"], "implementation_plan", "simple_action_plan"),
];

/// Starting point for every path strategy of one purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStrategy {
    pub name: String,
    pub description: String,
    pub approach: String,
    pub key_elements: Vec<String>,
}

impl BaseStrategy {
    /// Returns the static strategy registered for a purpose.
    pub fn for_purpose(purpose: Purpose) -> Self {
        let (name, description, approach, elements): (&str, &str, &str, [&str; 4]) = match purpose
        {
            Purpose::InformEducate => (
                "Educational Framework",
                "Structure information for optimal learning and retention",
                "structured_learning",
                ["clear_objectives", "logical_progression", "practical_examples", "reinforcement"],
            ),
            Purpose::PersuadeConvince => (
                "Persuasion Framework",
                "Build compelling arguments with evidence and emotional appeal",
                "evidence_based_persuasion",
                ["credible_evidence", "logical_structure", "emotional_connection", "clear_benefits"],
            ),
            Purpose::BuildRelationships => (
                "Relationship Building Framework",
                "Foster trust and mutual understanding",
                "trust_building",
                ["authentic_connection", "mutual_value", "consistent_follow_through", "shared_goals"],
            ),
            Purpose::SolveProblems => (
                "Problem-Solving Framework",
                "Systematic approach to identifying and resolving issues",
                "systematic_resolution",
                ["problem_definition", "root_cause_analysis", "solution_options", "implementation_plan"],
            ),
            Purpose::RequestSupport => (
                "Support Request Framework",
                "Effectively communicate needs and build cooperation",
                "collaborative_request",
                ["clear_need", "mutual_benefit", "respectful_approach", "specific_ask"],
            ),
            Purpose::InspireMotivate => (
                "Inspiration Framework",
                "Energize and motivate through vision and purpose",
                "vision_driven",
                ["compelling_vision", "emotional_connection", "personal_relevance", "actionable_steps"],
            ),
            Purpose::EstablishAuthority => (
                "Authority Building Framework",
                "Demonstrate expertise and build credibility",
                "credibility_building",
                ["expertise_demonstration", "evidence_backing", "consistent_results", "thought_leadership"],
            ),
            Purpose::CreateEngagement => (
                "Engagement Framework",
                "Foster active participation and sustained interest",
                "interactive_engagement",
                ["interactive_elements", "value_creation", "community_building", "sustained_interest"],
            ),
        };

        Self {
            name: name.to_string(),
            description: description.to_string(),
            approach: approach.to_string(),
            key_elements: elements.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Rewrites the approach tag and key elements for one audience.
    ///
    /// # Algorithm
    /// - direct_factual audiences get `direct_factual_approach`, warm_personal
    ///   audiences get `relationship_focused_approach`
    /// - each key element is replaced when the audience carries a pain point
    ///   listed for that element
    pub fn adapted_for(&self, audience: &DynamicAudience) -> Self {
        let approach = match audience.communication_style() {
            CommunicationStyle::DirectFactual => "direct_factual_approach".to_string(),
            CommunicationStyle::WarmPersonal => "relationship_focused_approach".to_string(),
            _ => self.approach.clone(),
        };

        let key_elements = self
            .key_elements
            .iter()
            .map(|element| rewrite_element(element, audience))
            .collect();

        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            approach,
            key_elements,
        }
    }
}

fn rewrite_element(element: &str, audience: &DynamicAudience) -> String {
    KEY_ELEMENT_REWRITES
        .iter()
        .find(|(pains, from, _)| {
            *from == element && pains.iter().any(|p| audience.has_pain_point(p))
        })
        .map(|(_, _, to)| to.to_string())
        .unwrap_or_else(|| element.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, Contextualizer};
    use crate::domain::context::UserContext;

    fn audience(purpose: Purpose, id: &str, ctx: &UserContext) -> DynamicAudience {
        let archetype = AudienceCatalog::builtin()
            .archetypes_for(purpose)
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .unwrap();
        Contextualizer::contextualize(archetype, purpose, ctx)
    }

    #[test]
    fn every_purpose_has_four_key_elements() {
        for purpose in Purpose::all() {
            let base = BaseStrategy::for_purpose(*purpose);
            assert_eq!(base.key_elements.len(), 4);
            assert!(!base.name.is_empty());
        }
    }

    #[test]
    fn direct_audience_switches_approach() {
        let ctx = UserContext::default().with_communication_style(CommunicationStyle::DirectFactual);
        let a = audience(Purpose::InformEducate, "busy_professional", &ctx);
        let adapted = BaseStrategy::for_purpose(Purpose::InformEducate).adapted_for(&a);
        assert_eq!(adapted.approach, "direct_factual_approach");
    }

    #[test]
    fn time_pressure_streamlines_progression() {
        // time < 15 adds the time_pressure pain point
        let ctx = UserContext::default().with_time_available(12);
        let a = audience(Purpose::InformEducate, "busy_professional", &ctx);
        assert!(a.has_pain_point("time_pressure"));

        let adapted = BaseStrategy::for_purpose(Purpose::InformEducate).adapted_for(&a);
        assert!(adapted.key_elements.contains(&"streamlined_progression".to_string()));
        assert!(!adapted.key_elements.contains(&"logical_progression".to_string()));
    }

    #[test]
    fn untouched_elements_keep_their_order() {
        let ctx = UserContext::default().with_time_available(40);
        let a = audience(Purpose::PersuadeConvince, "results_oriented", &ctx);
        let base = BaseStrategy::for_purpose(Purpose::PersuadeConvince);
        assert_eq!(base.adapted_for(&a).key_elements, base.key_elements);
    }
}
