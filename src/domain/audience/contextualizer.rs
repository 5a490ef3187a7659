//! Turns a static archetype into a per-request `DynamicAudience`.

use sha2::{Digest, Sha256};

use super::{
    AdaptiveContext, AudienceArchetype, Demographics, DiversityKey, DynamicAudience,
    Psychographics,
};
use crate::domain::context::UserContext;
use crate::domain::foundation::{
    AudienceId, CommunicationStyle, DecisionStyle, Purpose, TechComfort, TimeConstraint,
};

const GENERIC_REMARKS: [&str; 3] = [
    "They have their own unique perspective and needs.",
    "Understanding their specific situation is key.",
    "They appreciate when you take time to truly listen.",
];

/// Contextualization functions. Pure; no randomness.
pub struct Contextualizer;

impl Contextualizer {
    /// Builds the dynamic audience for one request.
    pub fn contextualize(
        archetype: &AudienceArchetype,
        purpose: Purpose,
        ctx: &UserContext,
    ) -> DynamicAudience {
        DynamicAudience {
            id: AudienceId::new(),
            archetype_id: archetype.id.clone(),
            label: archetype.label.clone(),
            description: archetype.description.clone(),
            contextual_description: Self::contextual_description(archetype, purpose, ctx),
            psychographics: Psychographics {
                motivations: Self::adapt_motivations(&archetype.motivations, ctx),
                pain_points: Self::adapt_pain_points(&archetype.pain_points, ctx),
                communication_style: Self::communication_style(archetype.communication_style, ctx),
                decision_style: Self::decision_style(archetype.decision_style, ctx),
            },
            demographics: Demographics {
                role: archetype.role.clone(),
                experience_level: ctx.skill_level,
                time_constraint: TimeConstraint::nearest(ctx.time_available),
                tech_comfort: Self::tech_comfort(ctx),
            },
            adaptive_context: Self::adaptive_context(ctx, purpose),
            diversity_key: DiversityKey::of(archetype),
        }
    }

    /// Unions context-driven motivations, drops contradictions, and moves
    /// goal-aligned entries to the front.
    ///
    /// # Edge Cases
    /// - Filtering that empties the list falls back to the archetype's list
    pub fn adapt_motivations(base: &[String], ctx: &UserContext) -> Vec<String> {
        let mut out: Vec<String> = base.to_vec();

        if ctx.stress_level > 7 {
            extend(&mut out, &["stress_reduction", "quick_wins", "immediate_relief"]);
        }
        if ctx.confidence_level < 4 {
            extend(&mut out, &["confidence_building", "small_steps", "validation_seeking"]);
        }
        if ctx.time_available < 15 {
            extend(&mut out, &["time_efficiency", "quick_results", "immediate_impact"]);
        }

        if ctx.time_available < 10 {
            const SLOW: [&str; 3] = [
                "thorough_understanding",
                "comprehensive_knowledge",
                "deep_analysis",
            ];
            out.retain(|m| !SLOW.contains(&m.as_str()));
        }
        if ctx.preferred_communication_style == Some(CommunicationStyle::AnalyticalDetailed) {
            out.retain(|m| m != "quick_overview" && m != "surface_level");
        }

        if !ctx.active_goals.is_empty() {
            let (aligned, rest): (Vec<String>, Vec<String>) =
                out.into_iter().partition(|m| aligns_with_goals(m, &ctx.active_goals));
            out = aligned.into_iter().chain(rest).collect();
        }

        dedupe(&mut out);
        if out.is_empty() {
            return base.to_vec();
        }
        out
    }

    /// Unions context-driven pain points.
    pub fn adapt_pain_points(base: &[String], ctx: &UserContext) -> Vec<String> {
        let mut out: Vec<String> = base.to_vec();

        if ctx.stress_level > 7 {
            extend(
                &mut out,
                &["overwhelming_complexity", "decision_fatigue", "cognitive_overload"],
            );
        }
        if ctx.time_available < 15 {
            extend(
                &mut out,
                &["time_pressure", "lengthy_processes", "inefficient_workflows"],
            );
        }
        if ctx.confidence_level < 4 {
            extend(&mut out, &["fear_of_failure", "imposter_syndrome", "uncertainty"]);
        }

        dedupe(&mut out);
        if out.is_empty() {
            return base.to_vec();
        }
        out
    }

    /// An explicit preference wins; otherwise pressure pushes toward plainer styles.
    pub fn communication_style(base: CommunicationStyle, ctx: &UserContext) -> CommunicationStyle {
        if let Some(preferred) = ctx.preferred_communication_style {
            return preferred;
        }
        if ctx.stress_level > 7 {
            CommunicationStyle::DirectFactual
        } else if ctx.confidence_level < 4 {
            CommunicationStyle::WarmPersonal
        } else if ctx.time_available < 15 {
            CommunicationStyle::DirectFactual
        } else {
            base
        }
    }

    pub fn decision_style(base: DecisionStyle, ctx: &UserContext) -> DecisionStyle {
        if ctx.time_available < 10 && ctx.stress_level > 6 {
            DecisionStyle::QuickDecisive
        } else if ctx.stress_level < 4 && ctx.time_available > 30 {
            DecisionStyle::ThoroughAnalytical
        } else if ctx.confidence_level < 4 {
            DecisionStyle::CollaborativeConsensus
        } else {
            base
        }
    }

    /// Derived from skill, bumped by a strong tech or digital learning preference.
    pub fn tech_comfort(ctx: &UserContext) -> TechComfort {
        let base = TechComfort::for_level(ctx.skill_level);
        let tech_leaning = ctx.learning_preferences.iter().any(|p| {
            let aspect = p.aspect.to_ascii_lowercase();
            p.is_strong() && (aspect.contains("tech") || aspect.contains("digital"))
        });
        if tech_leaning {
            base.bumped()
        } else {
            base
        }
    }

    /// Challenges, triggers, stressors and builders for this context and purpose.
    pub fn adaptive_context(ctx: &UserContext, purpose: Purpose) -> AdaptiveContext {
        let mut challenges = Vec::new();
        if ctx.stress_level > 7 {
            extend(
                &mut challenges,
                &["managing_stress", "maintaining_focus", "decision_paralysis"],
            );
        }
        if ctx.time_available < 15 {
            extend(
                &mut challenges,
                &["time_management", "prioritization", "efficiency_pressure"],
            );
        }
        if ctx.confidence_level < 4 {
            extend(
                &mut challenges,
                &["self_doubt", "fear_of_mistakes", "seeking_validation"],
            );
        }
        extend(&mut challenges, purpose_challenges(purpose));

        let mut triggers = Vec::new();
        if ctx.confidence_level > 7 {
            extend(
                &mut triggers,
                &["self_assurance", "past_successes", "expertise_recognition"],
            );
        }
        if ctx.time_available > 30 {
            extend(
                &mut triggers,
                &["thorough_preparation", "multiple_iterations", "comprehensive_approach"],
            );
        }
        if ctx.has_success_above(0.8) {
            extend(
                &mut triggers,
                &["proven_methods", "familiar_approaches", "confidence_from_experience"],
            );
        }

        let mut stressors = Vec::new();
        if ctx.stress_level > 5 {
            extend(
                &mut stressors,
                &["existing_pressure", "accumulated_stress", "mental_fatigue"],
            );
        }
        if ctx.time_available < 20 {
            extend(
                &mut stressors,
                &["time_pressure", "deadline_stress", "rush_anxiety"],
            );
        }
        extend(&mut stressors, purpose_stressors(purpose));

        let mut builders = Vec::new();
        extend(
            &mut builders,
            &["clear_structure", "step_by_step_guidance", "progress_tracking"],
        );
        if ctx.confidence_level < 5 {
            extend(
                &mut builders,
                &["validation_checkpoints", "success_examples", "fallback_options"],
            );
        }
        if ctx.has_success_above(0.7) {
            extend(
                &mut builders,
                &["past_success_reminder", "proven_capability", "experience_leverage"],
            );
        }
        for pref in ctx.learning_preferences.iter().filter(|p| p.is_strong()) {
            builders.push(format!("{}_alignment", pref.aspect));
        }

        dedupe(&mut challenges);
        dedupe(&mut triggers);
        dedupe(&mut stressors);
        dedupe(&mut builders);

        AdaptiveContext {
            current_challenges: challenges,
            success_triggers: triggers,
            stress_factors: stressors,
            confidence_builders: builders,
        }
    }

    /// `"{description}, especially when it comes to {purpose context}. {remark}"`.
    pub fn contextual_description(
        archetype: &AudienceArchetype,
        purpose: Purpose,
        ctx: &UserContext,
    ) -> String {
        let base = archetype.description.trim_end_matches('.');
        format!(
            "{}, especially when it comes to {}. {}",
            base,
            purpose.context_phrase(),
            Self::remark(archetype, purpose, ctx)
        )
    }

    /// Picks a remark seeded by `(archetype, purpose, user)`.
    pub fn remark<'a>(
        archetype: &'a AudienceArchetype,
        purpose: Purpose,
        ctx: &UserContext,
    ) -> &'a str {
        let mut hasher = Sha256::new();
        hasher.update(archetype.id.as_bytes());
        hasher.update([0u8]);
        hasher.update(purpose.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(ctx.user_id.as_str().as_bytes());
        let digest = hasher.finalize();

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest[..8]);
        let seed = u64::from_be_bytes(seed);

        if archetype.remarks.is_empty() {
            GENERIC_REMARKS[(seed % GENERIC_REMARKS.len() as u64) as usize]
        } else {
            &archetype.remarks[(seed % archetype.remarks.len() as u64) as usize]
        }
    }
}

fn purpose_challenges(purpose: Purpose) -> &'static [&'static str] {
    match purpose {
        Purpose::InformEducate => &[
            "information_retention",
            "practical_application",
            "knowledge_gaps",
        ],
        Purpose::PersuadeConvince => &[
            "resistance_handling",
            "credibility_building",
            "objection_management",
        ],
        Purpose::BuildRelationships => &[
            "trust_building",
            "authentic_connection",
            "follow_through",
        ],
        Purpose::SolveProblems => &[
            "root_cause_identification",
            "solution_evaluation",
            "implementation",
        ],
        Purpose::RequestSupport => &["clear_communication", "reciprocity_balance", "timing"],
        Purpose::InspireMotivate => &[
            "emotional_connection",
            "sustained_enthusiasm",
            "action_conversion",
        ],
        Purpose::EstablishAuthority => &[
            "expertise_demonstration",
            "thought_leadership",
            "consistency",
        ],
        Purpose::CreateEngagement => &[
            "attention_capture",
            "participation_encouragement",
            "value_delivery",
        ],
    }
}

fn purpose_stressors(purpose: Purpose) -> &'static [&'static str] {
    match purpose {
        Purpose::InformEducate => &[
            "complexity_overload",
            "retention_pressure",
            "performance_anxiety",
        ],
        Purpose::PersuadeConvince => &[
            "rejection_fear",
            "argument_pressure",
            "confrontation_stress",
        ],
        Purpose::BuildRelationships => &[
            "social_anxiety",
            "authenticity_pressure",
            "commitment_fear",
        ],
        Purpose::SolveProblems => &[
            "solution_pressure",
            "failure_fear",
            "responsibility_weight",
        ],
        Purpose::RequestSupport => &[
            "vulnerability_discomfort",
            "rejection_fear",
            "dependency_concerns",
        ],
        Purpose::InspireMotivate => &[
            "impact_pressure",
            "authenticity_stress",
            "energy_demands",
        ],
        Purpose::EstablishAuthority => &[
            "credibility_pressure",
            "expertise_questioning",
            "performance_anxiety",
        ],
        Purpose::CreateEngagement => &[
            "response_pressure",
            "creativity_stress",
            "audience_expectations",
        ],
    }
}

fn extend(list: &mut Vec<String>, items: &[&str]) {
    list.extend(items.iter().map(|s| s.to_string()));
}

/// Removes repeats, keeping first occurrences in place.
fn dedupe(list: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    list.retain(|item| seen.insert(item.clone()));
}

fn normalize_key(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

fn aligns_with_goals(motivation: &str, goals: &[String]) -> bool {
    let m = normalize_key(motivation);
    goals.iter().map(|g| normalize_key(g)).any(|g| {
        !g.is_empty() && (m.contains(&g) || g.contains(&m))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::AudienceCatalog;
    use crate::domain::context::{LearningPreference, PerformanceRecord};
    use crate::domain::foundation::{ExperienceLevel, UserId};

    fn archetype(id: &str) -> AudienceArchetype {
        AudienceCatalog::builtin()
            .archetypes_for(Purpose::SolveProblems)
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .unwrap()
            .clone()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Motivations and pain points
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn high_stress_adds_relief_motivations() {
        let ctx = UserContext::default().with_stress_level(9);
        let out = Contextualizer::adapt_motivations(&strings(&["accuracy"]), &ctx);
        assert_eq!(
            out,
            strings(&["accuracy", "stress_reduction", "quick_wins", "immediate_relief"])
        );
    }

    #[test]
    fn very_short_time_drops_thorough_motivations() {
        let ctx = UserContext::default().with_time_available(8);
        let out = Contextualizer::adapt_motivations(
            &strings(&["thorough_understanding", "deep_analysis", "accuracy"]),
            &ctx,
        );
        assert!(!out.contains(&"thorough_understanding".to_string()));
        assert!(!out.contains(&"deep_analysis".to_string()));
        assert!(out.contains(&"accuracy".to_string()));
        assert!(out.contains(&"time_efficiency".to_string()));
    }

    #[test]
    fn analytical_preference_drops_surface_motivations() {
        let ctx = UserContext::default()
            .with_communication_style(CommunicationStyle::AnalyticalDetailed);
        let out = Contextualizer::adapt_motivations(
            &strings(&["quick_overview", "surface_level", "accuracy"]),
            &ctx,
        );
        assert_eq!(out, strings(&["accuracy"]));
    }

    #[test]
    fn filtering_everything_falls_back_to_archetype_list() {
        let ctx = UserContext::default()
            .with_communication_style(CommunicationStyle::AnalyticalDetailed);
        let base = strings(&["quick_overview"]);
        assert_eq!(Contextualizer::adapt_motivations(&base, &ctx), base);
    }

    #[test]
    fn goal_aligned_motivations_move_first() {
        let ctx = UserContext::default().with_goal("root cause");
        let out = Contextualizer::adapt_motivations(
            &strings(&["systematic_solutions", "root_cause_analysis"]),
            &ctx,
        );
        assert_eq!(out[0], "root_cause_analysis");
    }

    #[test]
    fn motivations_are_deduplicated() {
        let ctx = UserContext::default().with_stress_level(9).with_time_available(5);
        let out = Contextualizer::adapt_motivations(&strings(&["quick_wins"]), &ctx);
        assert_eq!(out.iter().filter(|m| *m == "quick_wins").count(), 1);
    }

    #[test]
    fn pain_points_union_context_additions() {
        let ctx = UserContext::default()
            .with_confidence_level(2)
            .with_time_available(10);
        let out = Contextualizer::adapt_pain_points(&strings(&["slow_response"]), &ctx);
        assert_eq!(out[0], "slow_response");
        assert!(out.contains(&"time_pressure".to_string()));
        assert!(out.contains(&"imposter_syndrome".to_string()));
        assert!(!out.contains(&"decision_fatigue".to_string()));
    }

    // ───────────────────────────────────────────────────────────────
    // Styles and demographics
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn preferred_style_overrides_pressure_rules() {
        let ctx = UserContext::default()
            .with_stress_level(9)
            .with_communication_style(CommunicationStyle::CasualFriendly);
        assert_eq!(
            Contextualizer::communication_style(CommunicationStyle::WarmPersonal, &ctx),
            CommunicationStyle::CasualFriendly
        );
    }

    #[test]
    fn low_confidence_warms_the_style() {
        let ctx = UserContext::default().with_confidence_level(2);
        assert_eq!(
            Contextualizer::communication_style(CommunicationStyle::AnalyticalDetailed, &ctx),
            CommunicationStyle::WarmPersonal
        );
    }

    #[test]
    fn decision_style_rules_apply_in_order() {
        let rushed = UserContext::default().with_time_available(8).with_stress_level(7);
        assert_eq!(
            Contextualizer::decision_style(DecisionStyle::DataDriven, &rushed),
            DecisionStyle::QuickDecisive
        );

        let calm = UserContext::default().with_time_available(45).with_stress_level(2);
        assert_eq!(
            Contextualizer::decision_style(DecisionStyle::QuickDecisive, &calm),
            DecisionStyle::ThoroughAnalytical
        );

        let unsure = UserContext::default().with_confidence_level(3);
        assert_eq!(
            Contextualizer::decision_style(DecisionStyle::DataDriven, &unsure),
            DecisionStyle::CollaborativeConsensus
        );

        let neutral = UserContext::default();
        assert_eq!(
            Contextualizer::decision_style(DecisionStyle::DataDriven, &neutral),
            DecisionStyle::DataDriven
        );
    }

    #[test]
    fn tech_comfort_bumps_for_strong_digital_preference() {
        let ctx = UserContext::default()
            .with_skill_level(ExperienceLevel::Beginner)
            .with_learning_preference(LearningPreference::new("digital_tools", 0.9));
        assert_eq!(Contextualizer::tech_comfort(&ctx), TechComfort::Moderate);

        let weak = UserContext::default()
            .with_skill_level(ExperienceLevel::Beginner)
            .with_learning_preference(LearningPreference::new("tech", 0.5));
        assert_eq!(Contextualizer::tech_comfort(&weak), TechComfort::Low);
    }

    #[test]
    fn contextualize_forces_level_and_recomputes_time() {
        let ctx = UserContext::default()
            .with_skill_level(ExperienceLevel::Beginner)
            .with_time_available(45);
        let audience =
            Contextualizer::contextualize(&archetype("analytical_problem_solver"), Purpose::SolveProblems, &ctx);
        assert_eq!(audience.experience_level(), ExperienceLevel::Beginner);
        assert_eq!(audience.time_constraint(), TimeConstraint::Flexible);
        assert_eq!(audience.demographics.role, "analyst");
        assert_eq!(audience.diversity_key.experience_level, ExperienceLevel::Advanced);
    }

    // ───────────────────────────────────────────────────────────────
    // Adaptive context
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn adaptive_context_always_has_purpose_entries() {
        let ctx = UserContext::default();
        let adaptive = Contextualizer::adaptive_context(&ctx, Purpose::RequestSupport);
        assert_eq!(
            adaptive.current_challenges,
            strings(&["clear_communication", "reciprocity_balance", "timing"])
        );
        assert!(adaptive.stress_factors.contains(&"vulnerability_discomfort".to_string()));
        assert_eq!(
            adaptive.confidence_builders,
            strings(&["clear_structure", "step_by_step_guidance", "progress_tracking"])
        );
        assert!(adaptive.success_triggers.is_empty());
    }

    #[test]
    fn adaptive_context_reflects_history_and_preferences() {
        let ctx = UserContext::default()
            .with_confidence_level(9)
            .with_performance(PerformanceRecord::new(0.85))
            .with_learning_preference(LearningPreference::new("visual", 0.8));
        let adaptive = Contextualizer::adaptive_context(&ctx, Purpose::InformEducate);
        assert!(adaptive.success_triggers.contains(&"self_assurance".to_string()));
        assert!(adaptive.success_triggers.contains(&"proven_methods".to_string()));
        assert!(adaptive.confidence_builders.contains(&"past_success_reminder".to_string()));
        assert!(adaptive.confidence_builders.contains(&"visual_alignment".to_string()));
    }

    // ───────────────────────────────────────────────────────────────
    // Contextual description
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn contextual_description_frames_purpose() {
        let ctx = UserContext::default();
        let arch = archetype("urgent_problem_solver");
        let text = Contextualizer::contextual_description(&arch, Purpose::SolveProblems, &ctx);
        assert!(text.contains(", especially when it comes to problem-solving and resolution. "));
        assert!(arch.remarks.iter().any(|r| text.ends_with(r.as_str())));
    }

    #[test]
    fn remark_is_reproducible_per_user() {
        let arch = archetype("creative_innovator");
        let ctx = UserContext::new(UserId::new("user-7").unwrap());
        let first = Contextualizer::remark(&arch, Purpose::SolveProblems, &ctx);
        let second = Contextualizer::remark(&arch, Purpose::SolveProblems, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn archetype_without_remarks_uses_generic_pool() {
        let mut arch = archetype("creative_innovator");
        arch.remarks.clear();
        let remark = Contextualizer::remark(&arch, Purpose::SolveProblems, &UserContext::default());
        assert!(GENERIC_REMARKS.contains(&remark));
    }
}
