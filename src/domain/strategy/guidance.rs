//! Step-by-step guidance, hints and checkpoints.

use serde::{Deserialize, Serialize};

use crate::domain::audience::DynamicAudience;
use crate::domain::context::UserContext;
use crate::domain::foundation::{Difficulty, ExperienceLevel, Purpose};

const BASE_STEP_MINUTES: f64 = 5.0;

/// `(title, description, required, critical)`. Critical steps stay required
/// when the user has under ten minutes.
type StepSpec = (&'static str, &'static str, bool, bool);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub adaptive_description: String,
    pub estimated_minutes: u32,
    pub difficulty: Difficulty,
    pub required: bool,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintTrigger {
    TimeSpent,
    ConfidenceLow,
    UserRequest,
    CompletionStalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintUrgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintTiming {
    Immediate,
    Contextual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveHint {
    pub trigger: HintTrigger,
    pub message: String,
    pub urgency: HintUrgency,
    pub timing: HintTiming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    pub description: String,
    pub criteria: Vec<String>,
}

/// Guidance split into preparation, process and review thirds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedGuidance {
    pub preparation: Vec<GuidanceStep>,
    pub process: Vec<GuidanceStep>,
    pub review: Vec<GuidanceStep>,
    pub hints: Vec<AdaptiveHint>,
    pub checkpoints: Vec<Checkpoint>,
    pub support_resources: Vec<String>,
}

impl PersonalizedGuidance {
    pub fn steps(&self) -> impl Iterator<Item = &GuidanceStep> {
        self.preparation.iter().chain(&self.process).chain(&self.review)
    }

    pub fn total_minutes(&self) -> u32 {
        self.steps().map(|s| s.estimated_minutes).sum()
    }
}

pub struct GuidanceBuilder;

impl GuidanceBuilder {
    /// Builds the guidance for a purpose.
    ///
    /// # Algorithm
    /// Steps `[0, n/3)` are preparation, `[n/3, 2n/3)` process and the rest
    /// review, with integer division.
    pub fn build(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> PersonalizedGuidance {
        let steps: Vec<GuidanceStep> = base_steps(purpose)
            .iter()
            .enumerate()
            .map(|(i, spec)| Self::step(i, spec, audience, ctx))
            .collect();

        let n = steps.len();
        let (first, second) = (n / 3, 2 * n / 3);
        let mut preparation = steps;
        let mut process = preparation.split_off(first);
        let review = process.split_off(second - first);

        PersonalizedGuidance {
            preparation,
            process,
            review,
            hints: Self::hints(purpose, ctx),
            checkpoints: Self::checkpoints(purpose, ctx),
            support_resources: Self::support_resources(audience, ctx),
        }
    }

    fn step(index: usize, spec: &StepSpec, audience: &DynamicAudience, ctx: &UserContext) -> GuidanceStep {
        let (title, description, required, critical) = *spec;

        let adaptive_description = if ctx.time_available < 15 {
            format!("{} (streamlined for efficiency)", description)
        } else if ctx.confidence_level < 4 {
            format!("{} (with extra support and examples)", description)
        } else {
            description.to_string()
        };

        let mut tips = Vec::new();
        if ctx.time_available < 15 {
            tips.push("Focus on the essential elements".to_string());
        }
        if ctx.confidence_level < 5 {
            tips.push("Take it step by step, you've got this".to_string());
        }

        GuidanceStep {
            id: format!("step_{}", index + 1),
            title: title.to_string(),
            description: description.to_string(),
            adaptive_description,
            estimated_minutes: Self::step_minutes(audience, ctx),
            difficulty: Self::step_difficulty(audience, ctx),
            required: if ctx.time_available < 10 { critical } else { required },
            tips,
        }
    }

    /// `round(5 × 1.5 if beginner × 1.2 if stress > 7 × 0.7 if time < 15)`.
    pub fn step_minutes(audience: &DynamicAudience, ctx: &UserContext) -> u32 {
        let mut multiplier = 1.0;
        if audience.experience_level() == ExperienceLevel::Beginner {
            multiplier *= 1.5;
        }
        if ctx.stress_level > 7 {
            multiplier *= 1.2;
        }
        if ctx.time_available < 15 {
            multiplier *= 0.7;
        }
        (BASE_STEP_MINUTES * multiplier).round() as u32
    }

    pub fn step_difficulty(audience: &DynamicAudience, ctx: &UserContext) -> Difficulty {
        if audience.experience_level() == ExperienceLevel::Beginner || ctx.confidence_level < 4 {
            Difficulty::Easy
        } else if ctx.stress_level > 7 || ctx.time_available < 10 {
            Difficulty::Medium
        } else if audience.experience_level() == ExperienceLevel::Expert {
            Difficulty::Expert
        } else {
            Difficulty::Hard
        }
    }

    pub fn hints(purpose: Purpose, ctx: &UserContext) -> Vec<AdaptiveHint> {
        let mut hints = Vec::new();
        if ctx.time_available < 15 {
            hints.push(hint(
                HintTrigger::TimeSpent,
                "Let's focus on what matters most right now, we can always add more later",
                HintUrgency::High,
                HintTiming::Immediate,
            ));
        }
        if ctx.confidence_level < 5 {
            hints.push(hint(
                HintTrigger::ConfidenceLow,
                "You've handled challenges before, and you can handle this too",
                HintUrgency::Medium,
                HintTiming::Contextual,
            ));
        }
        match purpose {
            Purpose::PersuadeConvince => hints.push(hint(
                HintTrigger::UserRequest,
                "Address concerns directly and with empathy",
                HintUrgency::High,
                HintTiming::Contextual,
            )),
            Purpose::BuildRelationships => hints.push(hint(
                HintTrigger::UserRequest,
                "Find authentic common ground",
                HintUrgency::Medium,
                HintTiming::Contextual,
            )),
            Purpose::SolveProblems => hints.push(hint(
                HintTrigger::CompletionStalled,
                "Break down complex problems into smaller parts",
                HintUrgency::High,
                HintTiming::Immediate,
            )),
            Purpose::InspireMotivate => hints.push(hint(
                HintTrigger::UserRequest,
                "Your enthusiasm is contagious, let it show",
                HintUrgency::Medium,
                HintTiming::Contextual,
            )),
            _ => {}
        }
        hints
    }

    pub fn checkpoints(purpose: Purpose, ctx: &UserContext) -> Vec<Checkpoint> {
        let mut checkpoints = vec![checkpoint(
            "Clarity Check",
            "Is your message clear?",
            &["message_clarity", "no_ambiguity"],
        )];
        if ctx.confidence_level < 5 {
            checkpoints.push(checkpoint(
                "Confidence Check",
                "How confident do you feel?",
                &["self_assurance", "preparation_complete"],
            ));
        }
        match purpose {
            Purpose::PersuadeConvince => checkpoints.push(checkpoint(
                "Evidence Quality",
                "Is your evidence compelling?",
                &["credible_sources", "relevant_data"],
            )),
            Purpose::BuildRelationships => checkpoints.push(checkpoint(
                "Authenticity Check",
                "Are you being genuine?",
                &["authentic_interest", "genuine_care"],
            )),
            Purpose::SolveProblems => checkpoints.push(checkpoint(
                "Solution Viability",
                "Is your solution practical?",
                &["feasibility", "resource_availability"],
            )),
            _ => {}
        }
        checkpoints
    }

    pub fn support_resources(audience: &DynamicAudience, ctx: &UserContext) -> Vec<String> {
        let mut resources: Vec<&str> = Vec::new();
        if ctx.confidence_level < 5 {
            resources.extend(["confidence_building_exercises", "success_stories"]);
        }
        if ctx.time_available < 15 {
            resources.extend(["quick_reference_guide", "templates"]);
        }
        if audience.experience_level() == ExperienceLevel::Beginner {
            resources.extend(["beginner_guide", "glossary", "examples"]);
        }
        resources.into_iter().map(String::from).collect()
    }
}

fn hint(trigger: HintTrigger, message: &str, urgency: HintUrgency, timing: HintTiming) -> AdaptiveHint {
    AdaptiveHint {
        trigger,
        message: message.to_string(),
        urgency,
        timing,
    }
}

fn checkpoint(name: &str, description: &str, criteria: &[&str]) -> Checkpoint {
    Checkpoint {
        name: name.to_string(),
        description: description.to_string(),
        criteria: criteria.iter().map(|c| c.to_string()).collect(),
    }
}

fn base_steps(purpose: Purpose) -> &'static [StepSpec] {
    match purpose {
        Purpose::InformEducate => &[
            ("Set Learning Objectives", "Clarify what you'd love to share", true, true),
            ("Structure Information", "Organize this in a way that flows naturally", true, false),
            ("Provide Examples", "Stories and examples help this come alive", false, false),
            ("Check Understanding", "Make sure this resonates with them", true, false),
        ],
        Purpose::PersuadeConvince => &[
            ("Establish Credibility", "Help them see your authentic expertise", true, false),
            ("Present Problem", "Help them understand what's at stake", true, true),
            ("Offer Solution", "Share your thoughtful approach", true, true),
            ("Provide Evidence", "Show them why this path makes sense", true, false),
            ("Address Objections", "Address their concerns with care", false, false),
        ],
        Purpose::BuildRelationships => &[
            ("Find Common Ground", "Discover what you both care about", true, true),
            ("Show Genuine Interest", "Let your authentic care shine through", true, false),
            ("Offer Value", "Share something meaningful with them", true, false),
            ("Follow Through", "Keep nurturing this relationship", true, false),
        ],
        Purpose::SolveProblems => &[
            ("Define Problem", "Help everyone understand what we're facing", true, true),
            ("Analyze Causes", "Explore what's really going on", true, false),
            ("Generate Solutions", "Brainstorm possibilities together", true, false),
            ("Evaluate Options", "Consider each path thoughtfully", true, false),
            ("Create Action Plan", "Map out the next steps together", true, true),
        ],
        Purpose::RequestSupport => &[
            ("Provide Context", "Help them understand your world", true, false),
            ("State Specific Need", "Share exactly how they can help", true, true),
            ("Show Appreciation", "Let them feel how much this means", true, false),
            ("Offer Reciprocity", "Show how you'd love to give back", false, false),
        ],
        Purpose::InspireMotivate => &[
            ("Paint Vision", "Help them see the possibilities", true, true),
            ("Connect Emotionally", "Speak to what moves them", true, false),
            ("Show Possibility", "Show them it's absolutely possible", true, false),
            ("Empower Action", "Help them feel ready to take the leap", true, true),
        ],
        Purpose::EstablishAuthority => &[
            ("Demonstrate Expertise", "Show knowledge", true, true),
            ("Share Insights", "Provide unique value", true, false),
            ("Build Credibility", "Establish trust", true, false),
            ("Lead Thought", "Guide thinking", true, false),
        ],
        Purpose::CreateEngagement => &[
            ("Capture Attention", "Hook the audience", true, true),
            ("Provide Value", "Offer benefits", true, false),
            ("Encourage Participation", "Invite interaction", true, true),
            ("Build Community", "Foster connection", false, false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, Contextualizer};

    fn audience(purpose: Purpose, ctx: &UserContext) -> DynamicAudience {
        let archetype = &AudienceCatalog::builtin().archetypes_for(purpose).unwrap()[0];
        Contextualizer::contextualize(archetype, purpose, ctx)
    }

    fn build(purpose: Purpose, ctx: &UserContext) -> PersonalizedGuidance {
        GuidanceBuilder::build(purpose, &audience(purpose, ctx), ctx)
    }

    #[test]
    fn five_steps_split_one_two_two() {
        let guidance = build(Purpose::SolveProblems, &UserContext::default());
        assert_eq!(guidance.preparation.len(), 1);
        assert_eq!(guidance.process.len(), 2);
        assert_eq!(guidance.review.len(), 2);
        assert_eq!(guidance.preparation[0].title, "Define Problem");
        assert_eq!(guidance.review[1].id, "step_5");
    }

    #[test]
    fn four_steps_split_one_one_two() {
        let guidance = build(Purpose::InformEducate, &UserContext::default());
        assert_eq!(
            (guidance.preparation.len(), guidance.process.len(), guidance.review.len()),
            (1, 1, 2)
        );
    }

    #[test]
    fn step_minutes_scale_with_context() {
        let beginner = UserContext::default().with_skill_level(ExperienceLevel::Beginner);
        let a = audience(Purpose::SolveProblems, &beginner);
        // 5 × 1.5 = 7.5 → 8
        assert_eq!(GuidanceBuilder::step_minutes(&a, &beginner), 8);

        let rushed = beginner.clone().with_stress_level(9).with_time_available(8);
        let b = audience(Purpose::SolveProblems, &rushed);
        // 5 × 1.5 × 1.2 × 0.7 = 6.3 → 6
        assert_eq!(GuidanceBuilder::step_minutes(&b, &rushed), 6);

        let neutral = UserContext::default();
        assert_eq!(GuidanceBuilder::step_minutes(&audience(Purpose::SolveProblems, &neutral), &neutral), 5);
    }

    #[test]
    fn step_difficulty_rules() {
        let expert = UserContext::default().with_skill_level(ExperienceLevel::Expert);
        assert_eq!(
            GuidanceBuilder::step_difficulty(&audience(Purpose::InformEducate, &expert), &expert),
            Difficulty::Expert
        );
        let unsure = UserContext::default().with_confidence_level(2);
        assert_eq!(
            GuidanceBuilder::step_difficulty(&audience(Purpose::InformEducate, &unsure), &unsure),
            Difficulty::Easy
        );
        let stressed = UserContext::default().with_stress_level(9);
        assert_eq!(
            GuidanceBuilder::step_difficulty(&audience(Purpose::InformEducate, &stressed), &stressed),
            Difficulty::Medium
        );
    }

    #[test]
    fn under_ten_minutes_only_critical_steps_are_required() {
        let ctx = UserContext::default().with_time_available(8);
        let guidance = build(Purpose::SolveProblems, &ctx);
        let required: Vec<&str> = guidance
            .steps()
            .filter(|s| s.required)
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(required, vec!["Define Problem", "Create Action Plan"]);
        assert!(guidance.steps().all(|s| s.adaptive_description.ends_with("(streamlined for efficiency)")));
    }

    #[test]
    fn hints_and_checkpoints_follow_context() {
        let ctx = UserContext::default().with_time_available(10).with_confidence_level(3);
        let guidance = build(Purpose::SolveProblems, &ctx);
        let triggers: Vec<HintTrigger> = guidance.hints.iter().map(|h| h.trigger).collect();
        assert_eq!(
            triggers,
            vec![HintTrigger::TimeSpent, HintTrigger::ConfidenceLow, HintTrigger::CompletionStalled]
        );
        let names: Vec<&str> = guidance.checkpoints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Clarity Check", "Confidence Check", "Solution Viability"]);
        assert!(guidance.support_resources.contains(&"quick_reference_guide".to_string()));
    }

    #[test]
    fn calm_educate_has_only_clarity_check() {
        let guidance = build(Purpose::InformEducate, &UserContext::default().with_confidence_level(7));
        assert_eq!(guidance.checkpoints.len(), 1);
        assert!(guidance.hints.is_empty());
    }
}
