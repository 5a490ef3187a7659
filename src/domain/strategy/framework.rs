//! Content framework selection: structure, flow, tone and adaptive elements.

use serde::{Deserialize, Serialize};

use super::NarrativeFramework;
use crate::domain::audience::DynamicAudience;
use crate::domain::context::UserContext;
use crate::domain::foundation::{
    CommunicationStyle, DecisionStyle, ExperienceLevel, Purpose, TimeConstraint,
};

/// How the message opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningApproach {
    Direct,
    Warm,
    Question,
    Story,
    Statistic,
    ProblemStatement,
}

/// How the body is organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFramework {
    Chronological,
    ProblemSolution,
    CompareContrast,
    CauseEffect,
    PriorityOrder,
}

/// How the message closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingStrategy {
    Summary,
    CallToAction,
    PersonalNote,
    ForwardLooking,
    UrgencyReminder,
}

/// Shape of the final ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallToActionType {
    DirectRequest,
    SoftSuggestion,
    MultipleOptions,
    DeadlineDriven,
    BenefitFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStructure {
    pub opening: OpeningApproach,
    pub body: BodyFramework,
    pub closing: ClosingStrategy,
    pub call_to_action: CallToActionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneAspect {
    Formality,
    Warmth,
    Validation,
    Collaboration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

/// A conditional tweak attached to a tone guideline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneRule {
    pub condition: String,
    pub direction: AdjustmentDirection,
    pub value: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneGuideline {
    pub aspect: ToneAspect,
    pub description: String,
    pub examples: Vec<String>,
    pub rule: ToneRule,
    /// Whether the rule's condition holds for this request.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePriority {
    pub priority: u8,
    pub content: String,
    pub weight: f64,
}

/// A runtime content adjustment the presentation layer may apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveElement {
    pub name: String,
    pub description: String,
    pub condition: String,
    pub change: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentDepth {
    Surface,
    Moderate,
    Deep,
    Comprehensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
    Rapid,
}

/// Pacing hints for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceControl {
    pub base: Pace,
    pub breakpoints: Vec<String>,
    pub acceleration_triggers: Vec<String>,
    pub deceleration_triggers: Vec<String>,
}

/// Everything about how the content is shaped for one audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFramework {
    pub structure: ContentStructure,
    pub content_flow: Vec<String>,
    pub narrative: NarrativeFramework,
    pub tone_guidelines: Vec<ToneGuideline>,
    pub message_priorities: Vec<MessagePriority>,
    pub adaptive_elements: Vec<AdaptiveElement>,
    pub depth: ContentDepth,
    pub pace: PaceControl,
}

/// Pure selection rules for every part of a `ContentFramework`.
pub struct FrameworkBuilder;

impl FrameworkBuilder {
    pub fn build(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> ContentFramework {
        ContentFramework {
            structure: ContentStructure {
                opening: Self::opening(purpose, audience, ctx),
                body: Self::body(purpose, audience),
                closing: Self::closing(purpose, ctx),
                call_to_action: Self::call_to_action(purpose, audience, ctx),
            },
            content_flow: Self::content_flow(purpose, audience, ctx),
            narrative: NarrativeFramework::build(purpose, audience, ctx),
            tone_guidelines: Self::tone_guidelines(audience, ctx),
            message_priorities: Self::message_priorities(purpose, ctx),
            adaptive_elements: Self::adaptive_elements(audience),
            depth: Self::depth(audience, ctx),
            pace: Self::pace(audience, ctx),
        }
    }

    /// # Algorithm
    /// First match wins: stress above 7 or a very limited audience → direct;
    /// warm_personal → warm; authority → statistic; inspire → story;
    /// solve → problem statement; otherwise a question.
    pub fn opening(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> OpeningApproach {
        if ctx.stress_level > 7 || audience.time_constraint() == TimeConstraint::VeryLimited {
            return OpeningApproach::Direct;
        }
        if audience.communication_style() == CommunicationStyle::WarmPersonal {
            return OpeningApproach::Warm;
        }
        match purpose {
            Purpose::EstablishAuthority => OpeningApproach::Statistic,
            Purpose::InspireMotivate => OpeningApproach::Story,
            Purpose::SolveProblems => OpeningApproach::ProblemStatement,
            _ => OpeningApproach::Question,
        }
    }

    pub fn body(purpose: Purpose, audience: &DynamicAudience) -> BodyFramework {
        match purpose {
            Purpose::InformEducate | Purpose::InspireMotivate => BodyFramework::Chronological,
            Purpose::SolveProblems | Purpose::PersuadeConvince => BodyFramework::ProblemSolution,
            _ if audience.decision_style() == DecisionStyle::ThoroughAnalytical => {
                BodyFramework::CompareContrast
            }
            Purpose::EstablishAuthority => BodyFramework::CauseEffect,
            _ => BodyFramework::PriorityOrder,
        }
    }

    pub fn closing(purpose: Purpose, ctx: &UserContext) -> ClosingStrategy {
        if ctx.time_available < 10 {
            return ClosingStrategy::UrgencyReminder;
        }
        match purpose {
            Purpose::InformEducate => ClosingStrategy::Summary,
            Purpose::PersuadeConvince | Purpose::InspireMotivate | Purpose::CreateEngagement => {
                ClosingStrategy::CallToAction
            }
            Purpose::BuildRelationships | Purpose::RequestSupport => ClosingStrategy::PersonalNote,
            Purpose::SolveProblems | Purpose::EstablishAuthority => ClosingStrategy::ForwardLooking,
        }
    }

    pub fn call_to_action(
        purpose: Purpose,
        audience: &DynamicAudience,
        ctx: &UserContext,
    ) -> CallToActionType {
        if ctx.time_available < 15 || ctx.stress_level > 7 {
            return CallToActionType::DeadlineDriven;
        }
        match audience.communication_style() {
            CommunicationStyle::DirectFactual => CallToActionType::DirectRequest,
            CommunicationStyle::WarmPersonal => CallToActionType::SoftSuggestion,
            _ if matches!(purpose, Purpose::SolveProblems | Purpose::CreateEngagement) => {
                CallToActionType::MultipleOptions
            }
            _ => CallToActionType::BenefitFocused,
        }
    }

    /// Section order for the content.
    ///
    /// # Algorithm
    /// 1. Start from the purpose's base flow
    /// 2. Under time pressure keep the first and last sections plus any
    ///    core section (main content, solution, specific need, action)
    /// 3. For data-driven audiences insert `data_evidence` after the first
    ///    solution, benefits or recommendation section
    pub fn content_flow(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> Vec<String> {
        const CORE: [&str; 4] = ["main_content", "solution", "specific_need", "action"];
        const EVIDENCE_ANCHORS: [&str; 3] = ["solution", "benefits", "recommendation"];

        let base = base_flow(purpose);
        let mut flow: Vec<String> =
            if ctx.time_available < 15 || audience.time_constraint() == TimeConstraint::VeryLimited {
                let last = base.len().saturating_sub(1);
                base.iter()
                    .enumerate()
                    .filter(|(i, step)| *i == 0 || *i == last || CORE.contains(step))
                    .map(|(_, step)| step.to_string())
                    .collect()
            } else {
                base.iter().map(|s| s.to_string()).collect()
            };

        if audience.decision_style() == DecisionStyle::DataDriven {
            if let Some(i) = flow.iter().position(|s| EVIDENCE_ANCHORS.contains(&s.as_str())) {
                flow.insert(i + 1, "data_evidence".to_string());
            }
        }

        flow
    }

    pub fn tone_guidelines(audience: &DynamicAudience, ctx: &UserContext) -> Vec<ToneGuideline> {
        vec![
            guideline(
                ToneAspect::Formality,
                "Adjust formality based on audience",
                &["formal language", "professional tone", "casual conversation"],
                "audience_role_executive",
                0.8,
                audience.demographics.role.contains("executive"),
            ),
            guideline(
                ToneAspect::Warmth,
                "Use a warm, encouraging voice that feels like gentle guidance",
                &[
                    "We'll explore this together",
                    "Let's take it one step at a time",
                    "Your instincts are valuable here",
                ],
                "low_confidence",
                0.9,
                ctx.confidence_level < 5,
            ),
            guideline(
                ToneAspect::Validation,
                "Acknowledge emotions and validate experiences",
                &[
                    "It's completely normal to feel uncertain here",
                    "Many people find this challenging at first",
                ],
                "high_stress",
                0.8,
                ctx.stress_level > 7,
            ),
            guideline(
                ToneAspect::Collaboration,
                "Use \"we\" language to create a feeling of partnership",
                &[
                    "We'll work through this together",
                    "We can adjust as we go",
                ],
                "any_context",
                0.8,
                true,
            ),
        ]
    }

    pub fn message_priorities(purpose: Purpose, ctx: &UserContext) -> Vec<MessagePriority> {
        let mut priorities = vec![MessagePriority {
            priority: 1,
            content: format!("Primary message for {}", purpose.as_str()),
            weight: 1.0,
        }];
        if ctx.time_available < 15 {
            priorities.push(MessagePriority {
                priority: 2,
                content: "Key takeaways only".to_string(),
                weight: 0.8,
            });
        }
        priorities
    }

    pub fn adaptive_elements(audience: &DynamicAudience) -> Vec<AdaptiveElement> {
        let mut elements = vec![AdaptiveElement {
            name: "Tone Adaptation".to_string(),
            description: "Adapt tone based on audience and context".to_string(),
            condition: "high_stress".to_string(),
            change: "simplify_language".to_string(),
            weight: 0.8,
        }];
        if audience.decision_style() == DecisionStyle::QuickDecisive {
            elements.push(AdaptiveElement {
                name: "Quick Decision Structure".to_string(),
                description: "Streamline for quick decision makers".to_string(),
                condition: "quick_decision_style".to_string(),
                change: "condense_sections".to_string(),
                weight: 0.9,
            });
        }
        elements
    }

    pub fn depth(audience: &DynamicAudience, ctx: &UserContext) -> ContentDepth {
        if ctx.time_available < 10 || audience.time_constraint() == TimeConstraint::VeryLimited {
            ContentDepth::Surface
        } else if audience.experience_level() == ExperienceLevel::Expert && ctx.time_available > 30 {
            ContentDepth::Comprehensive
        } else if audience.decision_style() == DecisionStyle::ThoroughAnalytical {
            ContentDepth::Deep
        } else {
            ContentDepth::Moderate
        }
    }

    /// Pace from an additive pressure score: time under 15 (+2), stress
    /// above 7 (+1), expert (+1), very limited audience (+2).
    pub fn pace(audience: &DynamicAudience, ctx: &UserContext) -> PaceControl {
        let very_limited = audience.time_constraint() == TimeConstraint::VeryLimited;
        let expert = audience.experience_level() == ExperienceLevel::Expert;
        let score = if ctx.time_available < 15 { 2 } else { 0 }
            + u8::from(ctx.stress_level > 7)
            + u8::from(expert)
            + if very_limited { 2 } else { 0 };

        let base = match score {
            4.. => Pace::Rapid,
            2..=3 => Pace::Fast,
            1 => Pace::Moderate,
            0 => Pace::Slow,
        };

        let mut breakpoints = Vec::new();
        if ctx.stress_level > 6 {
            breakpoints.push("stress_relief_pause".to_string());
        }
        if ctx.confidence_level < 5 {
            breakpoints.push("confidence_check".to_string());
        }
        if audience.experience_level() == ExperienceLevel::Beginner {
            breakpoints.push("comprehension_check".to_string());
        }

        let mut acceleration_triggers = Vec::new();
        if ctx.time_available < 20 {
            acceleration_triggers.push("time_pressure".to_string());
        }
        if ctx.skill_level == ExperienceLevel::Expert {
            acceleration_triggers.push("high_expertise".to_string());
        }

        let mut deceleration_triggers = Vec::new();
        if ctx.stress_level > 7 {
            deceleration_triggers.push("high_stress".to_string());
        }
        if ctx.confidence_level < 4 {
            deceleration_triggers.push("low_confidence".to_string());
        }

        PaceControl {
            base,
            breakpoints,
            acceleration_triggers,
            deceleration_triggers,
        }
    }
}

fn base_flow(purpose: Purpose) -> &'static [&'static str] {
    match purpose {
        Purpose::InformEducate => &["hook", "context", "main_content", "examples", "summary", "action_items"],
        Purpose::PersuadeConvince => &["attention", "problem", "solution", "benefits", "evidence", "call_to_action"],
        Purpose::BuildRelationships => &["connection", "common_ground", "value_exchange", "trust_building", "next_steps"],
        Purpose::SolveProblems => &["problem_definition", "analysis", "solution_options", "recommendation", "implementation"],
        Purpose::RequestSupport => &["context", "specific_need", "mutual_benefit", "clear_ask", "appreciation"],
        Purpose::InspireMotivate => &["vision", "emotional_connection", "possibility", "empowerment", "action"],
        Purpose::EstablishAuthority => &["credentials", "expertise_demonstration", "insights", "thought_leadership", "guidance"],
        Purpose::CreateEngagement => &["hook", "interactive_element", "value_proposition", "participation", "community"],
    }
}

fn guideline(
    aspect: ToneAspect,
    description: &str,
    examples: &[&str],
    condition: &str,
    value: f64,
    active: bool,
) -> ToneGuideline {
    ToneGuideline {
        aspect,
        description: description.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        rule: ToneRule {
            condition: condition.to_string(),
            direction: AdjustmentDirection::Increase,
            value,
            intensity: value,
        },
        active,
    }
}
