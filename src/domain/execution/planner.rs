//! Builds a `PersonalizedExecution` from an adapted strategy.

use serde::{Deserialize, Serialize};

use super::{
    ConfidenceSupport, ExecutionVariant, SuccessMetric, TimeOptimization, VariantKind,
};
use crate::domain::audience::DynamicAudience;
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::{
    CommunicationStyle, DecisionStyle, ExecutionId, ExperienceLevel, Purpose, TimeConstraint,
};
use crate::domain::strategy::{ClosingStrategy, OpeningApproach, PathSpecificStrategy};

/// How the user carries out one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedExecution {
    pub id: ExecutionId,
    pub name: String,
    pub description: String,
    pub adaptive_instructions: String,
    /// Specialized variants first, balanced last. Never empty.
    pub variants: Vec<ExecutionVariant>,
    pub time_optimizations: Vec<TimeOptimization>,
    pub confidence_support: ConfidenceSupport,
    pub success_metrics: Vec<SuccessMetric>,
}

impl PersonalizedExecution {
    pub fn variant(&self, kind: VariantKind) -> Option<&ExecutionVariant> {
        self.variants.iter().find(|v| v.kind == kind)
    }

    /// The balanced variant, always present on planner output.
    pub fn balanced(&self) -> Option<&ExecutionVariant> {
        self.variant(VariantKind::Balanced)
    }
}

/// Pure planning rules.
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    /// Plans the execution of `strategy` for one audience.
    ///
    /// # Algorithm
    /// 1. Add quick, thorough and collaborative variants when their conditions hold
    /// 2. Always append the balanced variant
    /// 3. Attach time optimizations, confidence support and success metrics
    ///
    /// # Edge Cases
    /// - No specialized condition holds: the balanced variant is returned alone
    /// - `max_time` caps every timeline bound
    pub fn plan(
        purpose: Purpose,
        audience: &DynamicAudience,
        strategy: &PathSpecificStrategy,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> PersonalizedExecution {
        let variants: Vec<ExecutionVariant> = Self::variant_kinds(audience, ctx)
            .into_iter()
            .map(|kind| ExecutionVariant::build(kind, ctx, constraints))
            .collect();

        tracing::debug!(
            purpose = purpose.as_str(),
            variants = variants.len(),
            "planned execution variants"
        );

        PersonalizedExecution {
            id: ExecutionId::new(),
            name: format!("Execute {}", strategy.name),
            description: format!("Personalized execution for {}", audience.label),
            adaptive_instructions: Self::adaptive_instructions(purpose, audience, strategy, ctx),
            variants,
            time_optimizations: TimeOptimization::for_context(audience, ctx),
            confidence_support: ConfidenceSupport::build(audience, ctx),
            success_metrics: SuccessMetric::for_purpose(purpose),
        }
    }

    pub fn variant_kinds(audience: &DynamicAudience, ctx: &UserContext) -> Vec<VariantKind> {
        let mut kinds = Vec::with_capacity(4);
        if ctx.time_available < 15 || audience.time_constraint() == TimeConstraint::VeryLimited {
            kinds.push(VariantKind::Quick);
        }
        if audience.decision_style() == DecisionStyle::ThoroughAnalytical {
            kinds.push(VariantKind::Thorough);
        }
        if audience.communication_style() == CommunicationStyle::CollaborativeInclusive {
            kinds.push(VariantKind::Collaborative);
        }
        kinds.push(VariantKind::Balanced);
        kinds
    }

    /// Opening, three core lines for the purpose, then closing. Each line
    /// is qualified for short time, high stress and beginners.
    pub fn adaptive_instructions(
        purpose: Purpose,
        audience: &DynamicAudience,
        strategy: &PathSpecificStrategy,
        ctx: &UserContext,
    ) -> String {
        let structure = &strategy.framework.structure;

        let mut lines = Vec::with_capacity(5);
        lines.push(opening_instruction(structure.opening));
        lines.extend(core_instructions(purpose));
        lines.push(closing_instruction(structure.closing));

        let mut qualifiers = String::new();
        if ctx.time_available < 15 {
            qualifiers.push_str(" (keep it concise)");
        }
        if ctx.stress_level > 7 {
            qualifiers.push_str(" (maintain calm and clarity)");
        }
        if audience.experience_level() == ExperienceLevel::Beginner {
            qualifiers.push_str(" (use simple language)");
        }

        lines
            .into_iter()
            .map(|line| format!("{line}{qualifiers}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn opening_instruction(opening: OpeningApproach) -> &'static str {
    match opening {
        OpeningApproach::Direct => "Let's get right to what matters most to you",
        OpeningApproach::Warm => "Let's start by connecting on what this means to you",
        OpeningApproach::Statistic => "I'm here to share what I've learned to help you succeed",
        OpeningApproach::Story => "Let's explore the possibilities ahead of you",
        OpeningApproach::ProblemStatement => "Let me help you understand the bigger picture here",
        OpeningApproach::Question => "Let's begin this journey together",
    }
}

fn core_instructions(purpose: Purpose) -> [&'static str; 3] {
    match purpose {
        Purpose::InformEducate => [
            "Let's walk through this together step by step",
            "I'll share examples that connect to your world",
            "We'll pause to make sure this feels clear to you",
        ],
        Purpose::PersuadeConvince => [
            "Let me share the most compelling reasons first",
            "I'll help address any concerns you might have",
            "Together we'll discover what feels right for you",
        ],
        Purpose::BuildRelationships => [
            "I'm genuinely interested in understanding you",
            "Let's discover what we have in common",
            "I'm here to help you succeed, no strings attached",
        ],
        Purpose::SolveProblems => [
            "Let's understand what we're really facing here",
            "I'll share several paths we could explore",
            "Together we'll find the approach that feels best for you",
        ],
        Purpose::RequestSupport => [
            "Let me share exactly how you can help",
            "I'll show you the meaningful impact you'll have",
            "Your support means the world to me",
        ],
        Purpose::InspireMotivate => [
            "Let's explore what truly matters to you",
            "I'll share stories that might touch your heart",
            "Together we'll create steps that feel right for you",
        ],
        Purpose::EstablishAuthority => [
            "Demonstrate deep knowledge naturally",
            "Share unique insights and perspectives",
            "Guide others with confidence",
        ],
        Purpose::CreateEngagement => [
            "Make it interactive and participatory",
            "Provide immediate value",
            "Build a sense of community",
        ],
    }
}

fn closing_instruction(closing: ClosingStrategy) -> &'static str {
    match closing {
        ClosingStrategy::Summary => "Summarize key points and provide resources for further learning",
        ClosingStrategy::CallToAction => "End with a clear, compelling call to action",
        ClosingStrategy::PersonalNote => "Close with an open invitation for continued connection",
        ClosingStrategy::ForwardLooking => "Provide a clear roadmap for implementation",
        ClosingStrategy::UrgencyReminder => "Clearly outline the next steps",
    }
}
