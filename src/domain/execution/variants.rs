//! Execution variants: quick, thorough, collaborative and balanced.

use serde::{Deserialize, Serialize};

use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::foundation::VariantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Quick,
    Thorough,
    Collaborative,
    Balanced,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Quick => "quick",
            VariantKind::Thorough => "thorough",
            VariantKind::Collaborative => "collaborative",
            VariantKind::Balanced => "balanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VariantKind::Quick => "Quick Execution",
            VariantKind::Thorough => "Thorough Execution",
            VariantKind::Collaborative => "Collaborative Execution",
            VariantKind::Balanced => "Balanced Execution",
        }
    }

    /// `(total, urgent, thorough)` multipliers of the available time.
    ///
    /// The quick variant is not scaled; it clamps fixed budgets instead.
    fn multipliers(&self) -> (f64, f64, f64) {
        match self {
            VariantKind::Quick => (1.0, 1.0, 1.0),
            VariantKind::Thorough => (1.2, 1.0, 1.5),
            VariantKind::Collaborative => (1.0, 0.8, 1.3),
            VariantKind::Balanced => (1.0, 0.7, 1.2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Less,
    Equals,
}

/// When a variant applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantCondition {
    pub attribute: String,
    pub operator: ConditionOperator,
    pub value: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFactor {
    pub factor: String,
    pub impact: f64,
    pub description: String,
}

/// Estimated minutes for a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub total_minutes: f64,
    /// Floor when the user rushes.
    pub urgent_minutes: f64,
    /// Ceiling when the user goes deep.
    pub thorough_minutes: f64,
    pub factors: Vec<TimelineFactor>,
}

impl Timeline {
    /// Scales the available time for a variant kind, capped by `max_time`.
    pub fn for_kind(kind: VariantKind, ctx: &UserContext, constraints: Option<&PathConstraints>) -> Self {
        let t = ctx.time_available as f64;
        let (total, urgent, thorough) = match kind {
            VariantKind::Quick => (t.min(10.0), t.min(5.0), t.min(15.0)),
            _ => {
                let (a, b, c) = kind.multipliers();
                (t * a, t * b, t * c)
            }
        };
        let cap = |m: f64| constraints.map(|c| c.cap_minutes(m)).unwrap_or(m);

        let (factor, impact, description) = match kind {
            VariantKind::Quick => ("time_pressure", 0.8, "High time pressure increases speed"),
            VariantKind::Thorough => ("analytical_preference", 0.7, "Analytical style requires more depth"),
            VariantKind::Collaborative => (
                "collaboration_preference",
                0.6,
                "Collaborative style requires interaction time",
            ),
            VariantKind::Balanced => ("balanced_approach", 0.5, "Standard balanced approach"),
        };

        Self {
            total_minutes: cap(total),
            urgent_minutes: cap(urgent),
            thorough_minutes: cap(thorough),
            factors: vec![TimelineFactor {
                factor: factor.to_string(),
                impact,
                description: description.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TroubleshootingPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troubleshooting {
    pub problem: String,
    pub solution: String,
    pub priority: TroubleshootingPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub estimated_minutes: u32,
    pub required_tools: Vec<String>,
    pub success_criteria: Vec<String>,
    pub troubleshooting: Vec<Troubleshooting>,
}

/// A capability the presentation layer can switch on for this variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveFeature {
    pub name: String,
    pub description: String,
    pub trigger: String,
    pub threshold: f64,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionVariant {
    pub id: VariantId,
    pub kind: VariantKind,
    pub name: String,
    pub description: String,
    pub conditions: Vec<VariantCondition>,
    pub timeline: Timeline,
    pub steps: Vec<ExecutionStep>,
    pub features: Vec<AdaptiveFeature>,
}

impl ExecutionVariant {
    /// Builds the variant of `kind` for this context.
    pub fn build(kind: VariantKind, ctx: &UserContext, constraints: Option<&PathConstraints>) -> Self {
        let (description, conditions, feature) = match kind {
            VariantKind::Quick => (
                "Streamlined approach for time-constrained situations",
                vec![condition("time_available", ConditionOperator::Less, "15", 0.8)],
                feature(
                    "Speed Enhancement",
                    "Automatically streamline content",
                    "time_constraint",
                    15.0,
                    &["faster_completion", "reduced_cognitive_load"],
                ),
            ),
            VariantKind::Thorough => (
                "Comprehensive approach for analytical decision makers",
                vec![condition("decision_style", ConditionOperator::Equals, "thorough_analytical", 0.9)],
                feature(
                    "Depth Enhancement",
                    "Provide comprehensive analysis",
                    "analytical_style",
                    0.8,
                    &["thorough_understanding", "high_confidence"],
                ),
            ),
            VariantKind::Collaborative => (
                "Interactive approach for relationship-focused communication",
                vec![condition(
                    "communication_style",
                    ConditionOperator::Equals,
                    "collaborative_inclusive",
                    0.85,
                )],
                feature(
                    "Interaction Enhancement",
                    "Enable collaborative features",
                    "collaborative_style",
                    0.7,
                    &["shared_ownership", "relationship_building"],
                ),
            ),
            VariantKind::Balanced => (
                "Well-rounded approach suitable for most situations",
                Vec::new(),
                feature(
                    "Standard Features",
                    "Core functionality for a balanced approach",
                    "default",
                    0.0,
                    &["versatility", "reliability"],
                ),
            ),
        };

        Self {
            id: VariantId::new(),
            kind,
            name: kind.display_name().to_string(),
            description: description.to_string(),
            conditions,
            timeline: Timeline::for_kind(kind, ctx, constraints),
            steps: steps_for(kind),
            features: vec![feature],
        }
    }

    pub fn step_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.estimated_minutes).sum()
    }
}

fn condition(attribute: &str, operator: ConditionOperator, value: &str, weight: f64) -> VariantCondition {
    VariantCondition {
        attribute: attribute.to_string(),
        operator,
        value: value.to_string(),
        weight,
    }
}

fn feature(name: &str, description: &str, trigger: &str, threshold: f64, benefits: &[&str]) -> AdaptiveFeature {
    AdaptiveFeature {
        name: name.to_string(),
        description: description.to_string(),
        trigger: trigger.to_string(),
        threshold,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn step(
    id: &str,
    title: &str,
    description: &str,
    instructions: &str,
    minutes: u32,
    tools: &[&str],
    criteria: &[&str],
    troubleshooting: Option<(&str, &str, TroubleshootingPriority)>,
) -> ExecutionStep {
    ExecutionStep {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructions: instructions.to_string(),
        estimated_minutes: minutes,
        required_tools: tools.iter().map(|t| t.to_string()).collect(),
        success_criteria: criteria.iter().map(|c| c.to_string()).collect(),
        troubleshooting: troubleshooting
            .map(|(problem, solution, priority)| Troubleshooting {
                problem: problem.to_string(),
                solution: solution.to_string(),
                priority,
            })
            .into_iter()
            .collect(),
    }
}

fn steps_for(kind: VariantKind) -> Vec<ExecutionStep> {
    use TroubleshootingPriority::{High, Medium};

    match kind {
        VariantKind::Quick => vec![step(
            "quick_step_1",
            "Essential Setup",
            "Quick preparation for execution",
            "Focus on what matters most right now",
            2,
            &["basic_template"],
            &["clarity_achieved"],
            Some(("Running out of time", "Skip non-essential steps", High)),
        )],
        VariantKind::Thorough => vec![
            step(
                "thorough_step_1",
                "Comprehensive Preparation",
                "Detailed setup and planning",
                "Take the time you need and explore this until it feels clear",
                10,
                &["detailed_template", "analysis_framework"],
                &["complete_understanding", "all_factors_considered"],
                Some(("Information overload", "Break down into smaller chunks", Medium)),
            ),
            step(
                "thorough_step_2",
                "Deep Analysis",
                "Thorough examination of all factors",
                "Take time to understand what matters most",
                15,
                &["analysis_tools"],
                &["thorough_analysis_complete"],
                None,
            ),
        ],
        VariantKind::Collaborative => vec![step(
            "collaborative_step_1",
            "Team Engagement",
            "Engage stakeholders in the process",
            "Your team's perspectives will make this stronger, bring them in",
            8,
            &["collaboration_platform"],
            &["stakeholder_engagement", "input_gathered"],
            Some(("Low participation", "Use different engagement techniques", High)),
        )],
        VariantKind::Balanced => vec![
            step(
                "balanced_step_1",
                "Standard Preparation",
                "Balanced preparation approach",
                "Work through this together, adapting as you learn what works",
                5,
                &["standard_template"],
                &["preparation_complete"],
                None,
            ),
            step(
                "balanced_step_2",
                "Execution",
                "Move forward with the plan",
                "Move forward at your pace, staying open to what feels right",
                10,
                &[],
                &["execution_complete"],
                None,
            ),
        ],
    }
}
