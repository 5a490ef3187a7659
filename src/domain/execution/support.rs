//! Confidence boosters, support interventions and time optimizations.

use serde::{Deserialize, Serialize};

use crate::domain::audience::DynamicAudience;
use crate::domain::context::UserContext;
use crate::domain::foundation::CommunicationStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterImpact {
    Moderate,
    Significant,
    Major,
}

/// A small exercise that lifts confidence at one phase of execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBooster {
    pub name: String,
    pub description: String,
    pub trigger: String,
    pub impact: BoosterImpact,
}

impl ConfidenceBooster {
    fn new(name: &str, description: &str, trigger: &str, impact: BoosterImpact) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            trigger: trigger.to_string(),
            impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    Encouragement,
    StressReduction,
    SkillBuilding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub action: String,
    pub delay_secs: u32,
    pub conditions: Vec<String>,
}

/// Support offered when a threshold trips during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportIntervention {
    pub kind: InterventionKind,
    pub conditions: Vec<String>,
    pub method: String,
    pub content: String,
    pub alternatives: Vec<String>,
    pub follow_up: FollowUp,
}

impl SupportIntervention {
    pub fn encouragement() -> Self {
        Self {
            kind: InterventionKind::Encouragement,
            conditions: vec!["confidence_drop".to_string()],
            method: "gentle_prompt".to_string(),
            content: "You have the skills and knowledge to succeed".to_string(),
            alternatives: strings(&["success_reminder", "progress_highlight"]),
            follow_up: FollowUp {
                action: "check_in".to_string(),
                delay_secs: 300,
                conditions: strings(&["no_progress"]),
            },
        }
    }

    pub fn stress_reduction() -> Self {
        Self {
            kind: InterventionKind::StressReduction,
            conditions: vec!["stress_spike".to_string()],
            method: "structured_break".to_string(),
            content: "Take a moment to breathe and reset".to_string(),
            alternatives: strings(&["simplify_task", "provide_template"]),
            follow_up: FollowUp {
                action: "stress_check".to_string(),
                delay_secs: 180,
                conditions: strings(&["continued_stress"]),
            },
        }
    }

    /// Appended by the learner when a path keeps underperforming.
    pub fn skill_building() -> Self {
        Self {
            kind: InterventionKind::SkillBuilding,
            conditions: vec!["repeated_struggle".to_string()],
            method: "expert_guidance".to_string(),
            content: "Additional support and guidance provided".to_string(),
            alternatives: strings(&["additional_examples", "step_by_step_guide", "practice_exercises"]),
            follow_up: FollowUp {
                action: "success_rate_check".to_string(),
                delay_secs: 600,
                conditions: strings(&["still_struggling"]),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceSupport {
    pub preparation: Vec<ConfidenceBooster>,
    pub execution: Vec<ConfidenceBooster>,
    pub review: Vec<ConfidenceBooster>,
    pub interventions: Vec<SupportIntervention>,
}

impl ConfidenceSupport {
    /// Preparation boosters gated on low confidence and high stress,
    /// execution and review boosters always present, interventions gated
    /// on the same levels.
    pub fn build(audience: &DynamicAudience, ctx: &UserContext) -> Self {
        use BoosterImpact::{Major, Moderate, Significant};

        let mut preparation = Vec::new();
        if ctx.confidence_level < 5 {
            preparation.push(ConfidenceBooster::new(
                "Success Review",
                "Review past successes to build confidence",
                "low_confidence",
                Significant,
            ));
            preparation.push(ConfidenceBooster::new(
                "Practice Session",
                "Quick practice to build familiarity",
                "uncertainty",
                Moderate,
            ));
        }
        if ctx.stress_level > 6 {
            preparation.push(ConfidenceBooster::new(
                "Breathing Exercise",
                "Calm your mind before starting",
                "high_stress",
                Significant,
            ));
            preparation.push(ConfidenceBooster::new(
                "Visualization",
                "Picture the outcome going well",
                "anxiety",
                Moderate,
            ));
        }

        let mut execution = vec![
            ConfidenceBooster::new(
                "Steady Pace",
                "Take it one step at a time",
                "overwhelm",
                Significant,
            ),
            ConfidenceBooster::new(
                "Structure Guide",
                "Follow a proven framework",
                "uncertainty",
                Moderate,
            ),
        ];
        if audience.communication_style() == CommunicationStyle::WarmPersonal {
            execution.push(ConfidenceBooster::new(
                "Personal Connection",
                "Remember the human connection in your communication",
                "disconnect",
                Significant,
            ));
        }

        let review = vec![
            ConfidenceBooster::new(
                "Success Reflection",
                "Acknowledge what went well",
                "completion",
                Major,
            ),
            ConfidenceBooster::new(
                "Growth Identification",
                "Identify areas of improvement",
                "reflection",
                Moderate,
            ),
            ConfidenceBooster::new(
                "Progress Celebration",
                "Celebrate your progress",
                "milestone",
                Significant,
            ),
        ];

        let mut interventions = Vec::new();
        if ctx.confidence_level < 4 {
            interventions.push(SupportIntervention::encouragement());
        }
        if ctx.stress_level > 7 {
            interventions.push(SupportIntervention::stress_reduction());
        }

        Self {
            preparation,
            execution,
            review,
            interventions,
        }
    }

    pub fn has_intervention(&self, kind: InterventionKind) -> bool {
        self.interventions.iter().any(|i| i.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityImpact {
    None,
    Minimal,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOptimization {
    pub name: String,
    pub description: String,
    pub minutes_saved: u32,
    pub effort_reduction: f64,
    pub quality_impact: QualityImpact,
}

impl TimeOptimization {
    /// Express mode under ten minutes; shortcuts for advanced and expert users.
    pub fn for_context(audience: &DynamicAudience, ctx: &UserContext) -> Vec<Self> {
        let mut optimizations = Vec::new();

        if ctx.time_available < 10 {
            optimizations.push(Self {
                name: "Express Mode".to_string(),
                description: "Skip optional steps and use templates".to_string(),
                minutes_saved: 5,
                effort_reduction: 0.3,
                quality_impact: QualityImpact::Minimal,
            });
        }

        if audience.experience_level().is_advanced() {
            optimizations.push(Self {
                name: "Expert Shortcuts".to_string(),
                description: "Use advanced techniques for faster execution".to_string(),
                minutes_saved: 3,
                effort_reduction: 0.2,
                quality_impact: QualityImpact::None,
            });
        }

        optimizations
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
