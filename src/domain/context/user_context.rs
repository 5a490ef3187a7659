//! Caller-supplied description of the person a path is generated for.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommunicationStyle, ExperienceLevel, PathId, Timestamp, UserId};

/// Upper bound of the stress and confidence scales.
pub const LEVEL_MAX: u8 = 10;

/// Neutral value assumed when a level is not supplied.
pub const NEUTRAL_LEVEL: u8 = 5;

/// Minutes assumed when available time is not supplied.
pub const DEFAULT_TIME_AVAILABLE: u32 = 20;

/// Outcome of a previously attempted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(default)]
    pub path_id: Option<PathId>,
    /// Fraction of the path that succeeded, 0.0 to 1.0.
    pub success_rate: f64,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl PerformanceRecord {
    pub fn new(success_rate: f64) -> Self {
        Self {
            path_id: None,
            success_rate: success_rate.clamp(0.0, 1.0),
            completed_at: None,
        }
    }
}

/// A learning preference with a strength between 0.0 and 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPreference {
    pub aspect: String,
    pub strength: f64,
}

impl LearningPreference {
    pub fn new(aspect: impl Into<String>, strength: f64) -> Self {
        Self {
            aspect: aspect.into(),
            strength: strength.clamp(0.0, 1.0),
        }
    }

    /// Strong preferences shape tech comfort and confidence builders.
    pub fn is_strong(&self) -> bool {
        self.strength > 0.7
    }
}

/// A named constraint the user is currently working under, e.g. `difficulty = easy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConstraint {
    pub kind: String,
    pub value: String,
}

impl ActiveConstraint {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Immutable per-request context.
///
/// Every field has a neutral default so partially populated payloads
/// deserialize cleanly and contribute nothing to threshold rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub user_id: UserId,

    #[serde(default, alias = "current_skill_level")]
    pub skill_level: ExperienceLevel,

    /// Minutes available for the task.
    #[serde(default = "default_time_available")]
    pub time_available: u32,

    /// 0 (calm) to 10 (overwhelmed).
    #[serde(default = "default_level")]
    pub stress_level: u8,

    /// 0 (none) to 10 (fully confident).
    #[serde(default = "default_level")]
    pub confidence_level: u8,

    #[serde(default)]
    pub preferred_communication_style: Option<CommunicationStyle>,

    /// Oldest first.
    #[serde(default)]
    pub past_performance: Vec<PerformanceRecord>,

    #[serde(default)]
    pub active_goals: Vec<String>,

    #[serde(default)]
    pub active_constraints: Vec<ActiveConstraint>,

    #[serde(default)]
    pub learning_preferences: Vec<LearningPreference>,
}

fn default_time_available() -> u32 {
    DEFAULT_TIME_AVAILABLE
}

fn default_level() -> u8 {
    NEUTRAL_LEVEL
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            user_id: UserId::default(),
            skill_level: ExperienceLevel::default(),
            time_available: DEFAULT_TIME_AVAILABLE,
            stress_level: NEUTRAL_LEVEL,
            confidence_level: NEUTRAL_LEVEL,
            preferred_communication_style: None,
            past_performance: Vec::new(),
            active_goals: Vec::new(),
            active_constraints: Vec::new(),
            learning_preferences: Vec::new(),
        }
    }
}

impl UserContext {
    /// Creates a neutral context for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn with_skill_level(mut self, level: ExperienceLevel) -> Self {
        self.skill_level = level;
        self
    }

    pub fn with_time_available(mut self, minutes: u32) -> Self {
        self.time_available = minutes;
        self
    }

    /// Sets the stress level, clamped to 0..=10.
    pub fn with_stress_level(mut self, level: u8) -> Self {
        self.stress_level = level.min(LEVEL_MAX);
        self
    }

    /// Sets the confidence level, clamped to 0..=10.
    pub fn with_confidence_level(mut self, level: u8) -> Self {
        self.confidence_level = level.min(LEVEL_MAX);
        self
    }

    pub fn with_communication_style(mut self, style: CommunicationStyle) -> Self {
        self.preferred_communication_style = Some(style);
        self
    }

    pub fn with_performance(mut self, record: PerformanceRecord) -> Self {
        self.past_performance.push(record);
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.active_goals.push(goal.into());
        self
    }

    pub fn with_constraint(mut self, constraint: ActiveConstraint) -> Self {
        self.active_constraints.push(constraint);
        self
    }

    pub fn with_learning_preference(mut self, preference: LearningPreference) -> Self {
        self.learning_preferences.push(preference);
        self
    }

    /// Returns a copy with levels clamped into range.
    ///
    /// Deserialized payloads may carry out-of-range values; every engine
    /// entry point normalizes before scoring.
    pub fn normalized(&self) -> Self {
        let mut ctx = self.clone();
        ctx.stress_level = ctx.stress_level.min(LEVEL_MAX);
        ctx.confidence_level = ctx.confidence_level.min(LEVEL_MAX);
        for record in &mut ctx.past_performance {
            record.success_rate = record.success_rate.clamp(0.0, 1.0);
        }
        for pref in &mut ctx.learning_preferences {
            pref.strength = pref.strength.clamp(0.0, 1.0);
        }
        ctx
    }

    pub fn is_high_stress(&self) -> bool {
        self.stress_level > 7
    }

    pub fn is_short_on_time(&self) -> bool {
        self.time_available < 15
    }

    /// True when any past attempt succeeded above the given rate.
    pub fn has_success_above(&self, rate: f64) -> bool {
        self.past_performance.iter().any(|p| p.success_rate > rate)
    }

    /// Looks up the value of an active constraint by kind.
    pub fn constraint(&self, kind: &str) -> Option<&str> {
        self.active_constraints
            .iter()
            .find(|c| c.kind.eq_ignore_ascii_case(kind))
            .map(|c| c.value.as_str())
    }
}
