//! Closed vocabularies for audience and context traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an audience prefers to receive information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    AnalyticalDetailed,
    DirectFactual,
    WarmPersonal,
    CollaborativeInclusive,
    CasualFriendly,
    InspirationalEmotional,
    AuthoritativeConfident,
}

impl CommunicationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationStyle::AnalyticalDetailed => "analytical_detailed",
            CommunicationStyle::DirectFactual => "direct_factual",
            CommunicationStyle::WarmPersonal => "warm_personal",
            CommunicationStyle::CollaborativeInclusive => "collaborative_inclusive",
            CommunicationStyle::CasualFriendly => "casual_friendly",
            CommunicationStyle::InspirationalEmotional => "inspirational_emotional",
            CommunicationStyle::AuthoritativeConfident => "authoritative_confident",
        }
    }
}

impl fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an audience prefers to reach decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStyle {
    ThoroughAnalytical,
    QuickDecisive,
    CollaborativeConsensus,
    IntuitiveEmotional,
    DataDriven,
    InnovativeExperimental,
}

impl DecisionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStyle::ThoroughAnalytical => "thorough_analytical",
            DecisionStyle::QuickDecisive => "quick_decisive",
            DecisionStyle::CollaborativeConsensus => "collaborative_consensus",
            DecisionStyle::IntuitiveEmotional => "intuitive_emotional",
            DecisionStyle::DataDriven => "data_driven",
            DecisionStyle::InnovativeExperimental => "innovative_experimental",
        }
    }
}

impl fmt::Display for DecisionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered skill level: beginner < intermediate < advanced < expert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    /// Returns the 1-based rank of this level.
    pub fn rank(&self) -> u8 {
        match self {
            ExperienceLevel::Beginner => 1,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Advanced => 3,
            ExperienceLevel::Expert => 4,
        }
    }

    /// Number of steps between two levels.
    pub fn distance(&self, other: &ExperienceLevel) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// True for advanced and expert.
    pub fn is_advanced(&self) -> bool {
        *self >= ExperienceLevel::Advanced
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse bucket of how much time an audience can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeConstraint {
    VeryLimited,
    Moderate,
    Flexible,
    Abundant,
}

impl TimeConstraint {
    /// Returns all buckets from shortest to longest.
    pub fn all() -> &'static [TimeConstraint] {
        &[
            TimeConstraint::VeryLimited,
            TimeConstraint::Moderate,
            TimeConstraint::Flexible,
            TimeConstraint::Abundant,
        ]
    }

    /// Representative minutes for the bucket.
    pub fn minutes(&self) -> u32 {
        match self {
            TimeConstraint::VeryLimited => 10,
            TimeConstraint::Moderate => 20,
            TimeConstraint::Flexible => 40,
            TimeConstraint::Abundant => 60,
        }
    }

    /// Picks the bucket whose representative minutes are closest.
    ///
    /// Ties resolve to the shorter bucket.
    pub fn nearest(minutes: u32) -> TimeConstraint {
        let mut best = TimeConstraint::VeryLimited;
        let mut best_diff = u32::MAX;
        for bucket in Self::all() {
            let diff = bucket.minutes().abs_diff(minutes);
            if diff < best_diff {
                best = *bucket;
                best_diff = diff;
            }
        }
        best
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeConstraint::VeryLimited => "very_limited",
            TimeConstraint::Moderate => "moderate",
            TimeConstraint::Flexible => "flexible",
            TimeConstraint::Abundant => "abundant",
        }
    }
}

impl fmt::Display for TimeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comfort with digital tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechComfort {
    Low,
    Moderate,
    High,
    Expert,
}

impl TechComfort {
    /// Baseline comfort implied by a skill level.
    pub fn for_level(level: ExperienceLevel) -> TechComfort {
        match level {
            ExperienceLevel::Beginner => TechComfort::Low,
            ExperienceLevel::Intermediate => TechComfort::Moderate,
            ExperienceLevel::Advanced => TechComfort::High,
            ExperienceLevel::Expert => TechComfort::Expert,
        }
    }

    /// One level up, saturating at expert.
    pub fn bumped(&self) -> TechComfort {
        match self {
            TechComfort::Low => TechComfort::Moderate,
            TechComfort::Moderate => TechComfort::High,
            TechComfort::High | TechComfort::Expert => TechComfort::Expert,
        }
    }
}

/// Graded difficulty of a generated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Maps an accumulated complexity score onto a grade.
    pub fn from_score(score: u8) -> Difficulty {
        match score {
            0..=2 => Difficulty::Easy,
            3..=4 => Difficulty::Medium,
            5..=6 => Difficulty::Hard,
            _ => Difficulty::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_levels_are_ordered() {
        assert!(ExperienceLevel::Beginner < ExperienceLevel::Intermediate);
        assert!(ExperienceLevel::Advanced < ExperienceLevel::Expert);
        assert_eq!(ExperienceLevel::Beginner.distance(&ExperienceLevel::Advanced), 2);
    }

    #[test]
    fn nearest_bucket_prefers_shorter_on_tie() {
        assert_eq!(TimeConstraint::nearest(15), TimeConstraint::VeryLimited);
        assert_eq!(TimeConstraint::nearest(30), TimeConstraint::Moderate);
        assert_eq!(TimeConstraint::nearest(50), TimeConstraint::Flexible);
    }

    #[test]
    fn nearest_bucket_handles_extremes() {
        assert_eq!(TimeConstraint::nearest(0), TimeConstraint::VeryLimited);
        assert_eq!(TimeConstraint::nearest(500), TimeConstraint::Abundant);
    }

    #[test]
    fn tech_comfort_bump_saturates() {
        assert_eq!(TechComfort::Low.bumped(), TechComfort::Moderate);
        assert_eq!(TechComfort::Expert.bumped(), TechComfort::Expert);
    }

    #[test]
    fn difficulty_thresholds() {
        assert_eq!(Difficulty::from_score(2), Difficulty::Easy);
        assert_eq!(Difficulty::from_score(3), Difficulty::Medium);
        assert_eq!(Difficulty::from_score(6), Difficulty::Hard);
        assert_eq!(Difficulty::from_score(7), Difficulty::Expert);
    }

    #[test]
    fn styles_serialize_snake_case() {
        let json = serde_json::to_string(&CommunicationStyle::CollaborativeInclusive).unwrap();
        assert_eq!(json, "\"collaborative_inclusive\"");
        let json = serde_json::to_string(&DecisionStyle::QuickDecisive).unwrap();
        assert_eq!(json, "\"quick_decisive\"");
    }
}
