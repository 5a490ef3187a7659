//! Branch options for an existing path, scored and ranked.

use serde::{Deserialize, Serialize};

use super::ChoicePath;
use crate::domain::context::UserContext;
use crate::domain::foundation::{ExperienceLevel, PathId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    Quick,
    Deep,
    Standard,
}

impl BranchKind {
    pub fn title(&self) -> &'static str {
        match self {
            BranchKind::Quick => "Quick Path",
            BranchKind::Deep => "Deep Dive",
            BranchKind::Standard => "Standard Path",
        }
    }
}

/// Estimated change relative to the current path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BranchImpact {
    /// Minutes.
    pub time_change: f64,
    pub difficulty_change: i8,
    pub confidence_change: f64,
    pub quality_change: f64,
}

impl BranchImpact {
    pub const NONE: BranchImpact = BranchImpact {
        time_change: 0.0,
        difficulty_change: 0,
        confidence_change: 0.0,
        quality_change: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BranchRequirement {
    /// Offered when less than this many minutes are available.
    TimeBelow(u32),
    SkillAtLeast(ExperienceLevel),
}

impl BranchRequirement {
    pub fn description(&self) -> &'static str {
        match self {
            BranchRequirement::TimeBelow(_) => "Limited time available",
            BranchRequirement::SkillAtLeast(_) => "Advanced knowledge required",
        }
    }

    /// Unmet skill requirements forfeit the skill-fit bonus.
    pub fn is_met(&self, ctx: &UserContext) -> bool {
        match self {
            BranchRequirement::TimeBelow(minutes) => ctx.time_available < *minutes,
            BranchRequirement::SkillAtLeast(level) => ctx.skill_level >= *level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchOption {
    pub kind: BranchKind,
    pub title: String,
    pub description: String,
    pub requirements: Vec<BranchRequirement>,
    pub benefits: Vec<String>,
    pub impact: BranchImpact,
}

impl BranchOption {
    pub fn quick() -> Self {
        Self {
            kind: BranchKind::Quick,
            title: BranchKind::Quick.title().to_string(),
            description: "Streamlined version for time constraints".to_string(),
            requirements: vec![BranchRequirement::TimeBelow(20)],
            benefits: vec!["time_efficient".to_string(), "focused".to_string()],
            impact: BranchImpact {
                time_change: -10.0,
                difficulty_change: -1,
                confidence_change: -0.1,
                quality_change: -0.2,
            },
        }
    }

    pub fn deep() -> Self {
        Self {
            kind: BranchKind::Deep,
            title: BranchKind::Deep.title().to_string(),
            description: "Comprehensive exploration for advanced users".to_string(),
            requirements: vec![BranchRequirement::SkillAtLeast(ExperienceLevel::Advanced)],
            benefits: vec!["thorough_understanding".to_string(), "nuanced_insights".to_string()],
            impact: BranchImpact {
                time_change: 10.0,
                difficulty_change: 1,
                confidence_change: 0.2,
                quality_change: 0.3,
            },
        }
    }

    pub fn standard() -> Self {
        Self {
            kind: BranchKind::Standard,
            title: BranchKind::Standard.title().to_string(),
            description: "Balanced approach for most situations".to_string(),
            requirements: Vec::new(),
            benefits: vec!["balanced".to_string(), "comprehensive".to_string()],
            impact: BranchImpact::NONE,
        }
    }

    fn skill_requirement(&self) -> Option<ExperienceLevel> {
        self.requirements.iter().find_map(|r| match r {
            BranchRequirement::SkillAtLeast(level) => Some(*level),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchTiming {
    Immediate,
    NextStep,
    WhenReady,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRecommendation {
    pub kind: BranchKind,
    pub target_path: PathId,
    pub reason: String,
    pub benefits: Vec<String>,
    pub challenges: Vec<String>,
    pub requirements: Vec<String>,
    /// Branch score, 0.0 to 1.0.
    pub confidence: f64,
    pub timing: BranchTiming,
}

/// One previously generated path of the same user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchHistoryEntry {
    pub path_id: PathId,
    pub created_at: Timestamp,
    /// Completion rate above 0.7.
    pub success: bool,
    pub confidence_gain: f64,
}

impl BranchHistoryEntry {
    pub fn from_path(path: &ChoicePath) -> Self {
        Self {
            path_id: path.id,
            created_at: path.metadata.created_at,
            success: path.metadata.completion_rate > 0.7,
            confidence_gain: path.metadata.average_confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNavigation {
    pub current_path: PathId,
    pub available_branches: Vec<BranchOption>,
    pub history: Vec<BranchHistoryEntry>,
    /// Highest confidence first.
    pub recommendations: Vec<BranchRecommendation>,
}

/// Branch scoring constants.
///
/// Defaults reproduce the hand-tuned ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchWeights {
    pub base: f64,
    /// New total time within `time_tolerance` of the time available.
    pub time_fit: f64,
    /// Applied (negative) when the branch overruns the tolerance.
    pub time_overrun: f64,
    /// Low confidence and a positive confidence delta.
    pub confidence_boost: f64,
    /// No unmet skill requirement.
    pub skill_fit: f64,
    pub time_tolerance: f64,
}

impl Default for BranchWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            time_fit: 0.2,
            time_overrun: -0.1,
            confidence_boost: 0.15,
            skill_fit: 0.1,
            time_tolerance: 1.2,
        }
    }
}

/// Enumerates, scores and ranks branches of a path.
#[derive(Debug, Clone, Default)]
pub struct BranchNavigator {
    weights: BranchWeights,
}

impl BranchNavigator {
    pub fn new(weights: BranchWeights) -> Self {
        Self { weights }
    }

    /// Ranked branches for `path`, with the user's earlier paths as history.
    pub fn navigate(&self, path: &ChoicePath, ctx: &UserContext, history: &[ChoicePath]) -> BranchNavigation {
        let available_branches = Self::options(ctx);
        let recommendations = self.recommend(path, ctx, &available_branches);

        BranchNavigation {
            current_path: path.id,
            available_branches,
            history: history.iter().map(BranchHistoryEntry::from_path).collect(),
            recommendations,
        }
    }

    /// Quick under twenty minutes, deep for advanced and expert users,
    /// standard always.
    pub fn options(ctx: &UserContext) -> Vec<BranchOption> {
        let mut options = Vec::with_capacity(3);
        if ctx.time_available < 20 {
            options.push(BranchOption::quick());
        }
        if ctx.skill_level.is_advanced() {
            options.push(BranchOption::deep());
        }
        options.push(BranchOption::standard());
        options
    }

    /// Scores every option and sorts by confidence, stable on ties.
    pub fn recommend(
        &self,
        path: &ChoicePath,
        ctx: &UserContext,
        options: &[BranchOption],
    ) -> Vec<BranchRecommendation> {
        let mut recommendations: Vec<BranchRecommendation> = options
            .iter()
            .map(|option| {
                let score = self.score(option, ctx);
                BranchRecommendation {
                    kind: option.kind,
                    target_path: path.id,
                    reason: Self::reasoning(option, ctx, score),
                    benefits: Self::benefits(option, ctx),
                    challenges: self.challenges(option, ctx),
                    requirements: option
                        .requirements
                        .iter()
                        .map(|r| r.description().to_string())
                        .collect(),
                    confidence: score,
                    timing: Self::timing(option, ctx),
                }
            })
            .collect();

        recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        recommendations
    }

    /// # Algorithm
    /// Starts at `base`; adds `time_fit` when the new total stays within
    /// `time_tolerance` × time available (else `time_overrun`); adds
    /// `confidence_boost` for low confidence and a positive delta; adds
    /// `skill_fit` when no skill requirement is unmet.
    ///
    /// # Edge Cases
    /// - Clamped to [0, 1]
    pub fn score(&self, option: &BranchOption, ctx: &UserContext) -> f64 {
        let w = &self.weights;
        let available = ctx.time_available as f64;
        let mut score = w.base;

        if available + option.impact.time_change <= available * w.time_tolerance {
            score += w.time_fit;
        } else {
            score += w.time_overrun;
        }

        if ctx.confidence_level < 5 && option.impact.confidence_change > 0.0 {
            score += w.confidence_boost;
        }

        let skill_met = option
            .requirements
            .iter()
            .filter(|r| matches!(r, BranchRequirement::SkillAtLeast(_)))
            .all(|r| r.is_met(ctx));
        if skill_met {
            score += w.skill_fit;
        }

        score.clamp(0.0, 1.0)
    }

    pub fn reasoning(option: &BranchOption, ctx: &UserContext, score: f64) -> String {
        let mut reasons = Vec::new();
        if score > 0.7 {
            reasons.push("Highly recommended based on your current context");
        }
        if option.impact.time_change <= 0.0 {
            reasons.push("Fits within your time constraints");
        }
        if option.impact.confidence_change > 0.0 && ctx.confidence_level < 5 {
            reasons.push("Will help build your confidence");
        }
        if option.impact.quality_change > 0.0 {
            reasons.push("Expected to improve output quality");
        }
        reasons.join(". ")
    }

    pub fn timing(option: &BranchOption, ctx: &UserContext) -> BranchTiming {
        if ctx.time_available < 10 {
            BranchTiming::Immediate
        } else if option.impact.time_change > 0.0 && ctx.time_available > 30 {
            BranchTiming::WhenReady
        } else if ctx.stress_level > 7 {
            BranchTiming::Scheduled
        } else {
            BranchTiming::NextStep
        }
    }

    pub fn benefits(option: &BranchOption, ctx: &UserContext) -> Vec<String> {
        let mut benefits = option.benefits.clone();
        let wants_efficiency = ctx.active_goals.iter().any(|g| g.contains("efficiency"));
        if option.kind == BranchKind::Quick && wants_efficiency {
            benefits.push("aligns_with_efficiency_goals".to_string());
        }
        benefits
    }

    pub fn challenges(&self, option: &BranchOption, ctx: &UserContext) -> Vec<String> {
        let available = ctx.time_available as f64;
        let mut challenges = Vec::new();

        if option.impact.time_change > 0.0
            && available + option.impact.time_change > available * self.weights.time_tolerance
        {
            challenges.push("may_exceed_time_limit".to_string());
        }
        if option
            .skill_requirement()
            .is_some_and(|level| ctx.skill_level < level)
        {
            challenges.push("may_be_challenging".to_string());
        }
        if option.impact.difficulty_change > 0 && ctx.stress_level > 6 {
            challenges.push("added_complexity_under_stress".to_string());
        }
        challenges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, MatchWeights};
    use crate::domain::foundation::Purpose;
    use crate::domain::path::PathAssembler;
    use crate::domain::strategy::TemplateLibrary;

    fn path(ctx: &UserContext) -> ChoicePath {
        PathAssembler::new(AudienceCatalog::builtin(), TemplateLibrary::builtin(), MatchWeights::default(), 3)
            .assemble(Purpose::SolveProblems, ctx, None)
            .unwrap()
    }

    fn navigator() -> BranchNavigator {
        BranchNavigator::default()
    }

    // ───────────────────────────────────────────────────────────────
    // Options
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn standard_branch_is_always_offered() {
        let ctx = UserContext::default().with_time_available(45);
        let kinds: Vec<_> = BranchNavigator::options(&ctx).iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![BranchKind::Standard]);
    }

    #[test]
    fn short_time_and_expertise_add_branches() {
        let ctx = UserContext::default()
            .with_time_available(15)
            .with_skill_level(ExperienceLevel::Expert);
        let kinds: Vec<_> = BranchNavigator::options(&ctx).iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![BranchKind::Quick, BranchKind::Deep, BranchKind::Standard]);
    }

    // ───────────────────────────────────────────────────────────────
    // Scoring
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn quick_and_standard_score_the_same_on_fit() {
        let ctx = UserContext::default().with_time_available(15);
        assert!((navigator().score(&BranchOption::quick(), &ctx) - 0.8).abs() < 1e-9);
        assert!((navigator().score(&BranchOption::standard(), &ctx) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn deep_branch_overruns_short_time_but_boosts_low_confidence() {
        let ctx = UserContext::default()
            .with_time_available(20)
            .with_confidence_level(3)
            .with_skill_level(ExperienceLevel::Advanced);
        // 20 + 10 > 24: 0.5 - 0.1 + 0.15 + 0.1
        assert!((navigator().score(&BranchOption::deep(), &ctx) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn unmet_skill_requirement_forfeits_skill_fit() {
        let ctx = UserContext::default().with_time_available(60);
        let score = navigator().score(&BranchOption::deep(), &ctx);
        assert!((score - 0.7).abs() < 1e-9);
        assert_eq!(navigator().challenges(&BranchOption::deep(), &ctx), vec!["may_be_challenging"]);
    }

    #[test]
    fn custom_weights_change_scores() {
        let weights = BranchWeights {
            base: 0.9,
            ..BranchWeights::default()
        };
        let ctx = UserContext::default();
        assert_eq!(BranchNavigator::new(weights).score(&BranchOption::standard(), &ctx), 1.0);
    }

    #[test]
    fn recommendations_are_sorted_by_confidence() {
        let ctx = UserContext::default()
            .with_time_available(60)
            .with_skill_level(ExperienceLevel::Expert)
            .with_confidence_level(3);
        let current = path(&ctx);
        let navigation = navigator().navigate(&current, &ctx, &[]);

        let scores: Vec<f64> = navigation.recommendations.iter().map(|r| r.confidence).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(navigation.recommendations[0].kind, BranchKind::Deep);
        assert_eq!(navigation.current_path, current.id);
        assert!(navigation.recommendations.iter().all(|r| r.target_path == current.id));
    }

    // ───────────────────────────────────────────────────────────────
    // Reasoning, timing, benefits
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn reasoning_lists_fired_clauses() {
        let ctx = UserContext::default().with_confidence_level(3);
        let reason = BranchNavigator::reasoning(&BranchOption::deep(), &ctx, 0.85);
        assert_eq!(
            reason,
            "Highly recommended based on your current context. Will help build your confidence. Expected to improve output quality"
        );
        let reason = BranchNavigator::reasoning(&BranchOption::quick(), &ctx, 0.6);
        assert_eq!(reason, "Fits within your time constraints");
    }

    #[test]
    fn timing_rules() {
        let rushed = UserContext::default().with_time_available(5);
        assert_eq!(BranchNavigator::timing(&BranchOption::deep(), &rushed), BranchTiming::Immediate);

        let roomy = UserContext::default().with_time_available(45);
        assert_eq!(BranchNavigator::timing(&BranchOption::deep(), &roomy), BranchTiming::WhenReady);

        let stressed = UserContext::default().with_time_available(20).with_stress_level(9);
        assert_eq!(BranchNavigator::timing(&BranchOption::standard(), &stressed), BranchTiming::Scheduled);

        assert_eq!(
            BranchNavigator::timing(&BranchOption::standard(), &UserContext::default()),
            BranchTiming::NextStep
        );
    }

    #[test]
    fn efficiency_goals_align_with_quick_branch() {
        let ctx = UserContext::default().with_goal("improve_efficiency");
        let benefits = BranchNavigator::benefits(&BranchOption::quick(), &ctx);
        assert!(benefits.contains(&"aligns_with_efficiency_goals".to_string()));
        let benefits = BranchNavigator::benefits(&BranchOption::standard(), &ctx);
        assert!(!benefits.contains(&"aligns_with_efficiency_goals".to_string()));
    }

    #[test]
    fn stressed_user_is_warned_about_complexity() {
        let ctx = UserContext::default()
            .with_time_available(20)
            .with_stress_level(8)
            .with_skill_level(ExperienceLevel::Advanced);
        let challenges = navigator().challenges(&BranchOption::deep(), &ctx);
        assert_eq!(challenges, vec!["may_exceed_time_limit", "added_complexity_under_stress"]);
    }

    #[test]
    fn history_marks_successful_paths() {
        let ctx = UserContext::default();
        let mut earlier = path(&ctx);
        earlier.metadata.completion_rate = 0.9;
        let current = path(&ctx);
        let navigation = navigator().navigate(&current, &ctx, &[earlier.clone()]);
        assert_eq!(navigation.history.len(), 1);
        assert_eq!(navigation.history[0].path_id, earlier.id);
        assert!(navigation.history[0].success);
    }
}
