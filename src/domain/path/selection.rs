//! Picks the best of several candidate paths for a context.

use serde::{Deserialize, Serialize};

use super::ChoicePath;
use crate::domain::context::UserContext;
use crate::domain::foundation::{ChoiceError, Difficulty};

/// Maximum number of runner-up paths returned with a selection.
pub const MAX_ALTERNATIVES: usize = 3;

const TIME_FIT_WEIGHT: f64 = 0.3;
const SKILL_FIT_WEIGHT: f64 = 0.3;
const SUPPORT_WEIGHT: f64 = 0.2;

/// A caller-weighted tag the selected path should carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityFactor {
    pub tag: String,
    pub weight: f64,
}

impl PriorityFactor {
    pub fn new(tag: impl Into<String>, weight: f64) -> Self {
        Self {
            tag: tag.into(),
            weight: sanitized_weight(weight),
        }
    }
}

/// Negative and non-finite weights count as zero.
fn sanitized_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// One weighted contribution to a path's selection score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionFactor {
    pub factor: String,
    pub weight: f64,
    /// 0.0 to 1.0.
    pub impact: f64,
    pub description: String,
}

impl SelectionFactor {
    fn contribution(&self) -> f64 {
        self.weight * self.impact
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSelection {
    pub selected: ChoicePath,
    pub alternatives: Vec<ChoicePath>,
    pub reason: String,
    /// 0.0 to 1.0.
    pub confidence: f64,
    pub factors: Vec<SelectionFactor>,
}

/// Deterministic path scoring.
pub struct PathSelector;

impl PathSelector {
    /// Selects the highest scoring path.
    ///
    /// # Algorithm
    /// 1. Score each path by its selection factors
    /// 2. Stable sort descending, so earlier candidates win ties
    /// 3. Return the winner, up to three alternatives and the winner's factors
    ///
    /// # Errors
    /// `ChoiceError::NoCandidatePaths` when `paths` is empty.
    pub fn select(
        paths: Vec<ChoicePath>,
        ctx: &UserContext,
        priorities: &[PriorityFactor],
    ) -> Result<PathSelection, ChoiceError> {
        let mut scored: Vec<(ChoicePath, Vec<SelectionFactor>, f64)> = paths
            .into_iter()
            .map(|path| {
                let factors = Self::factors(&path, ctx, priorities);
                let score = factors.iter().map(SelectionFactor::contribution).sum();
                (path, factors, score)
            })
            .collect();
        scored.sort_by(|a, b| b.2.total_cmp(&a.2));

        let mut ranked = scored.into_iter();
        let (selected, factors, _) = ranked.next().ok_or(ChoiceError::NoCandidatePaths)?;
        let alternatives = ranked.take(MAX_ALTERNATIVES).map(|(path, _, _)| path).collect();

        Ok(PathSelection {
            reason: Self::reason(&selected, &factors),
            confidence: Self::confidence(&factors),
            selected,
            alternatives,
            factors,
        })
    }

    /// Time fit, skill fit, support coverage when confidence is low, then
    /// one factor per priority.
    pub fn factors(path: &ChoicePath, ctx: &UserContext, priorities: &[PriorityFactor]) -> Vec<SelectionFactor> {
        let mut factors = Vec::with_capacity(3 + priorities.len());

        let available = ctx.time_available as f64;
        let needed = path
            .execution
            .balanced()
            .map(|v| v.timeline.total_minutes)
            .unwrap_or(available);
        let time_impact = if needed <= available || needed <= 0.0 {
            1.0
        } else {
            available / needed
        };
        factors.push(SelectionFactor {
            factor: "time_fit".to_string(),
            weight: TIME_FIT_WEIGHT,
            impact: time_impact,
            description: "fits the time you have".to_string(),
        });

        let gap = difficulty_rank(path.metadata.difficulty).abs_diff(ctx.skill_level.rank());
        factors.push(SelectionFactor {
            factor: "skill_fit".to_string(),
            weight: SKILL_FIT_WEIGHT,
            impact: 1.0 - gap as f64 / 3.0,
            description: "matches your skill level".to_string(),
        });

        if ctx.confidence_level < 5 {
            let support = &path.execution.confidence_support;
            let covered = !support.preparation.is_empty() || !support.interventions.is_empty();
            factors.push(SelectionFactor {
                factor: "confidence_support".to_string(),
                weight: SUPPORT_WEIGHT,
                impact: if covered { 1.0 } else { 0.0 },
                description: "includes confidence support".to_string(),
            });
        }

        for priority in priorities {
            let matched = path.metadata.has_tag(&priority.tag);
            factors.push(SelectionFactor {
                factor: priority.tag.clone(),
                weight: sanitized_weight(priority.weight),
                impact: if matched { 1.0 } else { 0.0 },
                description: format!("matches your priority '{}'", priority.tag),
            });
        }

        factors
    }

    /// Share of the available weight the path earned, 0 when no weight.
    pub fn confidence(factors: &[SelectionFactor]) -> f64 {
        let total: f64 = factors.iter().map(|f| f.weight).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let earned: f64 = factors.iter().map(SelectionFactor::contribution).sum();
        (earned / total).clamp(0.0, 1.0)
    }

    fn reason(path: &ChoicePath, factors: &[SelectionFactor]) -> String {
        let strongest = factors
            .iter()
            .filter(|f| f.contribution() > 0.0)
            .max_by(|a, b| a.contribution().total_cmp(&b.contribution()));
        match strongest {
            Some(f) => format!("Selected {} because it {}", path.strategy.name, f.description),
            None => format!("Selected {} based on your context", path.strategy.name),
        }
    }
}

fn difficulty_rank(difficulty: Difficulty) -> u8 {
    match difficulty {
        Difficulty::Easy => 1,
        Difficulty::Medium => 2,
        Difficulty::Hard => 3,
        Difficulty::Expert => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceCatalog, MatchWeights};
    use crate::domain::foundation::{ErrorCode, ExperienceLevel, Purpose};
    use crate::domain::path::PathAssembler;
    use crate::domain::strategy::TemplateLibrary;

    fn path(purpose: Purpose, ctx: &UserContext) -> ChoicePath {
        PathAssembler::new(AudienceCatalog::builtin(), TemplateLibrary::builtin(), MatchWeights::default(), 3)
            .assemble(purpose, ctx, None)
            .unwrap()
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let err = PathSelector::select(Vec::new(), &UserContext::default(), &[]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoCandidatePaths);
    }

    #[test]
    fn priority_tags_decide_between_equal_paths() {
        let ctx = UserContext::default();
        let inform = path(Purpose::InformEducate, &ctx);
        let engage = path(Purpose::CreateEngagement, &ctx);
        let priorities = [PriorityFactor::new("create_engagement", 1.0)];

        let selection = PathSelector::select(vec![inform.clone(), engage.clone()], &ctx, &priorities).unwrap();
        assert_eq!(selection.selected.id, engage.id);
        assert_eq!(selection.alternatives.len(), 1);
        assert_eq!(selection.alternatives[0].id, inform.id);
        assert!(selection.reason.contains("create_engagement"));
    }

    #[test]
    fn alternatives_are_capped() {
        let ctx = UserContext::default();
        let paths: Vec<_> = Purpose::all().iter().map(|p| path(*p, &ctx)).collect();
        let selection = PathSelector::select(paths, &ctx, &[]).unwrap();
        assert_eq!(selection.alternatives.len(), MAX_ALTERNATIVES);
        assert!(selection.confidence > 0.0 && selection.confidence <= 1.0);
    }

    #[test]
    fn low_confidence_adds_support_factor() {
        let ctx = UserContext::default().with_confidence_level(2);
        let candidate = path(Purpose::RequestSupport, &ctx);
        let factors = PathSelector::factors(&candidate, &ctx, &[]);
        let support = factors.iter().find(|f| f.factor == "confidence_support").unwrap();
        assert_eq!(support.impact, 1.0);
    }

    #[test]
    fn skill_gap_lowers_fit() {
        let ctx = UserContext::default().with_skill_level(ExperienceLevel::Expert);
        let candidate = path(Purpose::InformEducate, &ctx);
        let factors = PathSelector::factors(&candidate, &ctx, &[]);
        let skill = factors.iter().find(|f| f.factor == "skill_fit").unwrap();
        assert!(skill.impact < 1.0);
    }

    #[test]
    fn non_finite_priority_weights_count_as_zero() {
        let ctx = UserContext::default();
        let candidate = path(Purpose::InformEducate, &ctx);
        let priorities = [
            PriorityFactor { tag: "inform_educate".to_string(), weight: f64::NAN },
            PriorityFactor { tag: "solve_problems".to_string(), weight: f64::INFINITY },
            PriorityFactor::new("build_relationships", -2.0),
        ];

        let factors = PathSelector::factors(&candidate, &ctx, &priorities);
        assert!(factors.iter().all(|f| f.weight.is_finite() && f.weight >= 0.0));

        let selection = PathSelector::select(vec![candidate], &ctx, &priorities).unwrap();
        assert!(selection.confidence.is_finite());
        assert!((0.0..=1.0).contains(&selection.confidence));
    }

    #[test]
    fn confidence_is_zero_without_weight() {
        assert_eq!(PathSelector::confidence(&[]), 0.0);
    }
}
