//! Audience scoring and diversity-constrained selection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AudienceArchetype, AudienceCatalog, Contextualizer, DiversityKey, DynamicAudience};
use crate::domain::context::UserContext;
use crate::domain::foundation::{ChoiceError, DecisionStyle, Purpose};

/// Number of audiences returned when the caller does not ask for a count.
pub const DEFAULT_AUDIENCE_COUNT: usize = 3;

/// Additive weights for archetype scoring.
///
/// The defaults reproduce the hand-tuned ordering; changing them is a
/// policy change, not a bug fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub exact_level: u32,
    pub adjacent_level: u32,
    pub exact_style: u32,
    /// Bucket within 5 minutes of the time available.
    pub time_close: u32,
    /// Bucket within 10 minutes of the time available.
    pub time_near: u32,
    /// Stress above 7 and the archetype decides quickly.
    pub stressed_quick_decider: u32,
    /// Stress below 4 and the archetype decides thoroughly.
    pub calm_thorough_decider: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            exact_level: 3,
            adjacent_level: 1,
            exact_style: 2,
            time_close: 2,
            time_near: 1,
            stressed_quick_decider: 1,
            calm_thorough_decider: 1,
        }
    }
}

/// An archetype with its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredArchetype<'a> {
    pub archetype: &'a AudienceArchetype,
    pub score: u32,
}

/// Scores archetypes against a context and picks a diverse top-K.
#[derive(Debug, Clone)]
pub struct AudienceMatcher<'a> {
    catalog: &'a AudienceCatalog,
    weights: MatchWeights,
}

impl<'a> AudienceMatcher<'a> {
    pub fn new(catalog: &'a AudienceCatalog, weights: MatchWeights) -> Self {
        Self { catalog, weights }
    }

    /// Scores one archetype.
    ///
    /// # Algorithm
    /// Sum of: exact level, adjacent level, exact style, time-bucket
    /// closeness, and the two stress/decision-style bonuses.
    ///
    /// # Edge Cases
    /// - No preferred style: the style term contributes 0
    /// - Confidence never contributes
    pub fn score(&self, archetype: &AudienceArchetype, ctx: &UserContext) -> u32 {
        let w = &self.weights;
        let mut score = 0;

        match archetype.experience_level.distance(&ctx.skill_level) {
            0 => score += w.exact_level,
            1 => score += w.adjacent_level,
            _ => {}
        }

        if ctx.preferred_communication_style == Some(archetype.communication_style) {
            score += w.exact_style;
        }

        let diff = archetype.time_constraint.minutes().abs_diff(ctx.time_available);
        if diff <= 5 {
            score += w.time_close;
        } else if diff <= 10 {
            score += w.time_near;
        }

        if ctx.stress_level > 7 && archetype.decision_style == DecisionStyle::QuickDecisive {
            score += w.stressed_quick_decider;
        }
        if ctx.stress_level < 4 && archetype.decision_style == DecisionStyle::ThoroughAnalytical {
            score += w.calm_thorough_decider;
        }

        score
    }

    /// All archetypes for the purpose, best first. Ties keep catalog order.
    pub fn rank(
        &self,
        purpose: Purpose,
        ctx: &UserContext,
    ) -> Result<Vec<ScoredArchetype<'a>>, ChoiceError> {
        let mut scored: Vec<ScoredArchetype<'a>> = self
            .catalog
            .archetypes_for(purpose)?
            .iter()
            .map(|archetype| ScoredArchetype {
                archetype,
                score: self.score(archetype, ctx),
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scored)
    }

    /// Greedy diverse pick over a ranked list.
    ///
    /// First pass keeps only archetypes whose `(style, level)` pair is new;
    /// the second pass back-fills by score when fewer than `k` pairs exist.
    pub fn select_diverse(
        ranked: &[ScoredArchetype<'a>],
        k: usize,
    ) -> Vec<&'a AudienceArchetype> {
        let mut selected: Vec<&'a AudienceArchetype> = Vec::with_capacity(k);
        let mut used_keys: HashSet<DiversityKey> = HashSet::new();
        let mut used_ids: HashSet<&str> = HashSet::new();

        for candidate in ranked {
            if selected.len() == k {
                break;
            }
            if used_keys.insert(DiversityKey::of(candidate.archetype)) {
                used_ids.insert(candidate.archetype.id.as_str());
                selected.push(candidate.archetype);
            }
        }

        for candidate in ranked {
            if selected.len() == k {
                break;
            }
            if used_ids.insert(candidate.archetype.id.as_str()) {
                selected.push(candidate.archetype);
            }
        }

        selected
    }

    /// Returns up to `k` contextualized audiences, most relevant first.
    ///
    /// # Errors
    /// `ChoiceError::UnknownPurpose` when the catalog has nothing for `purpose`.
    pub fn match_audiences(
        &self,
        purpose: Purpose,
        ctx: &UserContext,
        k: usize,
    ) -> Result<Vec<DynamicAudience>, ChoiceError> {
        let ranked = self.rank(purpose, ctx)?;
        tracing::debug!(
            purpose = purpose.as_str(),
            top = ranked.first().map(|s| s.archetype.id.as_str()).unwrap_or(""),
            top_score = ranked.first().map(|s| s.score).unwrap_or(0),
            "ranked audience archetypes"
        );

        Ok(Self::select_diverse(&ranked, k.max(1))
            .into_iter()
            .map(|archetype| Contextualizer::contextualize(archetype, purpose, ctx))
            .collect())
    }
}
