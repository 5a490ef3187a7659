//! Composes audience, strategy and execution into a `ChoicePath`.

use super::{ChoicePath, PathMetadata};
use crate::domain::audience::{AudienceCatalog, AudienceMatcher, DynamicAudience, MatchWeights};
use crate::domain::context::{PathConstraints, UserContext};
use crate::domain::execution::ExecutionPlanner;
use crate::domain::foundation::{
    ChoiceError, DecisionStyle, Difficulty, ExperienceLevel, PathId, Purpose,
};
use crate::domain::strategy::{OpeningApproach, PathSpecificStrategy, StrategyAdapter, TemplateLibrary};

/// Tag added when the computed difficulty is above the caller's ceiling.
pub const EXCEEDS_CEILING_TAG: &str = "exceeds_difficulty_ceiling";

/// Runs matcher, strategy adapter and planner in dependency order.
#[derive(Debug, Clone)]
pub struct PathAssembler<'a> {
    matcher: AudienceMatcher<'a>,
    strategies: StrategyAdapter<'a>,
    audience_count: usize,
}

impl<'a> PathAssembler<'a> {
    pub fn new(
        catalog: &'a AudienceCatalog,
        templates: &'a TemplateLibrary,
        weights: MatchWeights,
        audience_count: usize,
    ) -> Self {
        Self {
            matcher: AudienceMatcher::new(catalog, weights),
            strategies: StrategyAdapter::new(templates),
            audience_count,
        }
    }

    /// Builds a new path. The primary audience is the best match; the rest
    /// become alternates.
    ///
    /// # Errors
    /// `ChoiceError::UnknownPurpose` when the catalog has no archetypes for `purpose`.
    pub fn assemble(
        &self,
        purpose: Purpose,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> Result<ChoicePath, ChoiceError> {
        let mut audiences = self
            .matcher
            .match_audiences(purpose, ctx, self.audience_count)?
            .into_iter();
        let audience = audiences
            .next()
            .ok_or_else(|| ChoiceError::UnknownPurpose(purpose.as_str().to_string()))?;
        let alternate_audiences: Vec<DynamicAudience> = audiences.collect();

        let strategy = self.strategies.adapt(purpose, &audience, ctx, constraints);
        let execution = ExecutionPlanner::plan(purpose, &audience, &strategy, ctx, constraints);
        let metadata = Self::metadata(purpose, &audience, &strategy, ctx, constraints);

        Ok(ChoicePath {
            id: PathId::new(),
            adapted_from: None,
            user_id: ctx.user_id.clone(),
            purpose,
            audience,
            alternate_audiences,
            strategy,
            execution,
            metadata,
        })
    }

    pub fn metadata(
        purpose: Purpose,
        audience: &DynamicAudience,
        strategy: &PathSpecificStrategy,
        ctx: &UserContext,
        constraints: Option<&PathConstraints>,
    ) -> PathMetadata {
        let difficulty = Self::difficulty(purpose, audience, ctx);

        let mut tags = vec![
            purpose.as_str().to_string(),
            audience.demographics.role.clone(),
            opening_tag(strategy.framework.structure.opening).to_string(),
        ];
        let ceiling = constraints.and_then(|c| c.difficulty_ceiling);
        if ceiling.is_some_and(|ceiling| difficulty > ceiling) {
            tags.push(EXCEEDS_CEILING_TAG.to_string());
        }

        PathMetadata::new(difficulty, tags, Self::prerequisites(purpose, ctx))
    }

    /// Purpose complexity plus one point each for a thorough audience, an
    /// expert audience, stress above 7 and less than ten minutes.
    pub fn difficulty(purpose: Purpose, audience: &DynamicAudience, ctx: &UserContext) -> Difficulty {
        let mut score = purpose.complexity();
        if audience.decision_style() == DecisionStyle::ThoroughAnalytical {
            score += 1;
        }
        if audience.experience_level() == ExperienceLevel::Expert {
            score += 1;
        }
        if ctx.stress_level > 7 {
            score += 1;
        }
        if ctx.time_available < 10 {
            score += 1;
        }
        Difficulty::from_score(score)
    }

    pub fn prerequisites(purpose: Purpose, ctx: &UserContext) -> Vec<String> {
        let mut prerequisites = Vec::new();
        if ctx.skill_level == ExperienceLevel::Beginner {
            prerequisites.push("basic_communication_skills".to_string());
        }
        if purpose == Purpose::EstablishAuthority && ctx.skill_level != ExperienceLevel::Expert {
            prerequisites.push("expertise_in_domain".to_string());
        }
        if purpose == Purpose::PersuadeConvince {
            prerequisites.push("understanding_audience_needs".to_string());
        }
        prerequisites
    }
}

fn opening_tag(opening: OpeningApproach) -> &'static str {
    match opening {
        OpeningApproach::Direct => "direct",
        OpeningApproach::Warm => "warm",
        OpeningApproach::Question => "question",
        OpeningApproach::Story => "story",
        OpeningApproach::Statistic => "statistic",
        OpeningApproach::ProblemStatement => "problem_statement",
    }
}
