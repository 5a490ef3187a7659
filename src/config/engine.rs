//! Engine tuning configuration

use serde::Deserialize;

use super::error::ConfigValidationError;
use crate::domain::audience::{MatchWeights, DEFAULT_AUDIENCE_COUNT};
use crate::domain::path::BranchWeights;

/// Largest audience count accepted from configuration.
pub const MAX_AUDIENCE_COUNT: usize = 10;

/// Scoring and selection settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Audiences per path (primary plus alternates)
    pub audience_count: usize,

    /// Archetype scoring weights
    pub match_weights: MatchWeights,

    /// Branch scoring weights
    pub branch_weights: BranchWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audience_count: DEFAULT_AUDIENCE_COUNT,
            match_weights: MatchWeights::default(),
            branch_weights: BranchWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.audience_count == 0 || self.audience_count > MAX_AUDIENCE_COUNT {
            return Err(ConfigValidationError::InvalidAudienceCount {
                max: MAX_AUDIENCE_COUNT,
                actual: self.audience_count,
            });
        }

        let w = &self.branch_weights;
        for (name, value) in [
            ("base", w.base),
            ("time_fit", w.time_fit),
            ("time_overrun", w.time_overrun),
            ("confidence_boost", w.confidence_boost),
            ("skill_fit", w.skill_fit),
            ("time_tolerance", w.time_tolerance),
        ] {
            if !value.is_finite() {
                return Err(ConfigValidationError::InvalidBranchWeight(name));
            }
        }
        if w.time_tolerance <= 0.0 {
            return Err(ConfigValidationError::InvalidTimeTolerance);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.audience_count, 3);
        assert_eq!(config.match_weights.exact_level, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_audience_count_bounds() {
        let zero = EngineConfig {
            audience_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigValidationError::InvalidAudienceCount { actual: 0, .. })
        ));

        let many = EngineConfig {
            audience_count: 11,
            ..Default::default()
        };
        assert!(many.validate().is_err());
    }

    #[test]
    fn test_branch_weight_validation() {
        let mut config = EngineConfig::default();
        config.branch_weights.skill_fit = f64::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidBranchWeight("skill_fit"))
        );

        let mut config = EngineConfig::default();
        config.branch_weights.time_tolerance = 0.0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeTolerance));
    }
}
