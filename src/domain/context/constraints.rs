//! Optional caller limits applied while building a path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Difficulty;

/// Limits the strategy and execution plan must respect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathConstraints {
    /// Upper bound on any variant timeline, in minutes.
    #[serde(default)]
    pub max_time: Option<u32>,

    #[serde(default)]
    pub difficulty_ceiling: Option<Difficulty>,

    /// Feature tags a template must carry (matched against field names and template ids).
    #[serde(default)]
    pub required_features: Vec<String>,

    /// Feature tags a template must not carry.
    #[serde(default)]
    pub excluded_features: Vec<String>,
}

impl PathConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_time(mut self, minutes: u32) -> Self {
        self.max_time = Some(minutes);
        self
    }

    pub fn with_difficulty_ceiling(mut self, ceiling: Difficulty) -> Self {
        self.difficulty_ceiling = Some(ceiling);
        self
    }

    pub fn requiring(mut self, feature: impl Into<String>) -> Self {
        self.required_features.push(feature.into());
        self
    }

    pub fn excluding(mut self, feature: impl Into<String>) -> Self {
        self.excluded_features.push(feature.into());
        self
    }

    /// Caps a duration by `max_time` when set.
    pub fn cap_minutes(&self, minutes: f64) -> f64 {
        match self.max_time {
            Some(max) => minutes.min(max as f64),
            None => minutes,
        }
    }
}
