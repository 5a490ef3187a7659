//! Purpose enum representing the eight communication goals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ChoiceError;

/// The communicative goal a user selects before a path is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    InformEducate,
    PersuadeConvince,
    BuildRelationships,
    SolveProblems,
    RequestSupport,
    InspireMotivate,
    EstablishAuthority,
    CreateEngagement,
}

impl Purpose {
    /// Returns all purposes in canonical order.
    pub fn all() -> &'static [Purpose] {
        &[
            Purpose::InformEducate,
            Purpose::PersuadeConvince,
            Purpose::BuildRelationships,
            Purpose::SolveProblems,
            Purpose::RequestSupport,
            Purpose::InspireMotivate,
            Purpose::EstablishAuthority,
            Purpose::CreateEngagement,
        ]
    }

    /// Returns the snake_case key used in catalogs and tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::InformEducate => "inform_educate",
            Purpose::PersuadeConvince => "persuade_convince",
            Purpose::BuildRelationships => "build_relationships",
            Purpose::SolveProblems => "solve_problems",
            Purpose::RequestSupport => "request_support",
            Purpose::InspireMotivate => "inspire_motivate",
            Purpose::EstablishAuthority => "establish_authority",
            Purpose::CreateEngagement => "create_engagement",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Purpose::InformEducate => "Inform & Educate",
            Purpose::PersuadeConvince => "Persuade & Convince",
            Purpose::BuildRelationships => "Build Relationships",
            Purpose::SolveProblems => "Solve Problems",
            Purpose::RequestSupport => "Request Support",
            Purpose::InspireMotivate => "Inspire & Motivate",
            Purpose::EstablishAuthority => "Establish Authority",
            Purpose::CreateEngagement => "Create Engagement",
        }
    }

    /// Returns the situation this purpose frames, used in audience descriptions.
    pub fn context_phrase(&self) -> &'static str {
        match self {
            Purpose::InformEducate => "learning and knowledge sharing",
            Purpose::PersuadeConvince => "decision-making and influence",
            Purpose::BuildRelationships => "relationship building and networking",
            Purpose::SolveProblems => "problem-solving and resolution",
            Purpose::RequestSupport => "seeking assistance and collaboration",
            Purpose::InspireMotivate => "motivation and inspiration",
            Purpose::EstablishAuthority => "credibility and thought leadership",
            Purpose::CreateEngagement => "audience engagement and participation",
        }
    }

    /// Base complexity used when grading path difficulty.
    pub fn complexity(&self) -> u8 {
        match self {
            Purpose::InformEducate | Purpose::RequestSupport => 1,
            Purpose::CreateEngagement | Purpose::BuildRelationships | Purpose::SolveProblems => 2,
            Purpose::InspireMotivate | Purpose::PersuadeConvince | Purpose::EstablishAuthority => 3,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Purpose {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Purpose::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| ChoiceError::UnknownPurpose(s.to_string()))
    }
}
