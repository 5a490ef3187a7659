//! Success metrics attached to every execution plan.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Purpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMethod {
    CompletionRate,
    ConfidenceScore,
    UserRating,
    OutcomeQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetric {
    pub name: String,
    pub description: String,
    pub measurement: MeasurementMethod,
    pub target: f64,
    pub weight: f64,
}

impl SuccessMetric {
    fn new(name: &str, description: &str, measurement: MeasurementMethod, target: f64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            measurement,
            target,
            weight,
        }
    }

    /// Completion rate and confidence level, then the purpose's own metric.
    pub fn for_purpose(purpose: Purpose) -> Vec<SuccessMetric> {
        vec![
            Self::new(
                "Completion Rate",
                "Percentage of execution steps completed",
                MeasurementMethod::CompletionRate,
                0.9,
                0.3,
            ),
            Self::new(
                "Confidence Level",
                "User confidence after execution",
                MeasurementMethod::ConfidenceScore,
                8.0,
                0.25,
            ),
            Self::purpose_metric(purpose),
        ]
    }

    fn purpose_metric(purpose: Purpose) -> SuccessMetric {
        use MeasurementMethod::{OutcomeQuality, UserRating};

        match purpose {
            Purpose::InformEducate => Self::new(
                "Information Clarity",
                "How clear and understandable the information was",
                UserRating,
                8.0,
                0.2,
            ),
            Purpose::PersuadeConvince => Self::new(
                "Persuasion Effectiveness",
                "How convincing the argument was",
                OutcomeQuality,
                7.0,
                0.25,
            ),
            Purpose::BuildRelationships => Self::new(
                "Relationship Quality",
                "Strength of the connection built",
                UserRating,
                8.0,
                0.3,
            ),
            Purpose::SolveProblems => Self::new(
                "Problem Resolution",
                "How effectively the problem was addressed",
                OutcomeQuality,
                8.0,
                0.25,
            ),
            Purpose::RequestSupport => Self::new(
                "Support Received",
                "Level of support obtained",
                OutcomeQuality,
                7.0,
                0.2,
            ),
            Purpose::InspireMotivate => Self::new(
                "Inspiration Impact",
                "How inspired and motivated the audience felt",
                UserRating,
                8.0,
                0.25,
            ),
            Purpose::EstablishAuthority => Self::new(
                "Authority Recognition",
                "How well expertise was recognized",
                UserRating,
                8.0,
                0.3,
            ),
            Purpose::CreateEngagement => Self::new(
                "Engagement Level",
                "How actively the audience participated",
                OutcomeQuality,
                8.0,
                0.25,
            ),
        }
    }
}
