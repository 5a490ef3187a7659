//! ExampleEnricher - Best-effort generated examples for narrative phases.
//!
//! One prompt per phase, sent concurrently, each under its own timeout.
//! A phase whose request fails or times out keeps its static example and
//! reports a `DegradedEnrichment` warning. Enrichment never fails a call.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::domain::foundation::PathId;
use crate::domain::path::ChoicePath;
use crate::domain::strategy::{NarrativeKind, NarrativePhase};
use crate::ports::{TextGenerationError, TextGenerator};

/// Default per-phase timeout.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Example text for one narrative phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedExample {
    pub phase_id: String,
    pub phase_name: String,
    pub example: String,
    /// False when `example` is the static fallback.
    pub generated: bool,
}

/// Warning that a phase fell back to its static example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedEnrichment {
    pub phase_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedExamples {
    pub path_id: PathId,
    pub narrative: NarrativeKind,
    /// In narrative order.
    pub examples: Vec<EnrichedExample>,
    pub warnings: Vec<DegradedEnrichment>,
}

impl EnrichedExamples {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Asks a `TextGenerator` for phase examples.
#[derive(Clone)]
pub struct ExampleEnricher {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ExampleEnricher {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// An enricher that always returns the static examples.
    pub fn disabled() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn enrich(&self, path: &ChoicePath) -> EnrichedExamples {
        let narrative = &path.strategy.framework.narrative;
        let phases = narrative.phases();

        let Some(generator) = &self.generator else {
            return EnrichedExamples {
                path_id: path.id,
                narrative: narrative.kind(),
                examples: phases.iter().map(|phase| static_example(phase)).collect(),
                warnings: Vec::new(),
            };
        };

        let requests = phases.iter().map(|phase| {
            let prompt = Self::prompt(path, phase);
            async move { self.generate(generator.as_ref(), &prompt).await }
        });
        let outcomes = join_all(requests).await;

        let mut examples = Vec::with_capacity(phases.len());
        let mut warnings = Vec::new();
        for (phase, outcome) in phases.iter().zip(outcomes) {
            match outcome {
                Ok(text) => examples.push(EnrichedExample {
                    phase_id: phase.id.clone(),
                    phase_name: phase.name.clone(),
                    example: text,
                    generated: true,
                }),
                Err(err) => {
                    tracing::warn!(
                        path_id = %path.id,
                        phase = %phase.id,
                        error = %err,
                        "example enrichment degraded, using static example"
                    );
                    warnings.push(DegradedEnrichment {
                        phase_id: phase.id.clone(),
                        reason: err.to_string(),
                    });
                    examples.push(static_example(phase));
                }
            }
        }

        EnrichedExamples {
            path_id: path.id,
            narrative: narrative.kind(),
            examples,
            warnings,
        }
    }

    async fn generate(&self, generator: &dyn TextGenerator, prompt: &str) -> Result<String, TextGenerationError> {
        match timeout(self.timeout, generator.generate(prompt)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(TextGenerationError::EmptyResponse),
            Ok(result) => result,
            Err(_) => Err(TextGenerationError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    /// The prompt sent for one phase.
    pub fn prompt(path: &ChoicePath, phase: &NarrativePhase) -> String {
        format!(
            "Write a short, concrete example for the \"{}\" phase of a {} aimed at {}. \
             Purpose: {}. Phase goal: {}. Guidance: {} {} {} \
             Reply with the example only, in under 80 words.",
            phase.name,
            path.strategy.framework.narrative.name(),
            path.audience.label,
            path.purpose,
            phase.description,
            phase.guidance,
            phase.purpose_specific,
            phase.audience_specific,
        )
    }
}

fn static_example(phase: &NarrativePhase) -> EnrichedExample {
    EnrichedExample {
        phase_id: phase.id.clone(),
        phase_name: phase.name.clone(),
        example: phase.example.clone(),
        generated: false,
    }
}
