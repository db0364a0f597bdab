// src/pitch/generator.rs
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::{info, debug, warn};

use crate::config::{GenerationConfig, PitchConfig};
use crate::research::{ResearchResult, ResolvedTarget};
use super::backend::GenerationBackend;
use super::prompt::build_prompt;
use super::template::fallback_pitch;

/// Which step of the failover chain produced a pitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum PitchOrigin {
    Model(String),
    Template,
}

/// Outreach message for one lead. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    pub text: String,
    pub origin: PitchOrigin,
}

impl Pitch {
    /// Deterministic template pitch for `company`
    pub fn template(company: &str) -> Self {
        Self {
            text: fallback_pitch(company),
            origin: PitchOrigin::Template,
        }
    }

    pub fn is_template(&self) -> bool {
        self.origin == PitchOrigin::Template
    }
}

/// Writes pitches through a backend, with model failover and a template backstop
pub struct PitchGenerator {
    backend: Arc<dyn GenerationBackend>,
    models: Vec<String>,
    persona: PitchConfig,
}

impl PitchGenerator {
    /// Create a generator trying `primary_model`, then `fallback_model`
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        generation: &GenerationConfig,
        persona: PitchConfig,
    ) -> Self {
        let mut models = vec![generation.primary_model.clone()];
        if !generation.fallback_model.is_empty() && generation.fallback_model != generation.primary_model {
            models.push(generation.fallback_model.clone());
        }

        Self {
            backend,
            models,
            persona,
        }
    }

    /// Model identifiers in the order they are attempted
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Produce a pitch. Never fails and never returns empty text.
    pub async fn generate(&self, target: &ResolvedTarget, research: &ResearchResult) -> Pitch {
        let prompt = build_prompt(target, research, &self.persona);

        for model in &self.models {
            debug!("Requesting pitch for {} from model {}", target.display_name, model);

            match self.backend.generate(model, &prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!("Generated pitch for {} with {}", target.display_name, model);
                    return Pitch {
                        text: text.trim().to_string(),
                        origin: PitchOrigin::Model(model.clone()),
                    };
                }
                Ok(_) => {
                    warn!("Model {} returned an empty pitch for {}", model, target.display_name);
                }
                Err(e) if e.is_model_rejection() => {
                    warn!("Model {} rejected by backend: {}", model, e);
                }
                Err(e) if e.is_auth_failure() => {
                    warn!("Backend credential failure with model {}: {}", model, e);
                }
                Err(e) => {
                    warn!("Model {} failed for {}: {}", model, target.display_name, e);
                }
            }
        }

        warn!("All models failed for {}, using template pitch", target.display_name);
        Pitch::template(&target.display_name)
    }
}
