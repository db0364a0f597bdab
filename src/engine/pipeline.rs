// src/engine/pipeline.rs
use std::sync::Arc;
use tracing::{info, debug};

use crate::config::Config;
use crate::error::LeadsmithResult;
use crate::pitch::{GeminiBackend, GenerationBackend, PitchGenerator};
use crate::reporting::LeadRecord;
use crate::research::{PageFetcher, ResearchResolver, SiteFetcher};

/// Runs one token through research, generation and record assembly
pub struct LeadPipeline {
    resolver: ResearchResolver,
    generator: PitchGenerator,
}

impl LeadPipeline {
    pub fn new(resolver: ResearchResolver, generator: PitchGenerator) -> Self {
        Self { resolver, generator }
    }

    /// Wire the HTTP fetcher and the Gemini backend from configuration
    pub fn from_config(config: &Config) -> LeadsmithResult<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(SiteFetcher::new(&config.fetch)?);
        let backend: Arc<dyn GenerationBackend> = Arc::new(GeminiBackend::new(&config.generation)?);

        if config.generation.api_key.is_none() {
            info!("No generation API key configured, pitches will use the template");
        }

        Ok(Self::with_components(config, fetcher, backend))
    }

    /// Build a pipeline around caller-supplied fetcher and backend
    pub fn with_components(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        let resolver = ResearchResolver::new(fetcher, config.fetch.max_text_chars, config.fetch.enabled);
        let generator = PitchGenerator::new(backend, &config.generation, config.pitch.clone());
        Self::new(resolver, generator)
    }

    /// Process one token. Never fails.
    pub async fn process(&self, token: &str) -> LeadRecord {
        let (target, research) = self.resolver.research(token).await;
        debug!("Research for {} finished as {}", target.display_name, research.source_kind);

        let pitch = self.generator.generate(&target, &research).await;
        let record = LeadRecord::build(&target, &research, pitch);

        info!("{}: {} (contact: {})", record.name, record.status, record.contact_or_sentinel());
        record
    }
}
