use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, debug};

use crate::config::Config;
use crate::engine::{BatchExecutor, LeadPipeline};
use crate::error::{LeadsmithError, LeadsmithResult};
use crate::reporting::{LeadReport, ReportFormat, ReportManager};

/// Command-line values that take precedence over the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub output_dir: Option<PathBuf>,
    pub formats: Vec<ReportFormat>,
    pub title: Option<String>,
    pub max_concurrent: Option<usize>,
    pub no_fetch: bool,
    /// Key passed explicitly on the command line
    pub api_key: Option<String>,
    /// Key from the `GEMINI_API_KEY` fallback, used only when nothing is configured
    pub env_api_key: Option<String>,
}

impl RunOverrides {
    /// Apply the overrides in place. An explicit key always wins; the
    /// environment fallback never replaces a configured key.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.report.output_dir = dir.clone();
        }
        if !self.formats.is_empty() {
            config.report.formats = self.formats.iter().map(|f| f.to_string()).collect();
        }
        if let Some(title) = &self.title {
            config.report.title = title.clone();
        }
        if let Some(max_concurrent) = self.max_concurrent {
            config.batch.max_concurrent = max_concurrent;
        }
        if self.no_fetch {
            config.fetch.enabled = false;
        }
        let non_empty = |key: &Option<String>| key.clone().filter(|k| !k.trim().is_empty());
        if let Some(key) = non_empty(&self.api_key) {
            config.generation.api_key = Some(key);
        } else if config.generation.api_key.is_none() {
            config.generation.api_key = non_empty(&self.env_api_key);
        }
    }
}

/// Result of one batch run
pub struct RunOutcome {
    pub report: LeadReport,
    pub report_paths: Vec<PathBuf>,
}

/// The main application struct
pub struct App {
    config: Config,
}

impl App {
    /// Create an application from an already-built configuration
    pub fn new(config: Config) -> LeadsmithResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load configuration and apply command-line overrides
    pub fn load(config_path: Option<&Path>, overrides: RunOverrides) -> LeadsmithResult<Self> {
        let mut config = Config::load(config_path)?;
        overrides.apply(&mut config);
        Self::new(config)
    }

    fn report_formats(&self) -> LeadsmithResult<Vec<ReportFormat>> {
        self.config
            .report
            .formats
            .iter()
            .map(|f| f.parse::<ReportFormat>().map_err(LeadsmithError::ConfigError))
            .collect()
    }

    /// Run every token through the pipeline and write the configured reports
    pub async fn run_batch(&self, tokens: Vec<String>) -> LeadsmithResult<RunOutcome> {
        info!("Starting leadsmith v{}", env!("CARGO_PKG_VERSION"));

        let formats = self.report_formats()?;
        let pipeline = LeadPipeline::from_config(&self.config)?;
        let executor = BatchExecutor::new(Arc::new(pipeline), &self.config.batch);

        let started_at = Utc::now();
        let records = executor.run(tokens).await;
        let report = LeadReport::new(&self.config.report.title, records, started_at, Utc::now());

        debug!("Report {} built with {} records", report.id, report.records.len());

        let report_paths = if formats.is_empty() {
            Vec::new()
        } else {
            ReportManager::new(self.config.report.output_dir.clone())
                .generate_multi_format(&report, &formats)
                .await
                .map_err(|e| LeadsmithError::ReportError(e.to_string()))?
        };

        Ok(RunOutcome { report, report_paths })
    }
}
