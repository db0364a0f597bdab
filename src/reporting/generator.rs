use std::collections::HashMap;
use std::path::PathBuf;
use anyhow::Result;
use tracing::{info, debug, warn};

use super::model::LeadReport;
use super::formats::{ReportFormat, ReportGenerator, format_to_extension};
use super::formats::csv::CsvReportGenerator;
use super::formats::json::JsonReportGenerator;
use super::formats::markdown::MarkdownReportGenerator;

/// Report generation manager
pub struct ReportManager {
    generators: HashMap<ReportFormat, Box<dyn ReportGenerator>>,
    report_dir: PathBuf,
}

impl ReportManager {
    /// Create a new report manager
    pub fn new(report_dir: PathBuf) -> Self {
        let builtin: [Box<dyn ReportGenerator>; 3] = [
            Box::new(CsvReportGenerator::new()),
            Box::new(JsonReportGenerator::new()),
            Box::new(MarkdownReportGenerator::new()),
        ];

        let mut generators: HashMap<ReportFormat, Box<dyn ReportGenerator>> = HashMap::new();
        for generator in builtin {
            debug!("Registering report generator for format: {:?}", generator.supported_format());
            generators.insert(generator.supported_format(), generator);
        }

        Self {
            generators,
            report_dir,
        }
    }

    /// Render a report without writing it
    pub fn render(&self, report: &LeadReport, format: ReportFormat) -> Result<String> {
        self.generator(format)?.render(report)
    }

    fn generator(&self, format: ReportFormat) -> Result<&dyn ReportGenerator> {
        self.generators
            .get(&format)
            .map(|g| g.as_ref())
            .ok_or_else(|| anyhow::anyhow!("No generator found for format {:?}", format))
    }

    /// Generate a report in a specific format
    pub async fn generate_report(&self, report: &LeadReport, format: ReportFormat) -> Result<PathBuf> {
        // Ensure report directory exists
        if !self.report_dir.exists() {
            debug!("Creating report directory: {}", self.report_dir.display());
            tokio::fs::create_dir_all(&self.report_dir).await?;
        }

        let generator = self.generator(format)?;

        let filename = format!(
            "leads-{}-{}.{}",
            report.created_at.format("%Y%m%d-%H%M%S"),
            &report.id[..8.min(report.id.len())],
            format_to_extension(&format)
        );

        let output_path = self.report_dir.join(filename);

        info!("Generating report in format {:?} at {}", format, output_path.display());

        generator.generate(report, &output_path).await?;

        Ok(output_path)
    }

    /// Generate a report in multiple formats
    pub async fn generate_multi_format(&self, report: &LeadReport, formats: &[ReportFormat]) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for format in formats {
            match self.generate_report(report, *format).await {
                Ok(path) => {
                    paths.push(path);
                }
                Err(e) => {
                    warn!("Failed to generate report in format {:?}: {}", format, e);
                }
            }
        }

        if paths.is_empty() {
            return Err(anyhow::anyhow!("Failed to generate any reports"));
        }

        Ok(paths)
    }
}
