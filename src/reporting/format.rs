use std::fmt;
use std::path::Path;
use std::str::FromStr;
use async_trait::async_trait;
use anyhow::Result;
use serde::{Serialize, Deserialize};

use super::model::LeadReport;

/// Report format enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

/// Report generator trait
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Render the report to a string
    fn render(&self, report: &LeadReport) -> Result<String>;

    /// Generate a report at `output_path`
    async fn generate(&self, report: &LeadReport, output_path: &Path) -> Result<()> {
        let content = self.render(report)?;
        tokio::fs::write(output_path, content).await?;
        Ok(())
    }

    /// Get the supported format
    fn supported_format(&self) -> ReportFormat;
}

/// Convert report format to file extension
pub fn format_to_extension(format: &ReportFormat) -> &'static str {
    match format {
        ReportFormat::Csv => "csv",
        ReportFormat::Json => "json",
        ReportFormat::Markdown => "md",
    }
}

/// Convert file extension or format name to report format
pub fn extension_to_format(extension: &str) -> Option<ReportFormat> {
    match extension.trim().to_lowercase().as_str() {
        "csv" => Some(ReportFormat::Csv),
        "json" => Some(ReportFormat::Json),
        "md" | "markdown" => Some(ReportFormat::Markdown),
        _ => None,
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        extension_to_format(s).ok_or_else(|| format!("unknown report format '{}' (expected csv, json or md)", s))
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(format_to_extension(self))
    }
}
