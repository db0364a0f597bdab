// src/reporting/formats/markdown.rs
use async_trait::async_trait;
use anyhow::Result;

use crate::reporting::model::{LeadRecord, LeadReport};
use crate::reporting::formats::{ReportFormat, ReportGenerator};

/// Markdown report generator
pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    /// Create a new Markdown report generator
    pub fn new() -> Self {
        Self
    }

    fn render_summary(&self, report: &LeadReport, md: &mut String) {
        let summary = &report.summary;

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Leads:** {}\n", summary.total));
        md.push_str(&format!("- **Researched from website:** {}\n", summary.succeeded));
        md.push_str(&format!("- **Inferred:** {}\n", summary.inferred));
        md.push_str(&format!("- **Failed:** {}\n", summary.failed));
        md.push_str(&format!("- **Contacts found:** {}\n", summary.contacts_found));
        md.push_str(&format!("- **Duration:** {} seconds\n\n", summary.duration_seconds));
    }

    fn render_record(&self, index: usize, record: &LeadRecord, md: &mut String) {
        md.push_str(&format!("## {}. {}\n\n", index + 1, record.name));
        md.push_str(&format!("- **Website:** {}\n", record.website));
        md.push_str(&format!("- **Contact:** {}\n", record.contact_or_sentinel()));
        md.push_str(&format!("- **Status:** {}\n", record.status));

        if let Some(kind) = record.source_kind {
            md.push_str(&format!("- **Source:** {}\n", kind));
        }
        if record.emails.len() > 1 {
            md.push_str(&format!("- **Other emails:** {}\n", record.emails[1..].join(", ")));
        }
        if let Some(error) = &record.error {
            md.push_str(&format!("- **Error:** {}\n", error));
        }

        md.push_str("\n```text\n");
        md.push_str(record.pitch.trim());
        md.push_str("\n```\n\n");
    }
}

impl Default for MarkdownReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportGenerator for MarkdownReportGenerator {
    fn render(&self, report: &LeadReport) -> Result<String> {
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", report.title));
        md.push_str(&format!(
            "Generated: {}\n\n",
            report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        self.render_summary(report, &mut md);

        for (index, record) in report.records.iter().enumerate() {
            self.render_record(index, record, &mut md);
        }

        Ok(md)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_markdown_has_section_per_lead() {
        let now = Utc::now();
        let report = LeadReport::new(
            "Outreach Leads",
            vec![
                LeadRecord::failed("Globex", "timed out"),
                LeadRecord::failed("initech.com", "panicked"),
            ],
            now,
            now,
        );

        let md = MarkdownReportGenerator::new().render(&report).unwrap();

        assert!(md.starts_with("# Outreach Leads"));
        assert!(md.contains("## 1. Globex"));
        assert!(md.contains("## 2. Initech"));
        assert!(md.contains("- **Contact:** Not Found"));
        assert!(md.contains("- **Failed:** 2"));
        assert!(md.contains("- **Error:** panicked"));
    }
}
