use async_trait::async_trait;
use anyhow::Result;

use crate::reporting::model::LeadReport;
use crate::reporting::formats::{ReportFormat, ReportGenerator};

/// JSON report generator
pub struct JsonReportGenerator;

impl JsonReportGenerator {
    /// Create a new JSON report generator
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportGenerator for JsonReportGenerator {
    fn render(&self, report: &LeadReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::reporting::model::LeadRecord;

    #[test]
    fn test_json_contains_records_and_summary() {
        let now = Utc::now();
        let report = LeadReport::new("Leads", vec![LeadRecord::failed("Globex", "timed out")], now, now);

        let json = JsonReportGenerator::new().render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Leads");
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["records"][0]["name"], "Globex");
        assert_eq!(value["records"][0]["status"], "FAILED");
    }
}
