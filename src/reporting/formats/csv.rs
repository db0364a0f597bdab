//! Spreadsheet-friendly CSV export.
//!
//! Output starts with a UTF-8 byte order mark, rows end in CRLF and fields are
//! quoted only when they contain a delimiter, quote or line break. Newlines in
//! the pitch are flattened to ` | ` so every lead stays on one row.

use async_trait::async_trait;
use anyhow::Result;
use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::reporting::model::{LeadRecord, LeadReport};
use crate::reporting::formats::{ReportFormat, ReportGenerator};

const BOM: &str = "\u{feff}";

pub const HEADER: [&str; 7] = [
    "Company",
    "Website",
    "Contact Email",
    "Generated Pitch",
    "Status",
    "Emails",
    "Source",
];

/// CSV report generator
pub struct CsvReportGenerator;

impl CsvReportGenerator {
    /// Create a new CSV report generator
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every line break in `text` with ` | `
pub fn flatten_lines(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn record_fields(record: &LeadRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.website.clone(),
        record.contact_or_sentinel().to_string(),
        flatten_lines(&record.pitch),
        record.status.to_string(),
        record.emails.join("; "),
        record.source_kind.map(|k| k.to_string()).unwrap_or_default(),
    ]
}

#[async_trait]
impl ReportGenerator for CsvReportGenerator {
    fn render(&self, report: &LeadReport) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(BOM.as_bytes().to_vec());

        writer.write_record(HEADER)?;
        for record in &report.records {
            writer.write_record(record_fields(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e.error()))?;

        Ok(String::from_utf8(bytes)?)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::pitch::PitchOrigin;
    use crate::reporting::model::LeadStatus;
    use crate::research::SourceKind;

    fn record(name: &str, pitch: &str) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            website: "https://example.com".to_string(),
            contact: Some("hi@example.com".to_string()),
            emails: vec!["hi@example.com".to_string(), "sales@example.com".to_string()],
            pitch: pitch.to_string(),
            pitch_origin: PitchOrigin::Template,
            status: LeadStatus::Success,
            source_kind: Some(SourceKind::Scraped),
            error: None,
        }
    }

    #[test]
    fn test_flatten_lines() {
        assert_eq!(flatten_lines("Subject: Hi\n\nBody\r\nBye\n"), "Subject: Hi |  | Body | Bye");
    }

    #[test]
    fn test_render_layout() {
        let now = Utc::now();
        let report = LeadReport::new(
            "Leads",
            vec![record("Acme, Inc", "Hi \"Acme\"\nLet's talk")],
            now,
            now,
        );

        let csv = CsvReportGenerator::new().render(&report).unwrap();

        assert!(csv.starts_with('\u{feff}'));
        let body = csv.trim_start_matches('\u{feff}');
        let rows: Vec<&str> = body.split("\r\n").collect();

        assert_eq!(rows[0], "Company,Website,Contact Email,Generated Pitch,Status,Emails,Source");
        assert_eq!(
            rows[1],
            "\"Acme, Inc\",https://example.com,hi@example.com,\"Hi \"\"Acme\"\" | Let's talk\",Success,hi@example.com; sales@example.com,SCRAPED"
        );
        assert_eq!(rows[2], "");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_output_reads_back_as_csv() {
        let now = Utc::now();
        let mut multi = record("Initech", "Line one\nLine \"two\", three");
        multi.emails = vec!["a@initech.com".to_string()];
        let report = LeadReport::new("Leads", vec![record("Acme, Inc", "Hi"), multi], now, now);

        let csv = CsvReportGenerator::new().render(&report).unwrap();
        let mut reader = ::csv::Reader::from_reader(csv.trim_start_matches('\u{feff}').as_bytes());

        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), HEADER.to_vec());
        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Acme, Inc");
        assert_eq!(&rows[1][3], "Line one | Line \"two\", three");
        assert_eq!(&rows[1][5], "a@initech.com");
    }

    #[test]
    fn test_missing_contact_renders_sentinel() {
        let mut r = record("Globex", "Hi");
        r.contact = None;
        r.status = LeadStatus::SuccessInferred;
        r.source_kind = Some(SourceKind::Unreachable);

        let fields = record_fields(&r);
        assert_eq!(fields[2], "Not Found");
        assert_eq!(fields[4], "Success (Inferred)");
        assert_eq!(fields[6], "UNREACHABLE");
    }
}
