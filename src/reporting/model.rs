use std::fmt;
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::pitch::{Pitch, PitchOrigin};
use crate::research::{normalize, ResearchResult, ResolvedTarget, SourceKind, NOT_FOUND};

/// Outcome status of one lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    /// Pitch grounded in scraped page content
    Success,
    /// Pitch written without page content
    SuccessInferred,
    /// Token timed out or its task crashed
    Failed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Success => "Success",
            LeadStatus::SuccessInferred => "Success (Inferred)",
            LeadStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-token result handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub website: String,
    pub contact: Option<String>,
    pub emails: Vec<String>,
    pub pitch: String,
    pub pitch_origin: PitchOrigin,
    pub status: LeadStatus,
    pub source_kind: Option<SourceKind>,
    /// Why the token failed, for `Failed` records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeadRecord {
    /// Assemble a record from a completed research and generation cycle
    pub fn build(target: &ResolvedTarget, research: &ResearchResult, pitch: Pitch) -> Self {
        let status = if research.source_kind.is_scraped() {
            LeadStatus::Success
        } else {
            LeadStatus::SuccessInferred
        };

        Self {
            name: target.display_name.clone(),
            website: target.target_url.clone(),
            contact: research.primary_contact.clone(),
            emails: research.extracted_emails.clone(),
            pitch: pitch.text,
            pitch_origin: pitch.origin,
            status,
            source_kind: Some(research.source_kind),
            error: None,
        }
    }

    /// Record for a token whose processing did not complete. The pitch is the
    /// template so the row is still usable.
    pub fn failed(token: &str, reason: impl Into<String>) -> Self {
        let target = normalize(token);
        let pitch = Pitch::template(&target.display_name);

        Self {
            name: target.display_name,
            website: target.target_url,
            contact: None,
            emails: Vec::new(),
            pitch: pitch.text,
            pitch_origin: pitch.origin,
            status: LeadStatus::Failed,
            source_kind: None,
            error: Some(reason.into()),
        }
    }

    /// Contact for display, or "Not Found"
    pub fn contact_or_sentinel(&self) -> &str {
        self.contact.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Batch report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadReport {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub summary: LeadSummary,
    pub records: Vec<LeadRecord>,
}

/// Batch summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadSummary {
    pub total: usize,
    pub succeeded: usize,
    pub inferred: usize,
    pub failed: usize,
    pub contacts_found: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_seconds: u64,
}

impl LeadSummary {
    pub fn from_records(records: &[LeadRecord], started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let count = |status: LeadStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            total: records.len(),
            succeeded: count(LeadStatus::Success),
            inferred: count(LeadStatus::SuccessInferred),
            failed: count(LeadStatus::Failed),
            contacts_found: records.iter().filter(|r| r.contact.is_some()).count(),
            started_at,
            finished_at,
            duration_seconds: (finished_at - started_at).num_seconds().max(0) as u64,
        }
    }
}

impl LeadReport {
    pub fn new(
        title: impl Into<String>,
        records: Vec<LeadRecord>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let summary = LeadSummary::from_records(&records, started_at, finished_at);

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: finished_at,
            summary,
            records,
        }
    }
}
