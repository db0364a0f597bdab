// src/research/resolver.rs
use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::{info, debug};

use super::contacts::{self, NOT_FOUND};
use super::extractor;
use super::fetcher::{FetchOutcome, PageFetcher};
use super::normalizer::{self, ResolvedTarget};

/// Where the research text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    /// Real page content
    Scraped,
    /// Site refused automated access
    Blocked,
    /// Site could not be reached
    Unreachable,
    /// Fetching disabled; only the company name is known
    NameOnly,
}

impl SourceKind {
    /// True when `raw_text` is real page content
    pub fn is_scraped(&self) -> bool {
        matches!(self, SourceKind::Scraped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Scraped => "SCRAPED",
            SourceKind::Blocked => "BLOCKED",
            SourceKind::Unreachable => "UNREACHABLE",
            SourceKind::NameOnly => "NAME_ONLY",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of researching one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Page text when scraped, otherwise a synthetic note for the generator
    pub raw_text: String,
    pub extracted_emails: Vec<String>,
    pub primary_contact: Option<String>,
    pub source_kind: SourceKind,
    pub resolved_url: String,
}

impl ResearchResult {
    /// Contact for display, or "Not Found"
    pub fn contact_or_sentinel(&self) -> &str {
        self.primary_contact.as_deref().unwrap_or(NOT_FOUND)
    }

    fn fallback(source_kind: SourceKind, raw_text: String, resolved_url: &str) -> Self {
        Self {
            raw_text,
            extracted_emails: Vec::new(),
            primary_contact: None,
            source_kind,
            resolved_url: resolved_url.to_string(),
        }
    }
}

/// Combines normalization, fetching and contact extraction
pub struct ResearchResolver {
    fetcher: Arc<dyn PageFetcher>,
    max_text_chars: usize,
    fetch_enabled: bool,
}

impl ResearchResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_text_chars: usize, fetch_enabled: bool) -> Self {
        Self {
            fetcher,
            max_text_chars,
            fetch_enabled,
        }
    }

    /// Normalize then research a raw token
    pub async fn research(&self, token: &str) -> (ResolvedTarget, ResearchResult) {
        let target = normalizer::normalize(token);
        let result = self.research_target(&target).await;
        (target, result)
    }

    /// Research an already-normalized target. Every fetch outcome maps to a valid result.
    pub async fn research_target(&self, target: &ResolvedTarget) -> ResearchResult {
        let url = target.target_url.as_str();

        if !self.fetch_enabled {
            debug!("Fetching disabled, researching {} by name only", target.display_name);
            return ResearchResult::fallback(
                SourceKind::NameOnly,
                format!(
                    "No website content was collected for {}. Only the company name is known.",
                    target.display_name
                ),
                url,
            );
        }

        info!("Researching {} at {}", target.display_name, url);

        match self.fetcher.fetch(url).await {
            FetchOutcome::Content { raw_html, status_code } => {
                let page = extractor::extract_page(&raw_html, self.max_text_chars);
                let primary_contact = contacts::primary_contact(&page.emails);

                debug!(
                    "Scraped {} (status {}): {} chars, {} emails",
                    url,
                    status_code,
                    page.text.chars().count(),
                    page.emails.len()
                );

                ResearchResult {
                    raw_text: page.text,
                    extracted_emails: page.emails,
                    primary_contact,
                    source_kind: SourceKind::Scraped,
                    resolved_url: url.to_string(),
                }
            }
            FetchOutcome::Blocked { status_code } => ResearchResult::fallback(
                SourceKind::Blocked,
                format!(
                    "The website {} denied automated access (HTTP {}). No page content is available for {}.",
                    target.domain(),
                    status_code,
                    target.display_name
                ),
                url,
            ),
            FetchOutcome::Unreachable { reason } => ResearchResult::fallback(
                SourceKind::Unreachable,
                format!(
                    "The website {} could not be reached ({}). No page content is available for {}.",
                    target.domain(),
                    reason,
                    target.display_name
                ),
                url,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::research::fetcher::{MockPageFetcher, SiteFetcher, test_server};

    fn resolver_with(mock: MockPageFetcher) -> ResearchResolver {
        ResearchResolver::new(Arc::new(mock), 4000, true)
    }

    #[tokio::test]
    async fn test_scraped_page_excludes_nav_and_finds_contact() {
        let mut mock = MockPageFetcher::new();
        mock.expect_fetch()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| FetchOutcome::Content {
                raw_html: "<nav>Home</nav><p>Contact us at hi@example.com</p>".to_string(),
                status_code: 200,
            });

        let (target, result) = resolver_with(mock).research("https://example.com").await;

        assert_eq!(target.display_name, "Example");
        assert_eq!(result.source_kind, SourceKind::Scraped);
        assert_eq!(result.primary_contact.as_deref(), Some("hi@example.com"));
        assert!(!result.raw_text.contains("Home"));
        assert!(result.raw_text.contains("Contact us"));
        assert_eq!(result.resolved_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_forbidden_is_blocked_without_contact() {
        let mut mock = MockPageFetcher::new();
        mock.expect_fetch()
            .returning(|_| FetchOutcome::Blocked { status_code: 403 });

        let (_, result) = resolver_with(mock).research("initech.com").await;

        assert_eq!(result.source_kind, SourceKind::Blocked);
        assert_eq!(result.primary_contact, None);
        assert_eq!(result.contact_or_sentinel(), "Not Found");
        assert!(result.raw_text.contains("initech.com"));
        assert!(result.raw_text.contains("denied"));
    }

    #[tokio::test]
    async fn test_unreachable_note_carries_reason() {
        let mut mock = MockPageFetcher::new();
        mock.expect_fetch()
            .withf(|url| url == "https://www.globex.com")
            .returning(|_| FetchOutcome::Unreachable { reason: "connection refused".to_string() });

        let (target, result) = resolver_with(mock).research("Globex").await;

        assert_eq!(target.target_url, "https://www.globex.com");
        assert_eq!(result.source_kind, SourceKind::Unreachable);
        assert_eq!(result.contact_or_sentinel(), "Not Found");
        assert!(result.raw_text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_fetch_disabled_is_name_only() {
        let mut mock = MockPageFetcher::new();
        mock.expect_fetch().never();

        let resolver = ResearchResolver::new(Arc::new(mock), 4000, false);
        let (_, result) = resolver.research("Hooli").await;

        assert_eq!(result.source_kind, SourceKind::NameOnly);
        assert!(result.raw_text.contains("Hooli"));
        assert!(result.extracted_emails.is_empty());
    }

    #[tokio::test]
    async fn test_real_timeout_yields_unreachable_with_text() {
        let addr = test_server::silent().await;
        let config = FetchConfig { timeout_secs: 1, ..FetchConfig::default() };
        let resolver = ResearchResolver::new(Arc::new(SiteFetcher::new(&config).unwrap()), 4000, true);

        let (_, result) = resolver.research(&format!("http://{}", addr)).await;

        assert_eq!(result.source_kind, SourceKind::Unreachable);
        assert!(!result.raw_text.is_empty());
        assert!(result.raw_text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_real_forbidden_yields_blocked() {
        let addr = test_server::serve("403 Forbidden", "denied").await;
        let resolver = ResearchResolver::new(
            Arc::new(SiteFetcher::new(&FetchConfig::default()).unwrap()),
            4000,
            true,
        );

        let (_, result) = resolver.research(&format!("http://{}/", addr)).await;

        assert_eq!(result.source_kind, SourceKind::Blocked);
        assert_eq!(result.contact_or_sentinel(), "Not Found");
    }

    #[test]
    fn test_source_kind_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&SourceKind::NameOnly).unwrap(), "\"NAME_ONLY\"");
        assert_eq!(SourceKind::Scraped.to_string(), "SCRAPED");
    }
}
