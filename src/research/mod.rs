pub mod contacts;
pub mod extractor;
pub mod fetcher;
mod normalizer;
mod resolver;

pub use contacts::{extract_emails, primary_contact, NOT_FOUND};
pub use extractor::{extract_page, visible_text, ExtractedPage};
pub use fetcher::{FetchOutcome, PageFetcher, SiteFetcher};
pub use normalizer::{normalize, title_case, ResolvedTarget};
pub use resolver::{ResearchResolver, ResearchResult, SourceKind};
