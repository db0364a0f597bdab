mod format;
mod generator;
mod model;
pub mod formats;

pub use generator::ReportManager;
pub use model::{LeadRecord, LeadReport, LeadStatus, LeadSummary};
pub use formats::{ReportFormat, ReportGenerator, format_to_extension, extension_to_format};
