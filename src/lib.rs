pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod pitch;
pub mod reporting;
pub mod research;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use engine::{BatchExecutor, LeadPipeline};
pub use error::{LeadsmithError, LeadsmithResult};
pub use pitch::{Pitch, PitchGenerator, PitchOrigin};
pub use reporting::{LeadRecord, LeadReport, LeadStatus, ReportFormat, ReportManager};
pub use research::{normalize, ResearchResolver, ResearchResult, ResolvedTarget, SourceKind};
