mod parallel;
mod pipeline;
mod rate_limit;

pub use parallel::BatchExecutor;
pub use pipeline::LeadPipeline;
pub use rate_limit::StartRateLimiter;
