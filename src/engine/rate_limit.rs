//! Global ceiling on how fast tokens start processing.

use std::num::NonZeroU32;
use std::sync::Arc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};

/// Requests per minute used when the configured value is zero
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

/// Shared start-rate limiter for batch tasks
#[derive(Clone)]
pub struct StartRateLimiter {
    limiter: Arc<GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    requests_per_minute: u32,
}

impl StartRateLimiter {
    /// Create a limiter allowing `requests_per_minute` starts, with a burst of the same size
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute)
            .or_else(|| NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE))
            .unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: Arc::new(GovRateLimiter::direct(Quota::per_minute(rpm))),
            requests_per_minute: rpm.get(),
        }
    }

    /// Wait until another token may start
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }
}
