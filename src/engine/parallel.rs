// src/engine/parallel.rs
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{info, debug, error, warn};

use crate::config::BatchConfig;
use crate::reporting::LeadRecord;
use super::pipeline::LeadPipeline;
use super::rate_limit::StartRateLimiter;

/// Executor for running tokens through the pipeline in parallel
pub struct BatchExecutor {
    pipeline: Arc<LeadPipeline>,
    max_concurrent: usize,
    semaphore: Arc<Semaphore>,
    limiter: StartRateLimiter,
    token_timeout: Duration,
}

impl BatchExecutor {
    /// Create a new batch executor
    pub fn new(pipeline: Arc<LeadPipeline>, config: &BatchConfig) -> Self {
        let max_concurrent = config.max_concurrent.max(1);

        Self {
            pipeline,
            max_concurrent,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            limiter: StartRateLimiter::new(config.requests_per_minute),
            token_timeout: Duration::from_secs(config.token_timeout_secs.max(1)),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Process every token. Returns one record per token, in input order.
    pub async fn run(&self, tokens: Vec<String>) -> Vec<LeadRecord> {
        if tokens.is_empty() {
            info!("No tokens to process");
            return Vec::new();
        }

        info!(
            "Processing {} tokens with max concurrency {} ({} starts/min)",
            tokens.len(),
            self.max_concurrent,
            self.limiter.requests_per_minute()
        );

        let mut handles: Vec<(String, JoinHandle<LeadRecord>)> = Vec::with_capacity(tokens.len());

        for (index, token) in tokens.into_iter().enumerate() {
            let pipeline = self.pipeline.clone();
            let semaphore = self.semaphore.clone();
            let limiter = self.limiter.clone();
            let timeout = self.token_timeout;
            let task_token = token.clone();

            let handle = tokio::spawn(async move {
                // Acquire permit
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return LeadRecord::failed(&task_token, format!("scheduler closed: {}", e)),
                };

                limiter.wait().await;
                debug!("Starting token #{}: {}", index + 1, task_token);

                match tokio::time::timeout(timeout, pipeline.process(&task_token)).await {
                    Ok(record) => record,
                    Err(_) => {
                        warn!("Token #{} ({}) timed out after {:?}", index + 1, task_token, timeout);
                        LeadRecord::failed(
                            &task_token,
                            format!("processing timed out after {} seconds", timeout.as_secs()),
                        )
                    }
                }
            });

            handles.push((token, handle));
        }

        // Await in submission order so output matches input order
        let mut records = Vec::with_capacity(handles.len());
        for (token, handle) in handles {
            match handle.await {
                Ok(record) => records.push(record),
                Err(e) => {
                    error!("Task for {} failed: {}", token, e);
                    records.push(LeadRecord::failed(&token, format!("task failed: {}", e)));
                }
            }
        }

        info!("Completed {} tokens", records.len());
        records
    }
}
