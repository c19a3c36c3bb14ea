//! Submit, poll, fetch
//!
//! [`Workflow`] drives one sequence through the search service: a single
//! submission, status checks at a fixed interval until the job reports
//! ready, then a single results download. Polling stops early when the
//! [`PollPolicy`] deadline passes or when the caller's cancellation future
//! completes.

use crate::api::ScanResults;
use crate::error::{CliError, Result};
use async_trait::async_trait;
use funfam_common::{Sequence, TaskId};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// The three calls the workflow needs from the search service
#[async_trait]
pub trait FunfamService: Send + Sync {
    /// Submit one sequence. `work_dir` may receive intermediate artifacts.
    async fn submit(&self, sequence: &Sequence, work_dir: &Path) -> Result<TaskId>;

    /// `Ok(false)` while the job is still running
    async fn is_ready(&self, task_id: &TaskId) -> Result<bool>;

    async fn results(&self, task_id: &TaskId) -> Result<ScanResults>;
}

/// How often and how long to poll for completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls until the job finishes or the caller cancels
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

type PollObserver = Box<dyn Fn(&TaskId, u32, Duration) + Send + Sync>;

/// Orchestrates submit → poll → fetch for one sequence
pub struct Workflow<S> {
    service: S,
    policy: PollPolicy,
    observer: Option<PollObserver>,
}

impl<S: FunfamService> Workflow<S> {
    pub fn new(service: S, policy: PollPolicy) -> Self {
        Self {
            service,
            policy,
            observer: None,
        }
    }

    /// Called after every not-ready status with the attempt count and the
    /// time spent polling so far
    pub fn on_pending(mut self, observer: impl Fn(&TaskId, u32, Duration) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run the whole workflow with no way to cancel other than the deadline
    pub async fn run(&self, sequence: &Sequence, work_dir: &Path) -> Result<ScanResults> {
        self.run_until(sequence, work_dir, std::future::pending()).await
    }

    /// Run the whole workflow, aborting the poll when `cancel` completes
    #[instrument(skip_all)]
    pub async fn run_until<F>(
        &self,
        sequence: &Sequence,
        work_dir: &Path,
        cancel: F,
    ) -> Result<ScanResults>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        let task_id = self.service.submit(sequence, work_dir).await?;
        info!(task_id = %task_id, "Submitted sequence");

        let attempts = self.wait_until_ready(&task_id, cancel.as_mut()).await?;
        info!(task_id = %task_id, attempts, "Job finished");

        self.service.results(&task_id).await
    }

    /// Poll until the job is ready. Returns the number of status checks made.
    pub async fn wait_until_ready<F>(&self, task_id: &TaskId, mut cancel: Pin<&mut F>) -> Result<u32>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        // a deadline past the clock's range means no deadline
        let deadline = self.policy.timeout.and_then(|t| started.checked_add(t));
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let ready = tokio::select! {
                ready = self.service.is_ready(task_id) => ready?,
                _ = cancel.as_mut() => {
                    return Err(CliError::Cancelled { task_id: task_id.to_string() });
                }
            };

            if ready {
                return Ok(attempts);
            }

            let now = Instant::now();
            let elapsed = now - started;
            debug!(task_id = %task_id, attempts, ?elapsed, "Job not ready");

            if let Some(observer) = &self.observer {
                observer(task_id, attempts, elapsed);
            }

            let pause = match deadline {
                Some(deadline) if now >= deadline => {
                    return Err(CliError::PollTimeout {
                        task_id: task_id.to_string(),
                        attempts,
                        elapsed,
                    });
                }
                Some(deadline) => self.policy.interval.min(deadline - now),
                None => self.policy.interval,
            };

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = cancel.as_mut() => {
                    return Err(CliError::Cancelled { task_id: task_id.to_string() });
                }
            }
        }
    }
}
