//! Background worker running several jobs at once

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;
use crate::orchestrator::{JobOutcome, Orchestrator};
use concord_domain::{Job, JobId};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to one submitted job
///
/// Cancelling takes effect while the job waits for a slot, classifies or
/// scores; once its documents are joined the job runs to the end.
#[derive(Debug)]
pub struct JobHandle {
    job_id: JobId,
    cancel: CancellationToken,
    task: JoinHandle<Result<JobOutcome, PipelineError>>,
}

impl JobHandle {
    /// Id of the submitted job
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the job to reach a terminal state
    pub async fn join(self) -> Result<JobOutcome, PipelineError> {
        self.task
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?
    }
}

/// Runs submitted jobs with bounded concurrency
///
/// # Examples
///
/// ```no_run
/// use concord_orchestrator::{JobWorker, PipelineConfig};
/// use concord_domain::{DocumentInput, JobSubmission};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let worker = JobWorker::from_config(&PipelineConfig::default())?;
///     let job = worker.orchestrator().admit(JobSubmission::new(vec![
///         DocumentInput::new("The reservoir reopened to the public after two years of repairs."),
///     ]))?;
///
///     let outcome = worker.submit(job).join().await?;
///     println!("{}", outcome.job.status());
///     Ok(())
/// }
/// ```
pub struct JobWorker {
    orchestrator: Arc<Orchestrator>,
    permits: Arc<Semaphore>,
    max_concurrent_jobs: usize,
    shutdown: CancellationToken,
}

impl JobWorker {
    /// Create a worker around an orchestrator
    pub fn new(orchestrator: Arc<Orchestrator>, max_concurrent_jobs: usize) -> Self {
        let max_concurrent_jobs = max_concurrent_jobs.max(1);
        Self {
            orchestrator,
            permits: Arc::new(Semaphore::new(max_concurrent_jobs)),
            max_concurrent_jobs,
            shutdown: CancellationToken::new(),
        }
    }

    /// Create an offline worker from configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let orchestrator = Orchestrator::new(config)?;
        Ok(Self::new(
            Arc::new(orchestrator),
            config.max_concurrent_jobs,
        ))
    }

    /// The orchestrator jobs run on
    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    /// Queue a job; it starts as soon as a slot is free
    pub fn submit(&self, job: Job) -> JobHandle {
        let job_id = job.id();
        let cancel = self.shutdown.child_token();
        let token = cancel.clone();
        let orchestrator = Arc::clone(&self.orchestrator);
        let permits = Arc::clone(&self.permits);

        let task = tokio::spawn(async move {
            // a job cancelled while queued still runs, to record its failure
            let _permit = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                permit = permits.acquire_owned() => {
                    Some(permit.map_err(|e| PipelineError::Worker(e.to_string()))?)
                }
            };
            orchestrator.run(job, token).await
        });

        tracing::debug!(job_id = %job_id, "Job queued");
        JobHandle {
            job_id,
            cancel,
            task,
        }
    }

    /// Cancel every job that has not finished its fan-in
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Run jobs from a channel until it closes or Ctrl+C is received
    ///
    /// On Ctrl+C every outstanding job is cancelled; the call still waits for
    /// all of them to reach a terminal state. Outcomes come back in
    /// submission order.
    pub async fn run(
        &self,
        mut jobs: mpsc::Receiver<Job>,
    ) -> Vec<Result<JobOutcome, PipelineError>> {
        tracing::info!(
            "Job worker started (max concurrent jobs: {})",
            self.max_concurrent_jobs
        );

        let mut handles = Vec::new();
        loop {
            tokio::select! {
                job = jobs.recv() => match job {
                    Some(job) => handles.push(self.submit(job)),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, cancelling outstanding jobs");
                    self.shutdown();
                    break;
                }
            }
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let job_id = handle.job_id();
            let outcome = handle.join().await;
            if let Err(e) = &outcome {
                tracing::error!(job_id = %job_id, error = %e, "Job could not be run");
            }
            outcomes.push(outcome);
        }

        tracing::info!(
            "Job worker stopped. Final metrics:\n{}",
            self.metrics().summary()
        );
        outcomes
    }

    /// Metrics of every job run so far
    pub fn metrics(&self) -> PipelineMetrics {
        self.orchestrator.metrics()
    }
}
