//! Job module - the pipeline state machine
//!
//! A job moves along `pending → running → done`, with a single failure exit
//! `→ failed`. `done` and `failed` are terminal.

use crate::document::Document;
use crate::error::TransitionError;
use crate::ids::JobId;
use crate::submission::{StrategyChoice, SummarizerBackend, SummaryDepth};
use crate::time::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, waiting for pickup
    Pending,
    /// Picked up by the orchestrator
    Running,
    /// Report produced (terminal)
    Done,
    /// Unrecoverable fault (terminal)
    Failed,
}

impl JobStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }

    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Running)
                | (JobStatus::Pending, JobStatus::Failed)
                | (JobStatus::Running, JobStatus::Done)
                | (JobStatus::Running, JobStatus::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-job options carried over from the submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobOptions {
    /// Summarization backend
    pub summarizer_backend: SummarizerBackend,
    /// Explicit strategy or `auto`
    pub conflict_strategy: StrategyChoice,
    /// Summary depth
    pub summary_depth: SummaryDepth,
}

/// One end-to-end run of the pipeline over a batch of documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,

    /// Documents of the job
    pub documents: Vec<Document>,

    status: JobStatus,
    error: Option<String>,

    /// Creation time, milliseconds since the epoch
    pub created_at: u64,

    /// Time of the last transition, milliseconds since the epoch
    pub updated_at: u64,

    /// Pickup time, set on `pending → running`
    pub started_at: Option<u64>,

    /// Options from the submission
    pub options: JobOptions,
}

impl Job {
    /// Create a pending job
    pub fn new(documents: Vec<Document>, options: JobOptions) -> Self {
        let now = now_millis();
        Self {
            id: JobId::new(),
            documents,
            status: JobStatus::Pending,
            error: None,
            created_at: now,
            updated_at: now,
            started_at: None,
            options,
        }
    }

    /// Job identifier; fixed at creation
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current state
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Failure message, present only on failed jobs
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `pending → running`; records the start time
    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(self.updated_at);
        Ok(())
    }

    /// `running → done`
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.transition(JobStatus::Done)
    }

    /// `pending | running → failed` with a short error string
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), TransitionError> {
        self.transition(JobStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now_millis();
        Ok(())
    }
}
