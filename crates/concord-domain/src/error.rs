//! Error types shared across the pipeline

use crate::job::JobStatus;
use thiserror::Error;

/// Failure of an external capability call (language model, extraction,
/// embedding, summarization, persistence)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The call did not finish within its timeout
    #[error("Capability call timed out")]
    Timeout,

    /// A failure that may succeed on retry (connection reset, 5xx, rate limit)
    #[error("Transient capability failure: {0}")]
    Transient(String),

    /// A failure that will not go away on retry
    #[error("Fatal capability failure: {0}")]
    Fatal(String),

    /// The capability answered, but the answer could not be used
    #[error("Invalid capability response: {0}")]
    Invalid(String),
}

impl CapabilityError {
    /// Whether the retry policy should try the call again
    pub fn is_transient(&self) -> bool {
        matches!(self, CapabilityError::Timeout | CapabilityError::Transient(_))
    }
}

/// Rejected job state transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid job transition from {from} to {to}")]
pub struct TransitionError {
    /// State the job was in
    pub from: JobStatus,
    /// State that was requested
    pub to: JobStatus,
}
