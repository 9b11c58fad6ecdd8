//! Error types for the orchestrator

use concord_agents::AgentError;
use concord_domain::TransitionError;
use concord_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Errors that can occur while setting up or driving jobs
///
/// Faults inside a job are not errors: they are recorded on the outcome and
/// end in a failed job at worst.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The submission did not pass validation
    #[error(transparent)]
    Rejected(#[from] GatekeeperError),

    /// Trust tables could not be loaded
    #[error("Agent setup failed: {0}")]
    Agents(#[from] AgentError),

    /// The job was not in a state the pipeline can pick up
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Worker error (task panicked or runtime shut down)
    #[error("Worker error: {0}")]
    Worker(String),
}
