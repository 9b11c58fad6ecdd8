//! Gatekeeper error types

use crate::validator::RejectionReason;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatekeeperError {
    /// The submission failed validation; no job was created
    #[error("Submission rejected: {}", join_reasons(.0))]
    Rejected(Vec<RejectionReason>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
