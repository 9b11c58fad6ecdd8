//! Resolver error types

use concord_domain::ClaimId;
use thiserror::Error;

/// Errors that can occur during conflict resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same claim id appeared twice in the input
    #[error("Duplicate claim id: {0}")]
    DuplicateClaim(ClaimId),
}
