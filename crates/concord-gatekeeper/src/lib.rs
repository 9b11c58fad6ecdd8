//! Concord Gatekeeper
//!
//! Validates job submissions before a job exists. A rejected submission
//! never enters `pending`; an accepted one becomes a pending [`Job`] with
//! its documents trimmed, truncated and stripped of unusable source URLs.
//!
//! The Gatekeeper checks:
//! - Batch size (at least one document, at most `max_documents`)
//! - Minimum document length, dropping or rejecting short documents
//! - Source URL shape (invalid URLs are discarded with a warning)
//! - Maximum document length (longer texts are truncated)
//!
//! # Examples
//!
//! ```
//! use concord_domain::{DocumentInput, JobStatus, JobSubmission};
//! use concord_gatekeeper::{Gatekeeper, GatekeeperError};
//!
//! let gatekeeper = Gatekeeper::default_config();
//!
//! let text = "A document long enough to pass the minimum length check easily.";
//! let job = gatekeeper.admit(JobSubmission::new(vec![DocumentInput::new(text)])).unwrap();
//! assert_eq!(job.status(), JobStatus::Pending);
//!
//! let rejected = gatekeeper.admit(JobSubmission::new(vec![DocumentInput::new("too short")]));
//! assert!(matches!(rejected, Err(GatekeeperError::Rejected(_))));
//! ```
//!
//! [`Job`]: concord_domain::Job

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{
    Gatekeeper, RejectionReason, ValidationResult, ValidationStatus, ValidationWarning,
};
