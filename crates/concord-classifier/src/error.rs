//! Error types for the Classifier

use concord_llm::RetryError;
use thiserror::Error;

/// Errors absorbed while classifying
///
/// None of these reach the caller as errors; they are reported as the
/// fault of a [`Classification`](concord_domain::Classification).
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Language model call failed
    #[error("Language model error: {0}")]
    Llm(#[from] RetryError),
}
