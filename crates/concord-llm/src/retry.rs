//! Timeout and bounded retry for external capability calls
//!
//! Every call to a language model, extractor, embedder or summarizer is
//! read-only inference, so repeating it has no side effects. Only transient
//! failures (timeouts, connection errors, 5xx) are retried; fatal and
//! invalid responses return immediately.

use concord_domain::CapabilityError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Default number of attempts, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default per-attempt timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure of a call after the retry policy gave up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// Every attempt failed transiently
    #[error("{operation} failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Name of the operation, for messages
        operation: String,
        /// Attempts made
        attempts: u32,
        /// Error of the final attempt
        last: CapabilityError,
    },

    /// A non-retryable error ended the call
    #[error("{operation} failed: {error}")]
    Fatal {
        /// Name of the operation, for messages
        operation: String,
        /// The error
        error: CapabilityError,
    },
}

impl RetryError {
    /// The underlying capability error
    pub fn capability_error(&self) -> &CapabilityError {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Fatal { error, .. } => error,
        }
    }
}

impl From<RetryError> for CapabilityError {
    fn from(e: RetryError) -> Self {
        match e {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Fatal { error, .. } => error,
        }
    }
}

/// Per-attempt timeout plus exponential backoff between attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts including the first; at least 1
    pub max_attempts: u32,

    /// Timeout of a single attempt (seconds)
    pub timeout_secs: u64,

    /// Delay before the second attempt (milliseconds); doubles afterwards
    pub initial_backoff_ms: u64,

    /// Upper bound on the delay between attempts (milliseconds)
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }
}

impl RetryPolicy {
    /// Aggressive preset: fail fast
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 2,
            timeout_secs: 10,
            initial_backoff_ms: 200,
            max_backoff_ms: 1_000,
        }
    }

    /// Lenient preset: slow local models
    pub fn lenient() -> Self {
        Self {
            max_attempts: 5,
            timeout_secs: 120,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }

    /// Policy with no delay between attempts, for tests and offline runs
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }

    /// Get the per-attempt timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay after the given failed attempt (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let delay = self.initial_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err("initial_backoff_ms cannot exceed max_backoff_ms".to_string());
        }
        Ok(())
    }

    /// Load a policy from a TOML string; missing keys keep their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let policy: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Serialize the policy to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }

    /// Run `call` under this policy
    ///
    /// Each attempt is bounded by the timeout; an elapsed timeout counts as a
    /// transient failure.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CapabilityError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = match tokio::time::timeout(self.timeout(), call()).await {
                Ok(result) => result,
                Err(_) => Err(CapabilityError::Timeout),
            };

            match result {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(operation, attempt, "Call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if !error.is_transient() => {
                    return Err(RetryError::Fatal {
                        operation: operation.to_string(),
                        error,
                    });
                }
                Err(error) if attempt >= max_attempts => {
                    tracing::warn!(operation, attempts = attempt, error = %error, "Retries exhausted");
                    return Err(RetryError::Exhausted {
                        operation: operation.to_string(),
                        attempts: attempt,
                        last: error,
                    });
                }
                Err(error) => {
                    let delay = self.backoff(attempt);
                    tracing::debug!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transient failure, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_presets_are_valid() {
        assert!(RetryPolicy::default().validate().is_ok());
        assert!(RetryPolicy::aggressive().validate().is_ok());
        assert!(RetryPolicy::lenient().validate().is_ok());
        assert!(RetryPolicy::immediate(1).validate().is_ok());
    }

    #[test]
    fn test_invalid_policies() {
        let mut policy = RetryPolicy::default();
        policy.max_attempts = 0;
        assert!(policy.validate().is_err());

        let mut policy = RetryPolicy::default();
        policy.initial_backoff_ms = policy.max_backoff_ms + 1;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_toml_partial_and_serialization() {
        let policy = RetryPolicy::from_toml("max_attempts = 4\ntimeout_secs = 30\n").unwrap();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.timeout(), Duration::from_secs(30));
        assert_eq!(policy.initial_backoff_ms, RetryPolicy::default().initial_backoff_ms);

        let toml_str = RetryPolicy::lenient().to_toml().unwrap();
        assert!(toml_str.contains("max_attempts = 5"));
        assert_eq!(RetryPolicy::from_toml(&toml_str).unwrap(), RetryPolicy::lenient());
    }

    #[test]
    fn test_toml_rejects_invalid_policy() {
        assert!(RetryPolicy::from_toml("max_attempts = 0").is_err());
        assert!(RetryPolicy::from_toml("max_attempts = \"three\"").is_err());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1_000));
        assert_eq!(policy.backoff(3), Duration::from_millis(2_000));
        assert_eq!(policy.backoff(10), Duration::from_millis(8_000));
        assert_eq!(policy.backoff(200), Duration::from_millis(8_000));
    }

    #[tokio::test]
    async fn test_transient_then_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(3);

        let result = policy
            .run("generate", || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(CapabilityError::Transient("503".into()))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fatal_is_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(5);

        let result: Result<(), _> = policy
            .run("generate", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CapabilityError::Fatal("bad key".into()))
            })
            .await;

        assert!(matches!(result, Err(RetryError::Fatal { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts() {
        let policy = RetryPolicy::immediate(3);

        let result: Result<(), _> = policy
            .run("summarize", || async { Err(CapabilityError::Transient("down".into())) })
            .await;

        match result {
            Err(RetryError::Exhausted { attempts, operation, .. }) => {
                assert_eq!(attempts, 3);
                assert_eq!(operation, "summarize");
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_transient() {
        let mut policy = RetryPolicy::immediate(2);
        policy.timeout_secs = 1;

        let result: Result<(), _> = policy
            .run("embed", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        match result {
            Err(RetryError::Exhausted { last, attempts, .. }) => {
                assert_eq!(last, CapabilityError::Timeout);
                assert_eq!(attempts, 2);
            }
            other => panic!("expected timeout exhaustion, got {other:?}"),
        }
    }
}
