//! Concord LLM Provider Layer
//!
//! Implementations of the language-model and embedding capabilities from
//! `concord-domain`, plus the timeout/retry policy every external call goes
//! through.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic scripted provider for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Embeddings
//!
//! - `HashingEmbedder`: offline bag-of-words feature hashing
//! - `StaticEmbedder`: fixed vectors per text, for tests
//! - `OllamaEmbedder`: Ollama embeddings endpoint
//!
//! # Examples
//!
//! ```
//! use concord_llm::MockProvider;
//! use concord_domain::LanguageModel;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = rt.block_on(provider.generate("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod ollama;
pub mod retry;

use async_trait::async_trait;
use concord_domain::{CapabilityError, LanguageModel};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use embedding::{cosine_similarity, HashingEmbedder, OllamaEmbedder, StaticEmbedder};
pub use ollama::OllamaProvider;
pub use retry::{RetryError, RetryPolicy};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<LlmError> for CapabilityError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Timeout => CapabilityError::Timeout,
            LlmError::Communication(_) | LlmError::RateLimitExceeded => {
                CapabilityError::Transient(e.to_string())
            }
            LlmError::InvalidResponse(_) => CapabilityError::Invalid(e.to_string()),
            LlmError::ModelNotAvailable(_) | LlmError::Other(_) => {
                CapabilityError::Fatal(e.to_string())
            }
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Result<String, CapabilityError>>,
    queued_failures: VecDeque<CapabilityError>,
    call_count: usize,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. A
/// response can be keyed on an exact prompt or on a prompt substring, and a
/// queue of failures can be scripted to precede normal answers.
///
/// Clones share state, so a test can keep a handle and inspect the calls
/// after handing the provider to the pipeline.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a response for any prompt containing `needle`
    pub fn add_response(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.state()
            .responses
            .insert(needle.into(), Ok(response.into()));
    }

    /// Fail every prompt containing `needle` with the given error
    pub fn add_error(&self, needle: impl Into<String>, error: CapabilityError) {
        self.state().responses.insert(needle.into(), Err(error));
    }

    /// Fail the next call with `error`, before any scripted response
    pub fn push_failure(&self, error: CapabilityError) {
        self.state().queued_failures.push_back(error);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Reset the call count and prompt log
    pub fn reset_call_count(&self) {
        let mut state = self.state();
        state.call_count = 0;
        state.prompts.clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LanguageModel for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        let mut state = self.state();
        state.call_count += 1;
        state.prompts.push(prompt.to_string());

        if let Some(error) = state.queued_failures.pop_front() {
            return Err(error);
        }

        // Longest matching needle wins so specific scripts beat generic ones
        let scripted = state
            .responses
            .iter()
            .filter(|(needle, _)| prompt.contains(needle.as_str()))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, response)| response.clone());

        scripted.unwrap_or_else(|| Ok(self.default_response.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
