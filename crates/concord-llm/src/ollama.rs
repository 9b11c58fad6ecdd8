//! Ollama Provider Implementation
//!
//! Integration with Ollama's local LLM API for running local models.
//!
//! A provider makes exactly one HTTP request per call. Timeouts and retries
//! are applied by [`RetryPolicy`](crate::RetryPolicy) at the call site, so
//! the same policy governs every capability.
//!
//! # Examples
//!
//! ```no_run
//! use concord_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3").unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use concord_domain::{CapabilityError, LanguageModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model name
pub const DEFAULT_MODEL: &str = "llama3";

/// HTTP-level timeout; the retry policy normally fires first
pub const HTTP_TIMEOUT_SECS: u64 = 300;

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Build the shared HTTP client
pub(crate) fn http_client() -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success HTTP status to an error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String, model: &str) -> LlmError {
    if status == reqwest::StatusCode::NOT_FOUND {
        LlmError::ModelNotAvailable(model.to_string())
    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        LlmError::RateLimitExceeded
    } else if status.is_server_error() {
        LlmError::Communication(format!("HTTP {}: {}", status, body))
    } else {
        LlmError::Other(format!("HTTP {}: {}", status, body))
    }
}

/// Map a transport error to an error
pub(crate) fn transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http_client()?,
        })
    }

    /// Create a new Ollama provider on the default endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Model this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text with a single request
    ///
    /// # Errors
    ///
    /// Returns error if Ollama is not running, the model is not available,
    /// or the response cannot be parsed.
    pub async fn generate_once(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, text, &self.model));
        }

        response
            .json::<OllamaGenerateResponse>()
            .await
            .map(|r| r.response)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LanguageModel for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        self.generate_once(prompt).await.map_err(CapabilityError::from)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama2").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model(), "llama2");
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), "mistral");
    }

    #[test]
    fn test_status_mapping() {
        let not_found = status_error(reqwest::StatusCode::NOT_FOUND, String::new(), "m");
        assert!(matches!(not_found, LlmError::ModelNotAvailable(_)));

        let busy = status_error(reqwest::StatusCode::SERVICE_UNAVAILABLE, String::new(), "m");
        assert!(CapabilityError::from(busy).is_transient());

        let bad = status_error(reqwest::StatusCode::BAD_REQUEST, String::new(), "m");
        assert!(!CapabilityError::from(bad).is_transient());
    }

    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3").unwrap();
        let result = provider.generate("Say 'hello' and nothing else").await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Nothing listens on port 9 locally
        let provider = OllamaProvider::new("http://127.0.0.1:9", "llama2").unwrap();

        let result = provider.generate("test").await;
        assert!(matches!(result, Err(CapabilityError::Transient(_))));
    }
}
