//! Pipeline configuration
//!
//! One file (`concord.toml`) configures every stage. Each section maps to the
//! configuration type of the crate that owns the stage, and every section is
//! optional: missing keys fall back to their defaults.

use crate::error::PipelineError;
use concord_agents::AgentConfig;
use concord_classifier::ClassifierConfig;
use concord_gatekeeper::ValidationConfig;
use concord_llm::RetryPolicy;
use concord_resolver::ResolverConfig;
use concord_summarizer::SummarizerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of jobs the worker runs at once
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 4;

/// Configuration for the whole pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Jobs the worker runs at once
    /// Default: 4
    pub max_concurrent_jobs: usize,

    /// Clustering and strategy parameters
    pub resolver: ResolverConfig,

    /// Timeout and retry policy for external capability calls
    pub retry: RetryPolicy,

    /// Submission validation limits
    pub validation: ValidationConfig,

    /// Scoring agents, hedging and trust table overrides
    pub agents: AgentConfig,

    /// Keyword classifier thresholds
    pub classifier: ClassifierConfig,

    /// Summarization backends
    pub summarizer: SummarizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            resolver: ResolverConfig::default(),
            retry: RetryPolicy::default(),
            validation: ValidationConfig::default(),
            agents: AgentConfig::default(),
            classifier: ClassifierConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Aggressive preset: loose clustering, strict input limits, fast failure
    pub fn aggressive() -> Self {
        Self {
            max_concurrent_jobs: 2,
            resolver: ResolverConfig::aggressive(),
            retry: RetryPolicy::aggressive(),
            validation: ValidationConfig::strict(),
            agents: AgentConfig::aggressive(),
            ..Self::default()
        }
    }

    /// Lenient preset: tight clustering, permissive input, patient retries
    pub fn lenient() -> Self {
        Self {
            max_concurrent_jobs: 8,
            resolver: ResolverConfig::lenient(),
            retry: RetryPolicy::lenient(),
            validation: ValidationConfig::permissive(),
            agents: AgentConfig::lenient(),
            ..Self::default()
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_jobs == 0 {
            return Err("max_concurrent_jobs must be greater than 0".to_string());
        }
        self.resolver
            .validate()
            .map_err(|e| format!("[resolver] {}", e))?;
        self.retry
            .validate()
            .map_err(|e| format!("[retry] {}", e))?;
        self.validation
            .validate()
            .map_err(|e| format!("[validation] {}", e))?;
        self.agents
            .validate()
            .map_err(|e| format!("[agents] {}", e))?;
        self.classifier
            .validate()
            .map_err(|e| format!("[classifier] {}", e))?;
        self.summarizer
            .validate()
            .map_err(|e| format!("[summarizer] {}", e))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents).map_err(PipelineError::Config)?;
        config.validate().map_err(PipelineError::Config)?;
        Ok(config)
    }
}
