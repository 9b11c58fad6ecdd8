//! Summarizer configuration

use serde::{Deserialize, Serialize};

/// Configuration for the summarization backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Upper bound on the prompt sent to the language model (characters)
    pub max_prompt_chars: usize,

    /// Passages retrieved from the source texts for the prompt
    pub top_k_passages: usize,

    /// Passage size in words
    pub passage_words: usize,

    /// Words shared by consecutive passages
    pub passage_overlap: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 14_000,
            top_k_passages: 5,
            passage_words: 300,
            passage_overlap: 50,
        }
    }
}

impl SummarizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars < 1_000 {
            return Err("max_prompt_chars must be at least 1000".to_string());
        }
        if self.passage_words == 0 {
            return Err("passage_words must be greater than 0".to_string());
        }
        if self.passage_overlap >= self.passage_words {
            return Err("passage_overlap must be smaller than passage_words".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SummarizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller() {
        let config = SummarizerConfig {
            passage_words: 50,
            passage_overlap: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = SummarizerConfig::from_toml("top_k_passages = 2").unwrap();
        assert_eq!(config.top_k_passages, 2);
        assert_eq!(config.passage_words, 300);
    }
}
