//! Configuration for the Classifier

use serde::{Deserialize, Serialize};

/// Configuration for the Classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Characters of `title + text` scored by the keyword pass
    pub sample_chars: usize,

    /// Minimum keyword score that decides without the language model
    pub min_keyword_score: f64,

    /// Characters of `title + text` sent to the language model
    pub llm_sample_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_chars: 3_000,
            min_keyword_score: 0.15,
            llm_sample_chars: 2_000,
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_chars == 0 {
            return Err("sample_chars must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_keyword_score) {
            return Err("min_keyword_score must be between 0.0 and 1.0".to_string());
        }
        if self.llm_sample_chars == 0 {
            return Err("llm_sample_chars must be greater than 0".to_string());
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
    fn test_default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = ClassifierConfig {
            min_keyword_score: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClassifierConfig::from_toml("min_keyword_score = 0.3").unwrap();
        assert_eq!(config.min_keyword_score, 0.3);
        assert_eq!(config.sample_chars, 3_000);
    }
}
