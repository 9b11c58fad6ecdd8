//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for submission validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum document length after trimming (characters)
    pub min_document_chars: usize,

    /// Maximum number of documents in one submission
    pub max_documents: usize,

    /// Documents longer than this are truncated (characters)
    pub max_document_chars: usize,

    /// Drop short documents when at least one document is long enough;
    /// otherwise any short document rejects the submission
    pub drop_short_documents: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_document_chars: 50,
            max_documents: 50,
            max_document_chars: 400_000,
            drop_short_documents: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (tiny documents, large batches)
    pub fn permissive() -> Self {
        Self {
            min_document_chars: 1,
            max_documents: 500,
            max_document_chars: 2_000_000,
            drop_short_documents: true,
        }
    }

    /// Create a strict configuration (every document must qualify)
    pub fn strict() -> Self {
        Self {
            min_document_chars: 200,
            max_documents: 20,
            max_document_chars: 100_000,
            drop_short_documents: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_documents == 0 {
            return Err("max_documents must be greater than 0".to_string());
        }
        if self.min_document_chars == 0 {
            return Err("min_document_chars must be greater than 0".to_string());
        }
        if self.max_document_chars < self.min_document_chars {
            return Err("max_document_chars must be at least min_document_chars".to_string());
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
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.min_document_chars, 50);
        assert_eq!(config.max_documents, 50);
        assert_eq!(config.max_document_chars, 400_000);
        assert!(config.drop_short_documents);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert_eq!(config.min_document_chars, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(!config.drop_short_documents);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = ValidationConfig {
            min_document_chars: 100,
            max_document_chars: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
