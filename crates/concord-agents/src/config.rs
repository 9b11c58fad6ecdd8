//! Configuration for the scoring agents

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the scoring agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Upper bound on claims kept per document, across all types
    pub max_claims_per_document: usize,

    /// Multiplier applied to a claim's confidence per distinct hedge word
    pub hedge_discount: f64,

    /// Lowest fraction of the document score a hedged claim can keep
    pub min_hedge_factor: f64,

    /// Maximum chunk size (characters) sent to the extraction model
    pub max_chunk_chars: usize,

    /// Optional JSON file of outlet trust scores merged over the built-ins
    pub trust_db_path: Option<PathBuf>,

    /// Optional JSON file of blog domain authority merged over the built-ins
    pub domain_db_path: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_claims_per_document: 12,
            hedge_discount: 0.85,
            min_hedge_factor: 0.5,
            max_chunk_chars: 4_000,
            trust_db_path: None,
            domain_db_path: None,
        }
    }
}

impl AgentConfig {
    /// Aggressive preset: fewer claims, harsher hedging discount
    pub fn aggressive() -> Self {
        Self {
            max_claims_per_document: 6,
            hedge_discount: 0.75,
            min_hedge_factor: 0.4,
            max_chunk_chars: 2_000,
            ..Self::default()
        }
    }

    /// Lenient preset: more claims, mild hedging discount
    pub fn lenient() -> Self {
        Self {
            max_claims_per_document: 20,
            hedge_discount: 0.95,
            min_hedge_factor: 0.7,
            max_chunk_chars: 8_000,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_claims_per_document == 0 {
            return Err("max_claims_per_document must be greater than 0".to_string());
        }
        if !(self.hedge_discount > 0.0 && self.hedge_discount <= 1.0) {
            return Err("hedge_discount must be in (0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_hedge_factor) {
            return Err("min_hedge_factor must be between 0.0 and 1.0".to_string());
        }
        if self.max_chunk_chars == 0 {
            return Err("max_chunk_chars must be greater than 0".to_string());
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(AgentConfig::default().validate().is_ok());
        assert!(AgentConfig::aggressive().validate().is_ok());
        assert!(AgentConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_discount_above_one_rejected() {
        let config = AgentConfig {
            hedge_discount: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AgentConfig::aggressive();
        let toml = config.to_toml().unwrap();
        assert_eq!(AgentConfig::from_toml(&toml).unwrap(), config);
    }
}
