//! Resolver configuration
//!
//! Thresholds for clustering, tie detection and majority voting.

use serde::{Deserialize, Serialize};

/// Default cosine similarity a pair must exceed to share a cluster
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Default confidence gap under which `weighted_vote` calls a tie
pub const DEFAULT_TIE_EPSILON: f64 = 0.02;

/// Default confidence a claim needs to count as a high-trust vote
pub const DEFAULT_HIGH_TRUST_THRESHOLD: f64 = 0.7;

/// Configuration for conflict resolution
///
/// # Examples
///
/// ```
/// use concord_resolver::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(config.similarity_threshold, 0.75);
///
/// // Larger clusters, more ties
/// let config = ResolverConfig::aggressive();
/// assert!(config.similarity_threshold < 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Similarity (exclusive) above which two claims are linked
    pub similarity_threshold: f64,

    /// Confidence gap at or under which the top two texts are tied
    pub tie_epsilon: f64,

    /// Confidence at or above which a source counts for `majority_vote`
    pub high_trust_threshold: f64,

    /// Token Jaccard overlap at or above which two texts say the same thing
    pub near_identical_threshold: f64,

    /// Distinct high-trust sources a text needs to win `majority_vote`
    pub min_majority_sources: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            high_trust_threshold: DEFAULT_HIGH_TRUST_THRESHOLD,
            near_identical_threshold: 0.9,
            min_majority_sources: 2,
        }
    }
}

impl ResolverConfig {
    /// Aggressive preset: looser clusters, wider ties, fewer votes needed
    pub fn aggressive() -> Self {
        Self {
            similarity_threshold: 0.65,
            tie_epsilon: 0.05,
            high_trust_threshold: 0.6,
            near_identical_threshold: 0.8,
            min_majority_sources: 2,
        }
    }

    /// Lenient preset: tight clusters, narrow ties, stricter votes
    pub fn lenient() -> Self {
        Self {
            similarity_threshold: 0.85,
            tie_epsilon: 0.01,
            high_trust_threshold: 0.8,
            near_identical_threshold: 0.95,
            min_majority_sources: 3,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err("similarity_threshold must be between -1.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.tie_epsilon) {
            return Err("tie_epsilon must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.high_trust_threshold) {
            return Err("high_trust_threshold must be between 0.0 and 1.0".to_string());
        }
        if !(self.near_identical_threshold > 0.0 && self.near_identical_threshold <= 1.0) {
            return Err("near_identical_threshold must be in (0.0, 1.0]".to_string());
        }
        if self.min_majority_sources == 0 {
            return Err("min_majority_sources must be greater than 0".to_string());
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
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.similarity_threshold, 0.75);
        assert_eq!(config.tie_epsilon, 0.02);
        assert_eq!(config.high_trust_threshold, 0.7);
        assert_eq!(config.min_majority_sources, 2);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
        assert!(ResolverConfig::aggressive().validate().is_ok());
        assert!(ResolverConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_validation_catches_bad_values() {
        let config = ResolverConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            min_majority_sources: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ResolverConfig::from_toml("tie_epsilon = 0.1").unwrap();
        assert_eq!(config.tie_epsilon, 0.1);
        assert_eq!(config.similarity_threshold, 0.75);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ResolverConfig::lenient();
        let toml = config.to_toml().unwrap();
        assert_eq!(ResolverConfig::from_toml(&toml).unwrap(), config);
    }
}
