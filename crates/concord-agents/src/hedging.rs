//! Claim-level hedging discount
//!
//! A claim's confidence starts at its document's overall score and is
//! multiplied by the configured discount once per distinct hedging term it
//! contains, never dropping below `min_hedge_factor` of the overall score.

use crate::config::AgentConfig;
use concord_domain::credibility::clamp_unit;
use std::collections::BTreeSet;

/// Single-word hedging and speculative vocabulary
pub const HEDGE_WORDS: &[&str] = &[
    "may",
    "might",
    "could",
    "possibly",
    "possible",
    "perhaps",
    "suggests",
    "suggest",
    "suggested",
    "appears",
    "appear",
    "seems",
    "seem",
    "likely",
    "unlikely",
    "preliminary",
    "speculative",
    "unclear",
    "potentially",
    "allegedly",
    "reportedly",
    "uncertain",
    "probably",
    "approximately",
    "roughly",
];

/// Multi-word hedging phrases, matched on whole words
pub const HEDGE_PHRASES: &[&str] = &[
    "not yet confirmed",
    "it is thought",
    "is believed to",
    "remains to be seen",
    "early evidence",
];

/// Multiplicative, bounded confidence discount for hedged claims
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeDiscount {
    discount: f64,
    min_factor: f64,
}

impl Default for HedgeDiscount {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

impl HedgeDiscount {
    /// Create a discount; both values are clamped into [0, 1]
    pub fn new(discount: f64, min_factor: f64) -> Self {
        Self {
            discount: clamp_unit(discount),
            min_factor: clamp_unit(min_factor),
        }
    }

    /// Discount from the agent configuration
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.hedge_discount, config.min_hedge_factor)
    }

    /// Distinct hedging terms in a claim
    pub fn hedges(text: &str) -> BTreeSet<&'static str> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let joined = format!(" {} ", words.join(" "));

        let mut found: BTreeSet<&'static str> = HEDGE_WORDS
            .iter()
            .copied()
            .filter(|hedge| words.iter().any(|w| w == hedge))
            .collect();
        found.extend(
            HEDGE_PHRASES
                .iter()
                .copied()
                .filter(|phrase| joined.contains(&format!(" {} ", phrase))),
        );
        found
    }

    /// Factor in `[min_factor, 1]` for a claim
    pub fn factor(&self, text: &str) -> f64 {
        let hits = Self::hedges(text).len();
        let hits = i32::try_from(hits).unwrap_or(i32::MAX);
        self.discount.powi(hits).max(self.min_factor).min(1.0)
    }

    /// Confidence of a claim from its document's overall score
    ///
    /// The result never exceeds `overall`.
    pub fn confidence(&self, overall: f64, text: &str) -> f64 {
        clamp_unit(overall) * self.factor(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertive_claim_keeps_overall() {
        let hedging = HedgeDiscount::default();
        assert_eq!(hedging.confidence(0.8, "The bridge opened in 2019."), 0.8);
    }

    #[test]
    fn test_each_distinct_hedge_discounts_once() {
        let hedging = HedgeDiscount::new(0.85, 0.5);
        assert!((hedging.factor("This may help.") - 0.85).abs() < 1e-12);
        // repeated word counts once
        assert!((hedging.factor("It may, or may not, help.") - 0.85).abs() < 1e-12);
        assert!((hedging.factor("It may possibly help.") - 0.85 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_floor() {
        let hedging = HedgeDiscount::new(0.85, 0.5);
        let text = "It may possibly, perhaps, likely and reportedly suggest an unclear, preliminary result.";
        assert_eq!(hedging.factor(text), 0.5);
        assert_eq!(hedging.confidence(0.6, text), 0.3);
    }

    #[test]
    fn test_phrases_and_word_boundaries() {
        let hedges = HedgeDiscount::hedges("Mayors said it is thought to be safe.");
        assert_eq!(hedges.into_iter().collect::<Vec<_>>(), vec!["it is thought"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a claim's confidence never exceeds its document's score
        #[test]
        fn test_confidence_bounded_by_overall(
            overall in 0.0f64..=1.0,
            discount in 0.01f64..=1.0,
            min_factor in 0.0f64..=1.0,
            text in "[a-z ,.']{0,120}",
        ) {
            let hedging = HedgeDiscount::new(discount, min_factor);
            let confidence = hedging.confidence(overall, &text);
            prop_assert!(confidence <= overall);
            prop_assert!(confidence >= overall * min_factor.min(1.0) - 1e-12);
        }
    }
}
