//! Credibility score module
//!
//! A credibility score is a weighted combination of named signals, each in
//! [0, 1]. Weights are fixed per scoring-agent variant and sum to one, so the
//! overall score is itself in [0, 1].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance used when checking that a weight vector sums to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One named credibility signal with its weight and explanation
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Stable signal name (breakdown key)
    pub name: &'static str,
    /// Fixed weight of this signal for the agent variant
    pub weight: f64,
    /// Raw value; clamped into [0, 1] when the score is built
    pub value: f64,
    /// Human-readable explanation of the value
    pub explanation: String,
}

impl Signal {
    /// Create a new signal
    pub fn new(name: &'static str, weight: f64, value: f64, explanation: impl Into<String>) -> Self {
        Self {
            name,
            weight,
            value,
            explanation: explanation.into(),
        }
    }
}

/// Per-document credibility estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityScore {
    /// Weighted combination of the breakdown, in [0, 1]
    pub overall: f64,

    /// Signal name to value in [0, 1]
    pub breakdown: BTreeMap<String, f64>,

    /// Signal name to human-readable explanation
    pub explanations: BTreeMap<String, String>,
}

impl CredibilityScore {
    /// Build a score from a signal set
    ///
    /// Signal values are clamped into [0, 1] (NaN becomes 0). The overall
    /// score is `Σ weight * value`.
    pub fn from_signals(signals: Vec<Signal>) -> Self {
        debug_assert!(
            (signals.iter().map(|s| s.weight).sum::<f64>() - 1.0).abs() < WEIGHT_SUM_TOLERANCE,
            "signal weights must sum to 1"
        );

        let mut overall = 0.0;
        let mut breakdown = BTreeMap::new();
        let mut explanations = BTreeMap::new();

        for signal in signals {
            let value = clamp_unit(signal.value);
            overall += signal.weight * value;
            breakdown.insert(signal.name.to_string(), value);
            explanations.insert(signal.name.to_string(), signal.explanation);
        }

        Self {
            overall: clamp_unit(overall),
            breakdown,
            explanations,
        }
    }

    /// Single-signal score with full weight on one value
    pub fn flat(name: &'static str, value: f64, explanation: impl Into<String>) -> Self {
        Self::from_signals(vec![Signal::new(name, 1.0, value, explanation)])
    }

    /// Breakdown value for a signal
    pub fn signal(&self, name: &str) -> Option<f64> {
        self.breakdown.get(name).copied()
    }
}

/// Clamp a value into [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
