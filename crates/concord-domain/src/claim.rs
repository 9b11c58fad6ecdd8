//! Claim module - atomic assertions extracted from one document

use crate::ids::{ClaimId, DocumentId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Claim text as returned by the extraction capability, before scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClaim {
    /// The assertion text
    pub text: String,
}

impl RawClaim {
    /// Create a raw claim
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A scored claim
///
/// Claims are created in one batch per document and never mutated
/// afterwards. `confidence` is derived from the owning document's overall
/// credibility and never exceeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The assertion text
    pub text: String,

    /// Document this claim was extracted from
    pub source_doc_id: DocumentId,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl Claim {
    /// Create a new claim with a fresh identifier
    pub fn new(text: impl Into<String>, source_doc_id: DocumentId, confidence: f64) -> Self {
        Self::with_id(ClaimId::new(), text, source_doc_id, confidence)
    }

    /// Create a claim with an explicit identifier
    pub fn with_id(
        id: ClaimId,
        text: impl Into<String>,
        source_doc_id: DocumentId,
        confidence: f64,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            source_doc_id,
            confidence,
        }
    }

    /// Total order used for ranking: higher confidence first, then lower id
    pub fn rank_cmp(&self, other: &Claim) -> Ordering {
        other
            .confidence
            .total_cmp(&self.confidence)
            .then_with(|| self.id.cmp(&other.id))
    }
}
