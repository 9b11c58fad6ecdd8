//! Scoring agent variants
//!
//! Each variant is a flat, independent implementation of [`ScoringAgent`] for
//! one document type. Variants hold no state; everything they read comes from
//! the document and the shared [`SignalContext`].

use crate::error::AgentError;
use crate::signals::{self, SignalContext};
use concord_domain::{CredibilityScore, DocType, Document, Signal};

/// Score of a document no typed agent handles
pub const DEFAULT_SCORE: f64 = 0.5;

/// Breakdown key of the default variant
pub const UNCLASSIFIED_SIGNAL: &str = "unclassified";

/// How many claims a variant aims to extract from one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimBudget {
    /// Fewest claims the extraction prompt asks for
    pub min: usize,
    /// Most claims kept
    pub max: usize,
}

impl ClaimBudget {
    /// Budget for a document type
    pub const fn for_type(doc_type: DocType) -> Self {
        match doc_type {
            DocType::ResearchPaper => Self { min: 8, max: 12 },
            DocType::NewsArticle => Self { min: 5, max: 8 },
            DocType::BlogPost => Self { min: 4, max: 6 },
            DocType::LegalDocument => Self { min: 5, max: 8 },
            DocType::Unknown => Self { min: 3, max: 6 },
        }
    }
}

/// Type-specific credibility scoring
pub trait ScoringAgent: Send + Sync {
    /// Document type this agent handles
    fn doc_type(&self) -> DocType;

    /// Score one document
    fn score(&self, document: &Document, ctx: &SignalContext) -> Result<CredibilityScore, AgentError>;

    /// Claim budget for documents of this type
    fn claim_budget(&self) -> ClaimBudget {
        ClaimBudget::for_type(self.doc_type())
    }
}

/// Research paper agent: venue, citations, authors, recency, source authority
#[derive(Debug, Clone, Copy, Default)]
pub struct ResearchAgent;

impl ScoringAgent for ResearchAgent {
    fn doc_type(&self) -> DocType {
        DocType::ResearchPaper
    }

    fn score(&self, document: &Document, ctx: &SignalContext) -> Result<CredibilityScore, AgentError> {
        Ok(CredibilityScore::from_signals(signals::research::signals(document, ctx)))
    }
}

/// News agent: outlet trust, recency, quotes, corroboration, byline
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsAgent;

impl ScoringAgent for NewsAgent {
    fn doc_type(&self) -> DocType {
        DocType::NewsArticle
    }

    fn score(&self, document: &Document, ctx: &SignalContext) -> Result<CredibilityScore, AgentError> {
        Ok(CredibilityScore::from_signals(signals::news::signals(document, ctx)))
    }
}

/// Blog agent: domain authority, author credentials, references, recency
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogAgent;

impl ScoringAgent for BlogAgent {
    fn doc_type(&self) -> DocType {
        DocType::BlogPost
    }

    fn score(&self, document: &Document, ctx: &SignalContext) -> Result<CredibilityScore, AgentError> {
        Ok(CredibilityScore::from_signals(signals::blog::signals(document, ctx)))
    }
}

/// Legal agent: official source, jurisdiction, statutes, recency
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalAgent;

impl ScoringAgent for LegalAgent {
    fn doc_type(&self) -> DocType {
        DocType::LegalDocument
    }

    fn score(&self, document: &Document, ctx: &SignalContext) -> Result<CredibilityScore, AgentError> {
        Ok(CredibilityScore::from_signals(signals::legal::signals(document, ctx)))
    }
}

/// Conservative agent for unknown types and failed scoring
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAgent;

impl DefaultAgent {
    /// The flat conservative score; never fails
    pub fn conservative_score() -> CredibilityScore {
        CredibilityScore::from_signals(vec![Signal::new(
            UNCLASSIFIED_SIGNAL,
            1.0,
            DEFAULT_SCORE,
            "Document type not recognized, neutral credibility assumed",
        )])
    }
}

impl ScoringAgent for DefaultAgent {
    fn doc_type(&self) -> DocType {
        DocType::Unknown
    }

    fn score(&self, _document: &Document, _ctx: &SignalContext) -> Result<CredibilityScore, AgentError> {
        Ok(Self::conservative_score())
    }
}

/// Fixed weights of a variant, as `(signal, weight)` pairs
pub fn weights_for(doc_type: DocType) -> &'static [(&'static str, f64)] {
    match doc_type {
        DocType::ResearchPaper => &signals::research::WEIGHTS,
        DocType::NewsArticle => &signals::news::WEIGHTS,
        DocType::BlogPost => &signals::blog::WEIGHTS,
        DocType::LegalDocument => &signals::legal::WEIGHTS,
        DocType::Unknown => &[(UNCLASSIFIED_SIGNAL, 1.0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::DocumentId;

    #[test]
    fn test_weights_sum_to_one_for_every_type() {
        for doc_type in DocType::ALL {
            let sum: f64 = weights_for(doc_type).iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{}", doc_type);
        }
    }

    #[test]
    fn test_breakdown_keys_match_weights() {
        let doc = Document::new(DocumentId::new(), "Some text about things.");
        let ctx = SignalContext::default();
        let agents: [&dyn ScoringAgent; 5] =
            [&ResearchAgent, &NewsAgent, &BlogAgent, &LegalAgent, &DefaultAgent];

        for agent in agents {
            let score = agent.score(&doc, &ctx).unwrap();
            let mut expected: Vec<&str> =
                weights_for(agent.doc_type()).iter().map(|(n, _)| *n).collect();
            expected.sort_unstable();
            let keys: Vec<&str> = score.breakdown.keys().map(String::as_str).collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_default_is_flat() {
        let score = DefaultAgent::conservative_score();
        assert_eq!(score.overall, DEFAULT_SCORE);
        assert_eq!(score.signal(UNCLASSIFIED_SIGNAL), Some(DEFAULT_SCORE));
    }

    #[test]
    fn test_budgets() {
        assert_eq!(ResearchAgent.claim_budget(), ClaimBudget { min: 8, max: 12 });
        assert_eq!(BlogAgent.claim_budget().max, 6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use concord_domain::DocumentId;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Property: overall is in [0, 1] and equals the weighted breakdown sum
        #[test]
        fn test_overall_is_weighted_breakdown(
            text in ".{1,300}",
            citations in -10.0f64..1e7,
            year in 1900i64..2100,
            corroboration in -1.0f64..2.0,
            credentials in -1.0f64..2.0,
            url in proptest::option::of("https://[a-z]{1,8}\\.(com|gov|edu|org)/x"),
        ) {
            let mut doc = Document::new(DocumentId::from_value(7), text)
                .with_metadata("citations", json!(citations))
                .with_metadata("year", json!(year))
                .with_metadata("corroboration_score", json!(corroboration))
                .with_metadata("author_credentials_score", json!(credentials));
            doc.source_url = url;
            let ctx = SignalContext::default();
            let agents: [&dyn ScoringAgent; 5] =
                [&ResearchAgent, &NewsAgent, &BlogAgent, &LegalAgent, &DefaultAgent];

            for agent in agents {
                let score = agent.score(&doc, &ctx).unwrap();
                let expected: f64 = weights_for(agent.doc_type())
                    .iter()
                    .map(|(name, w)| w * score.breakdown[*name])
                    .sum();
                prop_assert!((0.0..=1.0).contains(&score.overall));
                prop_assert!((score.overall - expected).abs() < 1e-9);
                for value in score.breakdown.values() {
                    prop_assert!((0.0..=1.0).contains(value));
                }
            }
        }
    }
}
