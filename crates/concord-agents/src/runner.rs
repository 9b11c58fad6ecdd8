//! Per-document scoring branch
//!
//! [`AgentRunner::process`] is what the orchestrator spawns once per
//! document. It never fails: scoring and extraction faults are absorbed here
//! and recorded on the result, so one document's trouble cannot reach its
//! siblings.

use crate::agent::DefaultAgent;
use crate::config::AgentConfig;
use crate::hedging::HedgeDiscount;
use crate::registry::AgentRegistry;
use crate::signals::SignalContext;
use concord_domain::{
    Claim, ClaimExtractor, CredibilityScore, DocType, Document, FaultKind, PipelineFault, RawClaim,
};
use concord_llm::RetryPolicy;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Output of one scoring branch
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    /// The document, unchanged
    pub document: Document,
    /// Its credibility score
    pub score: CredibilityScore,
    /// Claims extracted from it, in extraction order
    pub claims: Vec<Claim>,
    /// Faults absorbed while processing it
    pub faults: Vec<PipelineFault>,
}

impl ScoredDocument {
    /// Whether the score came from the default agent after a scoring fault
    pub fn degraded(&self) -> bool {
        self.faults.iter().any(|f| f.kind == FaultKind::Scoring)
    }
}

/// Runs the scoring agent and claim extraction for one document
#[derive(Clone)]
pub struct AgentRunner {
    registry: Arc<AgentRegistry>,
    extractor: Arc<dyn ClaimExtractor>,
    context: SignalContext,
    hedging: HedgeDiscount,
    retry: RetryPolicy,
    max_claims: usize,
}

impl AgentRunner {
    /// Create a runner with default configuration
    pub fn new(
        registry: Arc<AgentRegistry>,
        extractor: Arc<dyn ClaimExtractor>,
        context: SignalContext,
    ) -> Self {
        let config = AgentConfig::default();
        Self {
            registry,
            extractor,
            context,
            hedging: HedgeDiscount::from_config(&config),
            retry: RetryPolicy::default(),
            max_claims: config.max_claims_per_document,
        }
    }

    /// Apply hedging and claim limits from the agent configuration
    pub fn with_config(mut self, config: &AgentConfig) -> Self {
        self.hedging = HedgeDiscount::from_config(config);
        self.max_claims = config.max_claims_per_document;
        self
    }

    /// Retry policy for extraction calls
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Score one document and extract its claims
    pub async fn process(&self, document: Document) -> ScoredDocument {
        let doc_type = document.effective_type();
        let agent = self.registry.get(doc_type);
        let mut faults = Vec::new();

        let score = match agent.score(&document, &self.context) {
            Ok(score) => score,
            Err(e) => {
                warn!(doc_id = %document.id, %doc_type, error = %e, "Scoring failed, using default score");
                faults.push(PipelineFault::for_document(
                    FaultKind::Scoring,
                    document.id,
                    e.to_string(),
                ));
                DefaultAgent::conservative_score()
            }
        };

        let raw = match self
            .retry
            .run("extract_claims", || {
                self.extractor.extract_claims(&document, doc_type)
            })
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(doc_id = %document.id, %doc_type, error = %e, "Extraction failed, no claims");
                faults.push(PipelineFault::for_document(
                    FaultKind::Extraction,
                    document.id,
                    e.to_string(),
                ));
                Vec::new()
            }
        };

        let limit = agent.claim_budget().max.min(self.max_claims);
        let claims = self.build_claims(&document, doc_type, &score, raw, limit);

        debug!(
            doc_id = %document.id,
            %doc_type,
            overall = score.overall,
            claims = claims.len(),
            "Document scored"
        );

        ScoredDocument {
            document,
            score,
            claims,
            faults,
        }
    }

    fn build_claims(
        &self,
        document: &Document,
        doc_type: DocType,
        score: &CredibilityScore,
        raw: Vec<RawClaim>,
        limit: usize,
    ) -> Vec<Claim> {
        let mut seen = HashSet::new();
        let claims: Vec<Claim> = raw
            .into_iter()
            .map(|c| c.text.trim().to_string())
            .filter(|text| !text.is_empty() && seen.insert(text.to_lowercase()))
            .take(limit)
            .map(|text| {
                let confidence = self.hedging.confidence(score.overall, &text);
                Claim::new(text, document.id, confidence)
            })
            .collect();

        if claims.is_empty() {
            debug!(doc_id = %document.id, %doc_type, "Document contributed no claims");
        }
        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ScoringAgent, DEFAULT_SCORE};
    use crate::error::AgentError;
    use crate::extraction::{LlmClaimExtractor, SentenceExtractor};
    use concord_domain::{CapabilityError, DocumentId};
    use concord_llm::MockProvider;

    struct FailingAgent;

    impl ScoringAgent for FailingAgent {
        fn doc_type(&self) -> DocType {
            DocType::NewsArticle
        }

        fn score(&self, _: &Document, _: &SignalContext) -> Result<CredibilityScore, AgentError> {
            Err(AgentError::Scoring {
                doc_type: DocType::NewsArticle,
                message: "trust table unavailable".into(),
            })
        }
    }

    fn runner(extractor: Arc<dyn ClaimExtractor>) -> AgentRunner {
        AgentRunner::new(
            Arc::new(AgentRegistry::standard()),
            extractor,
            SignalContext::default(),
        )
        .with_retry(RetryPolicy::immediate(2))
    }

    const TEXT: &str = "The council approved the new budget on Monday evening. \
                        Spending on parks may increase by a small amount next year.";

    #[tokio::test]
    async fn test_claims_carry_document_confidence() {
        let doc = Document::new(DocumentId::new(), TEXT).with_doc_type(DocType::NewsArticle);
        let result = runner(Arc::new(SentenceExtractor)).process(doc.clone()).await;

        assert!(result.faults.is_empty());
        assert_eq!(result.claims.len(), 2);
        assert!(result.claims.iter().all(|c| c.source_doc_id == doc.id));
        assert_eq!(result.claims[0].confidence, result.score.overall);
        // "may" discounts the second claim
        assert!(result.claims[1].confidence < result.score.overall);
    }

    #[tokio::test]
    async fn test_scoring_fault_degrades_to_default() {
        let registry = AgentRegistry::standard().with_agent(Arc::new(FailingAgent));
        let runner = AgentRunner::new(
            Arc::new(registry),
            Arc::new(SentenceExtractor),
            SignalContext::default(),
        );
        let doc = Document::new(DocumentId::new(), TEXT).with_doc_type(DocType::NewsArticle);

        let result = runner.process(doc).await;

        assert!(result.degraded());
        assert_eq!(result.score, DefaultAgent::conservative_score());
        assert_eq!(result.score.overall, DEFAULT_SCORE);
        assert_eq!(result.claims.len(), 2);
    }

    #[tokio::test]
    async fn test_extraction_fault_gives_zero_claims() {
        let mock = MockProvider::default();
        mock.add_error("Extract", CapabilityError::Fatal("no model".into()));
        let doc = Document::new(DocumentId::new(), TEXT).with_doc_type(DocType::BlogPost);

        let result = runner(Arc::new(LlmClaimExtractor::new(Arc::new(mock.clone()))))
            .process(doc)
            .await;

        assert!(result.claims.is_empty());
        assert_eq!(result.faults.len(), 1);
        assert_eq!(result.faults[0].kind, FaultKind::Extraction);
        // fatal errors are not retried
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transient_extraction_error_is_retried() {
        let mock = MockProvider::new(r#"{"claims": ["Parks will get more funding."]}"#);
        mock.push_failure(CapabilityError::Transient("busy".into()));
        let doc = Document::new(DocumentId::new(), TEXT).with_doc_type(DocType::NewsArticle);

        let result = runner(Arc::new(LlmClaimExtractor::new(Arc::new(mock.clone()))))
            .process(doc)
            .await;

        assert!(result.faults.is_empty());
        assert_eq!(result.claims.len(), 1);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_claims_are_capped_and_deduplicated() {
        let claims: Vec<String> = (0..20).map(|i| format!("\"Claim number {}.\"", i)).collect();
        let response = format!("[\"Claim number 0.\", {}]", claims.join(", "));
        let mock = MockProvider::new(response);
        let doc = Document::new(DocumentId::new(), TEXT).with_doc_type(DocType::BlogPost);

        let result = runner(Arc::new(LlmClaimExtractor::new(Arc::new(mock))))
            .with_config(&AgentConfig {
                max_claims_per_document: 5,
                ..AgentConfig::default()
            })
            .process(doc)
            .await;

        let texts: Vec<&str> = result.claims.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Claim number 0.",
                "Claim number 1.",
                "Claim number 2.",
                "Claim number 3.",
                "Claim number 4."
            ]
        );
    }

    #[tokio::test]
    async fn test_untyped_document_uses_default_agent() {
        let doc = Document::new(DocumentId::new(), TEXT);
        let result = runner(Arc::new(SentenceExtractor)).process(doc).await;
        assert_eq!(result.score.overall, DEFAULT_SCORE);
        assert!(!result.degraded());
    }
}
