//! Language-model claim extraction

use super::chunking::TextChunker;
use super::parser::parse_claims;
use super::prompt::PromptBuilder;
use super::sentence::SentenceExtractor;
use crate::agent::ClaimBudget;
use async_trait::async_trait;
use concord_domain::{CapabilityError, ClaimExtractor, DocType, Document, LanguageModel, RawClaim};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default chunk size sent to the model, in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4_000;

/// Claim extraction through a language model
///
/// Long documents are chunked by paragraph and extracted chunk by chunk.
/// A chunk whose response cannot be parsed falls back to sentence
/// extraction; a failing model call is returned to the caller so it can be
/// retried or recorded.
#[derive(Clone)]
pub struct LlmClaimExtractor {
    model: Arc<dyn LanguageModel>,
    max_chunk_chars: usize,
}

impl LlmClaimExtractor {
    /// Create an extractor over a language model
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }

    /// Set the chunk size
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    async fn extract_chunk(
        &self,
        document: &Document,
        doc_type: DocType,
        chunk: &str,
        part: (usize, usize),
    ) -> Result<Vec<String>, CapabilityError> {
        let prompt = PromptBuilder::new(doc_type, chunk)
            .with_title(document.title.as_deref())
            .with_part(part.0, part.1)
            .build();
        debug!(doc_id = %document.id, part = part.0, prompt_len = prompt.len(), "Extracting claims");

        let response = self.model.generate(&prompt).await?;
        match parse_claims(&response) {
            Ok(claims) => Ok(claims),
            Err(e) => {
                warn!(doc_id = %document.id, error = %e, "Unparseable extraction output, using sentences");
                Ok(SentenceExtractor::extract_text(chunk, doc_type)
                    .into_iter()
                    .map(|c| c.text)
                    .collect())
            }
        }
    }
}

#[async_trait]
impl ClaimExtractor for LlmClaimExtractor {
    async fn extract_claims(
        &self,
        document: &Document,
        doc_type: DocType,
    ) -> Result<Vec<RawClaim>, CapabilityError> {
        let chunks = TextChunker::new(self.max_chunk_chars).chunk(&document.text);
        let total = chunks.len();
        let budget = ClaimBudget::for_type(doc_type).max;

        let mut seen = HashSet::new();
        let mut claims = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            for text in self.extract_chunk(document, doc_type, chunk, (idx + 1, total)).await? {
                if seen.insert(text.to_lowercase()) {
                    claims.push(RawClaim::new(text));
                }
            }
            if claims.len() >= budget {
                break;
            }
        }

        info!(
            doc_id = %document.id,
            %doc_type,
            chunks = total,
            claims = claims.len(),
            model = self.model.name(),
            "Claim extraction complete"
        );
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::DocumentId;
    use concord_llm::MockProvider;

    fn doc(text: &str) -> Document {
        Document::new(DocumentId::new(), text)
    }

    #[tokio::test]
    async fn test_extracts_from_model_json() {
        let mock = MockProvider::new(r#"{"claims": ["X causes Y.", "Z is rare."]}"#);
        let extractor = LlmClaimExtractor::new(Arc::new(mock.clone()));

        let claims = extractor
            .extract_claims(&doc("Some research text."), DocType::ResearchPaper)
            .await
            .unwrap();

        assert_eq!(claims, vec![RawClaim::new("X causes Y."), RawClaim::new("Z is rare.")]);
        assert_eq!(mock.call_count(), 1);
        assert!(mock.prompts()[0].contains("Extract 8 to 12"));
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back_to_sentences() {
        let mock = MockProvider::new("Sorry, I cannot help with that.");
        let extractor = LlmClaimExtractor::new(Arc::new(mock));
        let text = "The reservoir reached its highest level in thirty years this spring.";

        let claims = extractor
            .extract_claims(&doc(text), DocType::NewsArticle)
            .await
            .unwrap();
        assert_eq!(claims, vec![RawClaim::new(text)]);
    }

    #[tokio::test]
    async fn test_model_error_is_returned() {
        let mock = MockProvider::default();
        mock.push_failure(CapabilityError::Fatal("model gone".into()));
        let extractor = LlmClaimExtractor::new(Arc::new(mock));

        let result = extractor
            .extract_claims(&doc("Some text."), DocType::BlogPost)
            .await;
        assert_eq!(result, Err(CapabilityError::Fatal("model gone".into())));
    }

    #[tokio::test]
    async fn test_chunks_are_deduplicated() {
        let mock = MockProvider::new(r#"["Shared claim.", "Shared CLAIM."]"#);
        let extractor = LlmClaimExtractor::new(Arc::new(mock.clone())).with_max_chunk_chars(30);
        let text = "First paragraph of the text.\n\nSecond paragraph of the text.";

        let claims = extractor
            .extract_claims(&doc(text), DocType::NewsArticle)
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(claims, vec![RawClaim::new("Shared claim.")]);
        assert!(mock.prompts()[1].contains("part 2 of 2"));
    }
}
