//! Offline sentence-split claim extraction

use async_trait::async_trait;
use concord_domain::{CapabilityError, ClaimExtractor, DocType, Document, RawClaim};

/// Sentences this short or shorter are not treated as claims
pub const MIN_CLAIM_CHARS: usize = 40;

/// Deterministic extractor that treats long leading sentences as claims
///
/// Legal text also splits on `;`. Only the first few sentences are
/// considered (10 research, 8 news and legal, 6 otherwise).
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceExtractor;

impl SentenceExtractor {
    /// How many leading sentences are considered for a type
    pub fn window(doc_type: DocType) -> usize {
        match doc_type {
            DocType::ResearchPaper => 10,
            DocType::NewsArticle | DocType::LegalDocument => 8,
            DocType::BlogPost | DocType::Unknown => 6,
        }
    }

    /// Extract claims from plain text
    pub fn extract_text(text: &str, doc_type: DocType) -> Vec<RawClaim> {
        let legal = doc_type == DocType::LegalDocument;
        split_sentences(text, legal)
            .into_iter()
            .take(Self::window(doc_type))
            .filter(|s| s.chars().count() > MIN_CLAIM_CHARS)
            .map(RawClaim::new)
            .collect()
    }
}

/// Split after `.`, `!` or `?` (and `;` when `semicolons`) followed by whitespace
pub fn split_sentences(text: &str, semicolons: bool) -> Vec<&str> {
    let is_end = |c: char| matches!(c, '.' | '!' | '?') || (semicolons && c == ';');
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let followed_by_space = chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if is_end(c) && followed_by_space {
            let end = idx + c.len_utf8();
            sentences.push(text[start..end].trim());
            start = end;
        }
    }
    sentences.push(text[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

#[async_trait]
impl ClaimExtractor for SentenceExtractor {
    async fn extract_claims(
        &self,
        document: &Document,
        doc_type: DocType,
    ) -> Result<Vec<RawClaim>, CapabilityError> {
        Ok(Self::extract_text(&document.text, doc_type))
    }
}
