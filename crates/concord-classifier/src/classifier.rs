//! Keyword classifier with optional language-model fallback

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::signals::{best_match, simple_hint};
use async_trait::async_trait;
use concord_domain::{Classification, DocType, Document, DocumentClassifier, LanguageModel};
use concord_llm::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, warn};

const LABEL_PROMPT: &str = "You are a document classifier. Classify the document into exactly ONE of: \
research_paper, news_article, blog_post, legal_document, unknown. \
Respond with ONLY the label, nothing else.";

/// Which stage decided a document's type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMethod {
    /// Keyword/pattern score reached the threshold
    Keywords,
    /// The language model answered
    Model,
    /// A last-resort hint matched
    Hint,
    /// Nothing decided
    Default,
}

/// Classifier over keyword/pattern tables
///
/// Without a language model it is fully offline and deterministic.
#[derive(Clone)]
pub struct KeywordClassifier {
    config: ClassifierConfig,
    model: Option<Arc<dyn LanguageModel>>,
    retry: RetryPolicy,
}

impl KeywordClassifier {
    /// Create a classifier with the given configuration and no model
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            model: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Offline classifier with default configuration
    pub fn offline() -> Self {
        Self::new(ClassifierConfig::default())
    }

    /// Use a language model for low-confidence documents
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>, retry: RetryPolicy) -> Self {
        self.model = Some(model);
        self.retry = retry;
        self
    }

    fn sample(document: &Document, max_chars: usize) -> String {
        let title = document.title.as_deref().unwrap_or("");
        format!("{}\n\n{}", title, document.text)
            .chars()
            .take(max_chars)
            .collect()
    }

    fn keyword_decision(&self, document: &Document) -> Option<DocType> {
        let sample = Self::sample(document, self.config.sample_chars);
        let (doc_type, score) = best_match(&sample)?;
        debug!(doc_id = %document.id, %doc_type, score, "Keyword score");
        (score >= self.config.min_keyword_score).then_some(doc_type)
    }

    fn hint_decision(document: &Document) -> (DocType, ClassificationMethod) {
        match simple_hint(&document.text) {
            Some(doc_type) => (doc_type, ClassificationMethod::Hint),
            None => (DocType::Unknown, ClassificationMethod::Default),
        }
    }

    /// Classify without consulting the language model
    pub fn classify_offline(&self, document: &Document) -> DocType {
        self.keyword_decision(document)
            .unwrap_or_else(|| Self::hint_decision(document).0)
    }

    async fn ask_model(
        &self,
        model: &Arc<dyn LanguageModel>,
        document: &Document,
    ) -> Result<DocType, ClassifierError> {
        let prompt = format!(
            "{}\n\nDocument:\n{}",
            LABEL_PROMPT,
            Self::sample(document, self.config.llm_sample_chars)
        );
        let answer = self
            .retry
            .run("classify", || model.generate(&prompt))
            .await?;
        Ok(parse_label(&answer).unwrap_or(DocType::Unknown))
    }

    /// Classify and report which stage decided, plus any absorbed failure
    pub async fn classify_detailed(
        &self,
        document: &Document,
    ) -> (DocType, ClassificationMethod, Option<ClassifierError>) {
        if let Some(doc_type) = self.keyword_decision(document) {
            return (doc_type, ClassificationMethod::Keywords, None);
        }

        let Some(model) = &self.model else {
            let (doc_type, method) = Self::hint_decision(document);
            return (doc_type, method, None);
        };

        match self.ask_model(model, document).await {
            Ok(doc_type) => (doc_type, ClassificationMethod::Model, None),
            Err(e) => {
                warn!(doc_id = %document.id, error = %e, "Classifier model failed, using hints");
                let (doc_type, method) = Self::hint_decision(document);
                (doc_type, method, Some(e))
            }
        }
    }
}

/// Parse a model answer into a type label
///
/// Accepts surrounding whitespace, quotes, punctuation and spaces or hyphens
/// in place of underscores. Only the first line is considered.
pub fn parse_label(answer: &str) -> Option<DocType> {
    let first_line = answer.lines().find(|l| !l.trim().is_empty())?;
    let normalized: String = first_line
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    DocType::parse(&normalized)
}

#[async_trait]
impl DocumentClassifier for KeywordClassifier {
    async fn classify(&self, document: &Document) -> DocType {
        self.classify_detailed(document).await.0
    }

    async fn classify_reporting(&self, document: &Document) -> Classification {
        let (doc_type, _, fault) = self.classify_detailed(document).await;
        Classification {
            doc_type,
            fault: fault.map(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::{CapabilityError, DocumentId};
    use concord_llm::MockProvider;

    fn doc(text: &str) -> Document {
        Document::new(DocumentId::new(), text)
    }

    fn with_mock(mock: &MockProvider) -> KeywordClassifier {
        KeywordClassifier::offline().with_model(Arc::new(mock.clone()), RetryPolicy::immediate(2))
    }

    #[test]
    fn test_research_paper() {
        let d = doc(
            "Abstract\nWe present a dataset and methodology.\n\n1. Introduction\n\
             Prior results (Lee et al) are discussed. See doi.org/10.1/abc and arxiv.org/abs/1.",
        );
        assert_eq!(KeywordClassifier::offline().classify_offline(&d), DocType::ResearchPaper);
    }

    #[test]
    fn test_news_article() {
        let d = doc(
            "By Maria Lopez\nThe ministry said on Tuesday, according to Reuters, that the \
             bureau had published new figures two days ago.",
        );
        assert_eq!(KeywordClassifier::offline().classify_offline(&d), DocType::NewsArticle);
    }

    #[test]
    fn test_blog_post() {
        let d = doc(
            "I think this is my experience after a year of running. Subscribe to my \
             newsletter on substack.com and comment below!",
        );
        assert_eq!(KeywordClassifier::offline().classify_offline(&d), DocType::BlogPost);
    }

    #[test]
    fn test_title_counts_towards_sample() {
        let d = doc("plain words with nothing special in them at all")
            .with_title("WHEREAS hereinafter pursuant to");
        assert_eq!(KeywordClassifier::offline().classify_offline(&d), DocType::LegalDocument);
    }

    #[test]
    fn test_unremarkable_text_is_unknown() {
        let d = doc("The weather was pleasant and the walk was long.");
        assert_eq!(KeywordClassifier::offline().classify_offline(&d), DocType::Unknown);
    }

    #[tokio::test]
    async fn test_model_decides_low_confidence() {
        let mock = MockProvider::new("blog_post");
        let classifier = with_mock(&mock);

        let d = doc("The weather was pleasant and the walk was long.");
        let (doc_type, method, fault) = classifier.classify_detailed(&d).await;

        assert_eq!(doc_type, DocType::BlogPost);
        assert_eq!(method, ClassificationMethod::Model);
        assert!(fault.is_none());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_model_not_called_when_keywords_decide() {
        let mock = MockProvider::new("blog_post");
        let classifier = with_mock(&mock);

        let d = doc("WHEREAS the parties, hereinafter the Parties, act pursuant to § 12.");
        assert_eq!(classifier.classify(&d).await, DocType::LegalDocument);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_garbage_label_is_unknown() {
        let mock = MockProvider::new("a recipe, probably");
        let classifier = with_mock(&mock);

        let d = doc("The weather was pleasant and the walk was long.");
        assert_eq!(classifier.classify(&d).await, DocType::Unknown);
    }

    #[tokio::test]
    async fn test_model_failure_degrades_and_reports() {
        let mock = MockProvider::default();
        mock.add_error("classifier", CapabilityError::Fatal("no key".into()));
        let classifier = with_mock(&mock);

        // One legal keyword and pattern: below the threshold, but a hint
        let d = doc("Whereas the weather was pleasant, the walk was long.");
        let classification = classifier.classify_reporting(&d).await;

        assert_eq!(classification.doc_type, DocType::LegalDocument);
        assert!(classification.fault.is_some());
    }

    #[test]
    fn test_parse_label_variants() {
        assert_eq!(parse_label("research_paper"), Some(DocType::ResearchPaper));
        assert_eq!(parse_label("  \"News Article\".\n"), Some(DocType::NewsArticle));
        assert_eq!(parse_label("blog-post"), Some(DocType::BlogPost));
        assert_eq!(parse_label("\n\nLEGAL_DOCUMENT"), Some(DocType::LegalDocument));
        assert_eq!(parse_label("memo"), None);
        assert_eq!(parse_label(""), None);
    }
}
