//! Job submission shape accepted from callers

use crate::conflict::ConflictStrategy;
use crate::document::DocType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Summarization backend requested for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarizerBackend {
    /// Language-model summary over the resolved claims
    #[default]
    Rag,
    /// Offline extractive summary
    Bart,
}

impl SummarizerBackend {
    /// Get the backend name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SummarizerBackend::Rag => "rag",
            SummarizerBackend::Bart => "bart",
        }
    }
}

impl fmt::Display for SummarizerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested level of detail of the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDepth {
    /// A few sentences
    Brief,
    /// A handful of sections
    #[default]
    Standard,
    /// Longer sections with per-source detail
    Detailed,
    /// Research-style report
    DeepResearch,
}

impl SummaryDepth {
    /// Get the depth name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryDepth::Brief => "brief",
            SummaryDepth::Standard => "standard",
            SummaryDepth::Detailed => "detailed",
            SummaryDepth::DeepResearch => "deep_research",
        }
    }
}

impl fmt::Display for SummaryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conflict strategy as submitted: an explicit strategy or `auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyChoice {
    /// Pick the default strategy of the plurality document type
    #[default]
    Auto,
    /// See [`ConflictStrategy::WeightedVote`]
    WeightedVote,
    /// See [`ConflictStrategy::MajorityVote`]
    MajorityVote,
    /// See [`ConflictStrategy::HighestCredibilityWins`]
    HighestCredibilityWins,
    /// See [`ConflictStrategy::Conservative`]
    Conservative,
}

impl StrategyChoice {
    /// The explicit strategy, or `None` for `auto`
    pub fn explicit(&self) -> Option<ConflictStrategy> {
        match self {
            StrategyChoice::Auto => None,
            StrategyChoice::WeightedVote => Some(ConflictStrategy::WeightedVote),
            StrategyChoice::MajorityVote => Some(ConflictStrategy::MajorityVote),
            StrategyChoice::HighestCredibilityWins => Some(ConflictStrategy::HighestCredibilityWins),
            StrategyChoice::Conservative => Some(ConflictStrategy::Conservative),
        }
    }
}

impl From<ConflictStrategy> for StrategyChoice {
    fn from(strategy: ConflictStrategy) -> Self {
        match strategy {
            ConflictStrategy::WeightedVote => StrategyChoice::WeightedVote,
            ConflictStrategy::MajorityVote => StrategyChoice::MajorityVote,
            ConflictStrategy::HighestCredibilityWins => StrategyChoice::HighestCredibilityWins,
            ConflictStrategy::Conservative => StrategyChoice::Conservative,
        }
    }
}

/// One document of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Raw document text
    pub text: String,

    /// Optional title
    #[serde(default)]
    pub title: Option<String>,

    /// Optional source URL
    #[serde(default)]
    pub source_url: Option<String>,

    /// Declared type; bypasses the classifier when present
    #[serde(default)]
    pub doc_type: Option<DocType>,

    /// Type-specific metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl DocumentInput {
    /// Create an input with text only
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            source_url: None,
            doc_type: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the source URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Declare the document type
    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A request to run the pipeline over a batch of documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    /// Documents to process
    pub documents: Vec<DocumentInput>,

    /// Summarization backend
    #[serde(default)]
    pub summarizer_backend: SummarizerBackend,

    /// Conflict strategy, `auto` by default
    #[serde(default)]
    pub conflict_strategy: StrategyChoice,

    /// Summary depth, `standard` by default
    #[serde(default)]
    pub summary_depth: SummaryDepth,
}

impl JobSubmission {
    /// Submission with default options
    pub fn new(documents: Vec<DocumentInput>) -> Self {
        Self {
            documents,
            summarizer_backend: SummarizerBackend::default(),
            conflict_strategy: StrategyChoice::default(),
            summary_depth: SummaryDepth::default(),
        }
    }

    /// Set the conflict strategy
    pub fn with_strategy(mut self, strategy: StrategyChoice) -> Self {
        self.conflict_strategy = strategy;
        self
    }

    /// Set the summarizer backend
    pub fn with_backend(mut self, backend: SummarizerBackend) -> Self {
        self.summarizer_backend = backend;
        self
    }

    /// Set the summary depth
    pub fn with_depth(mut self, depth: SummaryDepth) -> Self {
        self.summary_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let json = r#"{"documents": [{"text": "hello"}]}"#;
        let submission: JobSubmission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.documents.len(), 1);
        assert_eq!(submission.summarizer_backend, SummarizerBackend::Rag);
        assert_eq!(submission.conflict_strategy, StrategyChoice::Auto);
        assert_eq!(submission.summary_depth, SummaryDepth::Standard);
        assert!(submission.documents[0].doc_type.is_none());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "documents": [{"text": "t", "doc_type": "legal_document", "metadata": {"jurisdiction": "eu"}}],
            "summarizer_backend": "bart",
            "conflict_strategy": "highest_credibility_wins",
            "summary_depth": "deep_research"
        }"#;
        let submission: JobSubmission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.summarizer_backend, SummarizerBackend::Bart);
        assert_eq!(
            submission.conflict_strategy.explicit(),
            Some(ConflictStrategy::HighestCredibilityWins)
        );
        assert_eq!(submission.summary_depth, SummaryDepth::DeepResearch);
        assert_eq!(submission.documents[0].doc_type, Some(DocType::LegalDocument));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let json = r#"{"documents": [], "conflict_strategy": "coin_flip"}"#;
        assert!(serde_json::from_str::<JobSubmission>(json).is_err());
    }

    #[test]
    fn test_auto_has_no_explicit_strategy() {
        assert_eq!(StrategyChoice::Auto.explicit(), None);
        for strategy in ConflictStrategy::ALL {
            assert_eq!(StrategyChoice::from(strategy).explicit(), Some(strategy));
        }
    }
}
