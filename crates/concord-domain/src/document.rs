//! Document module - the unit of input to a job

use crate::ids::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Document type assigned by the classifier
///
/// `Unknown` is the universal default: classification never fails, it
/// degrades to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// Peer-reviewed or preprint research
    ResearchPaper,
    /// Journalism from a news outlet
    NewsArticle,
    /// Personal or company blog content
    BlogPost,
    /// Statutes, contracts, court documents
    LegalDocument,
    /// Anything the classifier could not place
    Unknown,
}

impl DocType {
    /// All document types, in declaration order
    pub const ALL: [DocType; 5] = [
        DocType::ResearchPaper,
        DocType::NewsArticle,
        DocType::BlogPost,
        DocType::LegalDocument,
        DocType::Unknown,
    ];

    /// Get the document type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::ResearchPaper => "research_paper",
            DocType::NewsArticle => "news_article",
            DocType::BlogPost => "blog_post",
            DocType::LegalDocument => "legal_document",
            DocType::Unknown => "unknown",
        }
    }

    /// Parse a document type from its label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "research_paper" => Some(DocType::ResearchPaper),
            "news_article" => Some(DocType::NewsArticle),
            "blog_post" => Some(DocType::BlogPost),
            "legal_document" => Some(DocType::LegalDocument),
            "unknown" => Some(DocType::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

/// A document inside a job
///
/// The document type is assigned at most once: either supplied at submission
/// or set by the classifier. After that it cannot change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within the job
    pub id: DocumentId,

    /// Raw document text
    pub text: String,

    /// Optional title
    pub title: Option<String>,

    /// Optional source URL
    pub source_url: Option<String>,

    /// Type-specific metadata (venue, publisher, published_date, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,

    doc_type: Option<DocType>,
}

impl Document {
    /// Create an unclassified document
    pub fn new(id: DocumentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            title: None,
            source_url: None,
            metadata: BTreeMap::new(),
            doc_type: None,
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

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Create a document whose type is already known
    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    /// The assigned type, if classification has happened
    pub fn doc_type(&self) -> Option<DocType> {
        self.doc_type
    }

    /// The assigned type, or `Unknown` when none was assigned
    pub fn effective_type(&self) -> DocType {
        self.doc_type.unwrap_or(DocType::Unknown)
    }

    /// Assign the document type
    ///
    /// Returns `false` and leaves the document untouched if a type was
    /// already assigned.
    pub fn assign_type(&mut self, doc_type: DocType) -> bool {
        if self.doc_type.is_some() {
            return false;
        }
        self.doc_type = Some(doc_type);
        true
    }

    /// Metadata value as a string, if present
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Metadata value as a float, accepting numeric strings
    pub fn meta_f64(&self, key: &str) -> Option<f64> {
        match self.metadata.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Title if present, otherwise the first `max_chars` characters of the text
    pub fn display_title(&self, max_chars: usize) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => self.text.chars().take(max_chars).collect(),
        }
    }
}
