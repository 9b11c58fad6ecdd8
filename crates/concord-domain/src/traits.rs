//! Trait definitions for external capabilities
//!
//! These traits mark the boundary between the pipeline and the services it
//! calls. Every capability is async and shareable across tasks; the
//! implementations live in other crates.

use crate::claim::{Claim, RawClaim};
use crate::conflict::Conflict;
use crate::document::{DocType, Document};
use crate::error::CapabilityError;
use crate::job::Job;
use crate::report::{DocumentSummary, SummaryReport, SummarySection};
use crate::submission::SummaryDepth;
use async_trait::async_trait;

/// Text generation
///
/// Implemented by the infrastructure layer (concord-llm)
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}

/// Claim extraction from one document
///
/// Implemented by the application layer (concord-agents)
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    /// Extract raw claims; the type selects prompt and claim budget
    async fn extract_claims(
        &self,
        document: &Document,
        doc_type: DocType,
    ) -> Result<Vec<RawClaim>, CapabilityError>;
}

/// Text embedding into a fixed-dimension vector
///
/// Implemented by the infrastructure layer (concord-llm)
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed one text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError>;

    /// Dimension of every vector this model returns
    fn dimension(&self) -> usize;
}

/// Result of classifying one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Assigned type
    pub doc_type: DocType,
    /// Description of a capability failure absorbed on the way, if any
    pub fault: Option<String>,
}

/// Document type assignment
///
/// Total: failures inside the implementation degrade to `Unknown`.
#[async_trait]
pub trait DocumentClassifier: Send + Sync {
    /// Classify a document
    async fn classify(&self, document: &Document) -> DocType;

    /// Classify a document and report any absorbed failure
    async fn classify_reporting(&self, document: &Document) -> Classification {
        Classification {
            doc_type: self.classify(document).await,
            fault: None,
        }
    }
}

/// Input handed to a summarizer
#[derive(Debug, Clone)]
pub struct SummaryInput {
    /// Scored documents of the job
    pub documents: Vec<DocumentSummary>,
    /// One representative claim per cluster
    pub resolved_claims: Vec<Claim>,
    /// Conflicts found by the resolver
    pub conflicts: Vec<Conflict>,
    /// Requested depth
    pub depth: SummaryDepth,
    /// Source document texts, for retrieval of supporting passages
    pub passages: Vec<String>,
}

impl SummaryInput {
    /// Whether the job had a single document
    pub fn single_document(&self) -> bool {
        self.documents.len() == 1
    }

    /// Whether any document is of the given type
    pub fn has_type(&self, doc_type: DocType) -> bool {
        self.documents.iter().any(|d| d.doc_type == doc_type)
    }
}

/// Output of a summarizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutput {
    /// Titled sections
    pub sections: Vec<SummarySection>,
    /// Full summary text
    pub full_summary: String,
}

/// Summary generation from resolved claims and conflicts
///
/// Implemented by concord-summarizer
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce the summary
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, CapabilityError>;
}

/// Persistence hand-off for jobs and reports
///
/// Called only at state transitions.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Record the current state of a job
    async fn save_job(&self, job: &Job) -> Result<(), CapabilityError>;

    /// Record a finished report
    async fn save_report(&self, report: &SummaryReport) -> Result<(), CapabilityError>;
}
