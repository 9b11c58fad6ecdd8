//! Concord Domain Layer
//!
//! This crate contains the data model shared by every stage of the Concord
//! pipeline, together with the trait interfaces for the external capabilities
//! (language model, claim extraction, embeddings, summarization, persistence).
//!
//! ## Key Concepts
//!
//! - **Document**: one input text, typed exactly once by the classifier
//! - **Credibility score**: a per-document [0, 1] trust estimate with a named breakdown
//! - **Claim**: an atomic assertion extracted from one document
//! - **Conflict**: a cluster of disagreeing claims with a resolution outcome
//! - **Job**: one run of the pipeline, `pending → running → done | failed`
//!
//! ## Architecture
//!
//! - No I/O in this crate
//! - Value types are immutable once built; state changes go through `Job`
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod conflict;
pub mod credibility;
pub mod document;
pub mod error;
pub mod fault;
pub mod ids;
pub mod job;
pub mod report;
pub mod submission;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, RawClaim};
pub use conflict::{ClaimCluster, Conflict, ConflictStatus, ConflictStrategy};
pub use credibility::{CredibilityScore, Signal};
pub use document::{DocType, Document};
pub use error::{CapabilityError, TransitionError};
pub use fault::{FaultKind, PipelineFault};
pub use ids::{ClaimId, DocumentId, JobId, ReportId};
pub use job::{Job, JobOptions, JobStatus};
pub use report::{DocumentSummary, ReportParts, SummaryReport, SummarySection};
pub use submission::{
    DocumentInput, JobSubmission, StrategyChoice, SummarizerBackend, SummaryDepth,
};
pub use traits::{
    ClaimExtractor, Classification, DocumentClassifier, EmbeddingModel, LanguageModel,
    ReportStore, Summarizer, SummaryInput, SummaryOutput,
};
