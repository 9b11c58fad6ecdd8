//! Fault records
//!
//! Faults are values, not errors: the pipeline absorbs most of them and keeps
//! going, recording what degraded and where.

use crate::ids::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a pipeline fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Classifier capability failed; document degraded to `unknown`
    Classification,
    /// Claim extraction failed; document contributes zero claims
    Extraction,
    /// Scoring agent failed; document got the default score
    Scoring,
    /// Embedding failed; claim became a singleton cluster
    Embedding,
    /// Summarization failed
    Generation,
    /// Input rejected before a job was created
    Validation,
}

impl FaultKind {
    /// Get the fault kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Classification => "classification",
            FaultKind::Extraction => "extraction",
            FaultKind::Scoring => "scoring",
            FaultKind::Embedding => "embedding",
            FaultKind::Generation => "generation",
            FaultKind::Validation => "validation",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded fault, optionally tied to one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFault {
    /// Fault category
    pub kind: FaultKind,

    /// Document the fault applies to, if any
    pub doc_id: Option<DocumentId>,

    /// Short, user-visible description
    pub message: String,
}

impl PipelineFault {
    /// Fault attached to one document
    pub fn for_document(kind: FaultKind, doc_id: DocumentId, message: impl Into<String>) -> Self {
        Self {
            kind,
            doc_id: Some(doc_id),
            message: message.into(),
        }
    }

    /// Fault affecting the whole job
    pub fn for_job(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            doc_id: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for PipelineFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.doc_id {
            Some(id) => write!(f, "{} fault on document {}: {}", self.kind, id, self.message),
            None => write!(f, "{} fault: {}", self.kind, self.message),
        }
    }
}
