//! Submission validation and job admission

use crate::{GatekeeperError, ValidationConfig};
use concord_domain::{Document, DocumentId, DocumentInput, Job, JobOptions, JobSubmission};
use std::fmt;
use tracing::{info, warn};
use url::Url;

/// Result of submission validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the submission passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (empty when accepted)
    pub reasons: Vec<RejectionReason>,

    /// Non-fatal findings; the submission is admitted with them applied
    pub warnings: Vec<ValidationWarning>,

    /// Indices of the documents that will enter the job
    pub admitted: Vec<usize>,
}

impl ValidationResult {
    /// Whether the submission was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Submission accepted
    Accepted,

    /// Submission rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// The submission holds no documents
    NoDocuments,

    /// More documents than allowed
    TooManyDocuments {
        /// Documents submitted
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// No document reaches the minimum length
    AllDocumentsTooShort {
        /// Minimum length in characters
        min_chars: usize,
    },

    /// One document is below the minimum length (strict mode)
    DocumentTooShort {
        /// Position in the submission
        index: usize,
        /// Its length in characters
        chars: usize,
        /// Minimum length in characters
        min_chars: usize,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NoDocuments => write!(f, "no documents submitted"),
            RejectionReason::TooManyDocuments { count, max } => {
                write!(f, "{} documents submitted, at most {} allowed", count, max)
            }
            RejectionReason::AllDocumentsTooShort { min_chars } => {
                write!(f, "no document has at least {} characters", min_chars)
            }
            RejectionReason::DocumentTooShort {
                index,
                chars,
                min_chars,
            } => write!(
                f,
                "document {} has {} characters, at least {} required",
                index, chars, min_chars
            ),
        }
    }
}

/// Non-fatal validation findings
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// A short document was left out of the job
    DroppedShortDocument {
        /// Position in the submission
        index: usize,
        /// Its length in characters
        chars: usize,
    },

    /// A source URL could not be parsed and was discarded
    InvalidSourceUrl {
        /// Position in the submission
        index: usize,
        /// The rejected value
        url: String,
    },

    /// A document was cut to the maximum length
    Truncated {
        /// Position in the submission
        index: usize,
        /// Original length in characters
        chars: usize,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::DroppedShortDocument { index, chars } => {
                write!(f, "document {} dropped: only {} characters", index, chars)
            }
            ValidationWarning::InvalidSourceUrl { index, url } => {
                write!(f, "document {} source URL discarded: {}", index, url)
            }
            ValidationWarning::Truncated { index, chars } => {
                write!(f, "document {} truncated from {} characters", index, chars)
            }
        }
    }
}

/// The Gatekeeper validates submissions before a job exists
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        Ok(Self { config })
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a submission against the configured rules
    pub fn validate(&self, submission: &JobSubmission) -> ValidationResult {
        let docs = &submission.documents;
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();
        let mut admitted = Vec::new();

        // 1. Batch size
        if docs.is_empty() {
            reasons.push(RejectionReason::NoDocuments);
        }
        if docs.len() > self.config.max_documents {
            reasons.push(RejectionReason::TooManyDocuments {
                count: docs.len(),
                max: self.config.max_documents,
            });
        }

        // 2. Document length
        let mut short = Vec::new();
        for (index, doc) in docs.iter().enumerate() {
            let chars = doc.text.trim().chars().count();
            if chars < self.config.min_document_chars {
                short.push((index, chars));
            } else {
                admitted.push(index);
            }
        }
        if !docs.is_empty() && admitted.is_empty() {
            reasons.push(RejectionReason::AllDocumentsTooShort {
                min_chars: self.config.min_document_chars,
            });
        } else if self.config.drop_short_documents {
            warnings.extend(
                short
                    .iter()
                    .map(|&(index, chars)| ValidationWarning::DroppedShortDocument { index, chars }),
            );
        } else {
            reasons.extend(short.iter().map(|&(index, chars)| RejectionReason::DocumentTooShort {
                index,
                chars,
                min_chars: self.config.min_document_chars,
            }));
        }

        // 3. Per-document fixes on what gets in
        for &index in &admitted {
            let doc = &docs[index];
            if let Some(url) = doc.source_url.as_deref() {
                if !is_valid_url(url) {
                    warnings.push(ValidationWarning::InvalidSourceUrl {
                        index,
                        url: url.to_string(),
                    });
                }
            }
            let chars = doc.text.trim().chars().count();
            if chars > self.config.max_document_chars {
                warnings.push(ValidationWarning::Truncated { index, chars });
            }
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            admitted.clear();
            ValidationStatus::Rejected
        };

        ValidationResult {
            status,
            reasons,
            warnings,
            admitted,
        }
    }

    /// Validate a submission and create its pending job
    pub fn admit(&self, submission: JobSubmission) -> Result<Job, GatekeeperError> {
        let result = self.validate(&submission);
        if !result.is_accepted() {
            warn!(reasons = result.reasons.len(), "Submission rejected");
            return Err(GatekeeperError::Rejected(result.reasons));
        }
        for warning in &result.warnings {
            warn!(%warning, "Submission adjusted");
        }

        let options = JobOptions {
            summarizer_backend: submission.summarizer_backend,
            conflict_strategy: submission.conflict_strategy,
            summary_depth: submission.summary_depth,
        };
        let mut inputs: Vec<Option<DocumentInput>> =
            submission.documents.into_iter().map(Some).collect();
        let documents: Vec<Document> = result
            .admitted
            .iter()
            .filter_map(|&index| inputs.get_mut(index).and_then(Option::take))
            .map(|input| self.build_document(input))
            .collect();

        let job = Job::new(documents, options);
        info!(
            job_id = %job.id(),
            documents = job.documents.len(),
            warnings = result.warnings.len(),
            "Job admitted"
        );
        Ok(job)
    }

    fn build_document(&self, input: DocumentInput) -> Document {
        let text = truncate_chars(input.text.trim(), self.config.max_document_chars);
        let mut doc = Document::new(DocumentId::new(), text);
        doc.title = input.title.filter(|t| !t.trim().is_empty());
        doc.source_url = input.source_url.filter(|u| is_valid_url(u));
        doc.metadata = input.metadata;
        match input.doc_type {
            Some(doc_type) => doc.with_doc_type(doc_type),
            None => doc,
        }
    }
}

/// Whether a source URL is an absolute http(s) URL with a host
fn is_valid_url(url: &str) -> bool {
    Url::parse(url.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
