//! Summary report produced by a completed job

use crate::claim::Claim;
use crate::conflict::Conflict;
use crate::credibility::CredibilityScore;
use crate::document::{DocType, Document};
use crate::ids::{DocumentId, JobId, ReportId};
use crate::submission::SummaryDepth;
use crate::time::now_millis;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Per-document entry of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub doc_id: DocumentId,
    /// Assigned type
    pub doc_type: DocType,
    /// Title, if any
    pub title: Option<String>,
    /// Source URL, if any
    pub source_url: Option<String>,
    /// The document's credibility score
    pub credibility_score: CredibilityScore,
}

/// One titled section of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    /// Section heading
    pub title: String,
    /// Section body
    pub content: String,
}

impl SummarySection {
    /// Create a section
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Final, immutable output of a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Report identifier
    pub report_id: ReportId,
    /// Job that produced the report
    pub job_id: JobId,
    /// One entry per document, in job order
    pub documents: Vec<DocumentSummary>,
    /// One representative claim per cluster
    pub resolved_claims: Vec<Claim>,
    /// Genuinely disagreeing clusters
    pub conflicts: Vec<Conflict>,
    /// Summary sections
    pub sections: Vec<SummarySection>,
    /// Full summary text
    pub full_summary: String,
    /// Distinct document types of the job, sorted
    pub doc_types_present: Vec<DocType>,
    /// Depth the summary was generated at
    pub summary_depth: SummaryDepth,
    /// Creation time, milliseconds since the epoch
    pub created_at: u64,
}

/// Everything the report is assembled from
#[derive(Debug, Clone)]
pub struct ReportParts {
    /// Per-document scores
    pub scores: HashMap<DocumentId, CredibilityScore>,
    /// Representative claims
    pub resolved_claims: Vec<Claim>,
    /// Conflicts
    pub conflicts: Vec<Conflict>,
    /// Summary sections
    pub sections: Vec<SummarySection>,
    /// Full summary text
    pub full_summary: String,
    /// Summary depth
    pub summary_depth: SummaryDepth,
}

impl SummaryReport {
    /// Assemble a report from a job's documents and accumulated results
    ///
    /// Documents without a score are skipped; a completed job scores every
    /// document.
    pub fn assemble(job_id: JobId, documents: &[Document], parts: ReportParts) -> Self {
        let summaries: Vec<DocumentSummary> = documents
            .iter()
            .filter_map(|doc| {
                parts.scores.get(&doc.id).map(|score| DocumentSummary {
                    doc_id: doc.id,
                    doc_type: doc.effective_type(),
                    title: doc.title.clone(),
                    source_url: doc.source_url.clone(),
                    credibility_score: score.clone(),
                })
            })
            .collect();

        let doc_types_present = summaries
            .iter()
            .map(|d| d.doc_type)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            report_id: ReportId::new(),
            job_id,
            documents: summaries,
            resolved_claims: parts.resolved_claims,
            conflicts: parts.conflicts,
            sections: parts.sections,
            full_summary: parts.full_summary,
            doc_types_present,
            summary_depth: parts.summary_depth,
            created_at: now_millis(),
        }
    }

    /// Number of conflicts flagged for human review
    pub fn unresolved_count(&self) -> usize {
        self.conflicts.iter().filter(|c| !c.is_resolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_dedups_doc_types() {
        let docs = vec![
            Document::new(DocumentId::from_value(1), "a").with_doc_type(DocType::NewsArticle),
            Document::new(DocumentId::from_value(2), "b").with_doc_type(DocType::ResearchPaper),
            Document::new(DocumentId::from_value(3), "c").with_doc_type(DocType::NewsArticle),
        ];
        let scores = docs
            .iter()
            .map(|d| (d.id, CredibilityScore::flat("unclassified", 0.5, "")))
            .collect();

        let report = SummaryReport::assemble(
            JobId::new(),
            &docs,
            ReportParts {
                scores,
                resolved_claims: vec![],
                conflicts: vec![],
                sections: vec![SummarySection::new("Conclusion", "none")],
                full_summary: "none".into(),
                summary_depth: SummaryDepth::Brief,
            },
        );

        assert_eq!(report.documents.len(), 3);
        assert_eq!(
            report.doc_types_present,
            vec![DocType::ResearchPaper, DocType::NewsArticle]
        );
        assert_eq!(report.unresolved_count(), 0);
    }

    #[test]
    fn test_report_serializes_required_fields() {
        let report = SummaryReport::assemble(
            JobId::new(),
            &[],
            ReportParts {
                scores: HashMap::new(),
                resolved_claims: vec![],
                conflicts: vec![],
                sections: vec![],
                full_summary: String::new(),
                summary_depth: SummaryDepth::Standard,
            },
        );
        let value = serde_json::to_value(&report).unwrap();
        for key in [
            "report_id",
            "job_id",
            "documents",
            "resolved_claims",
            "conflicts",
            "sections",
            "full_summary",
            "doc_types_present",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
