//! Offline extractive ("bart") summarizer
//!
//! Deterministic and model-free: sections are assembled from the resolved
//! claims and conflicts directly.

use crate::depth::DepthProfile;
use crate::sections::render_sections;
use async_trait::async_trait;
use concord_domain::{
    CapabilityError, Claim, ConflictStatus, DocType, Summarizer, SummaryInput, SummaryOutput,
    SummarySection,
};

/// Words marking a claim as describing methodology
const METHOD_WORDS: [&str; 7] = [
    "method",
    "approach",
    "experiment",
    "study",
    "analysis",
    "sample",
    "trial",
];

/// Maximum characters of the methodology section
const MAX_METHOD_CHARS: usize = 1_000;

/// Summarizer that works without a language model
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    /// Build the summary synchronously
    pub fn build(&self, input: &SummaryInput) -> SummaryOutput {
        let profile = DepthProfile::for_depth(input.depth);
        let mut ranked: Vec<&Claim> = input.resolved_claims.iter().collect();
        ranked.sort_by(|a, b| a.rank_cmp(b));

        let mut sections = vec![
            SummarySection::new("Key Findings", key_findings(&ranked, profile.max_claims)),
            SummarySection::new("Conflicts Detected", conflicts_text(input)),
        ];
        if input.has_type(DocType::ResearchPaper) {
            sections.push(SummarySection::new("Methodology", methodology(&ranked)));
        }
        sections.push(SummarySection::new("Conclusion", conclusion(&ranked, input)));

        SummaryOutput {
            full_summary: render_sections(&sections),
            sections,
        }
    }
}

fn key_findings(ranked: &[&Claim], limit: usize) -> String {
    if ranked.is_empty() {
        return "No claims were extracted from the documents.".to_string();
    }
    ranked
        .iter()
        .take(limit)
        .map(|c| format!("- {}", c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn conflicts_text(input: &SummaryInput) -> String {
    if input.conflicts.is_empty() {
        return "No significant conflicts found.".to_string();
    }
    input
        .conflicts
        .iter()
        .map(|c| match (c.status, c.resolution.as_deref()) {
            (ConflictStatus::Resolved, Some(winner)) => {
                format!("• {}: resolved in favour of \"{}\"", c.topic, winner)
            }
            _ => format!("• {}: UNRESOLVED, sources disagree", c.topic),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn methodology(ranked: &[&Claim]) -> String {
    let text = ranked
        .iter()
        .filter(|c| {
            let lower = c.text.to_lowercase();
            METHOD_WORDS.iter().any(|w| lower.contains(w))
        })
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return "See the original papers for methodology.".to_string();
    }
    text.chars().take(MAX_METHOD_CHARS).collect()
}

fn conclusion(ranked: &[&Claim], input: &SummaryInput) -> String {
    let unresolved = input
        .conflicts
        .iter()
        .filter(|c| !c.is_resolved())
        .count();
    let lead = match ranked.first() {
        Some(top) => format!("The best-supported claim is: {}", top.text),
        None => "The documents did not yield any claims.".to_string(),
    };
    match unresolved {
        0 => lead,
        1 => format!("{lead} One conflict needs human review."),
        n => format!("{lead} {n} conflicts need human review."),
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, CapabilityError> {
        Ok(self.build(input))
    }
}
