//! Summary prompts

use crate::depth::{section_plan, DepthProfile};
use concord_domain::{Conflict, SummaryInput};
use std::fmt::Write;

const RULES: &str = "Rules:
- Be objective and evidence-based.
- Do not fabricate facts.
- Use clear, professional language.
- Output plain text with section headers preceded by ##.";

/// Claims of a conflict shown for an unresolved side-by-side
const SIDES_SHOWN: usize = 3;

/// Builds the summarization prompt for a job
pub struct SummaryPromptBuilder<'a> {
    input: &'a SummaryInput,
    passages: Vec<&'a str>,
    max_chars: usize,
}

impl<'a> SummaryPromptBuilder<'a> {
    /// Create a builder over the summary input
    pub fn new(input: &'a SummaryInput) -> Self {
        Self {
            input,
            passages: Vec::new(),
            max_chars: usize::MAX,
        }
    }

    /// Retrieved context passages
    pub fn with_passages(mut self, passages: Vec<&'a str>) -> Self {
        self.passages = passages;
        self
    }

    /// Cut the prompt to at most `max_chars` characters
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let depth = self.input.depth;
        let profile = DepthProfile::for_depth(depth);
        let single = self.input.single_document();
        let doc_types: Vec<_> = self.input.documents.iter().map(|d| d.doc_type).collect();

        let mut prompt = String::new();
        let _ = writeln!(
            prompt,
            "You are an expert {}summarizer. Write a {} summary of {} to {} words with these sections:",
            if single { "" } else { "multi-document " },
            depth,
            profile.word_range.0,
            profile.word_range.1
        );
        for (idx, title) in section_plan(depth, &doc_types, single).iter().enumerate() {
            let _ = writeln!(prompt, "{}. {}", idx + 1, title);
        }
        prompt.push_str(RULES);
        prompt.push_str("\n\nRESOLVED CLAIMS:\n");
        for claim in self.input.resolved_claims.iter().take(profile.max_claims) {
            let _ = writeln!(prompt, "• {}", claim.text);
        }

        if !single && profile.max_conflicts > 0 {
            prompt.push_str("\nCONFLICTS:\n");
            if self.input.conflicts.is_empty() {
                prompt.push_str("None detected.\n");
            }
            for conflict in self.input.conflicts.iter().take(profile.max_conflicts) {
                write_conflict(&mut prompt, conflict);
            }
        }

        if !self.passages.is_empty() {
            prompt.push_str("\nRETRIEVED CONTEXT PASSAGES:\n");
            prompt.push_str(&self.passages.join("\n---\n"));
            prompt.push('\n');
        }

        truncate_chars(prompt, self.max_chars)
    }
}

fn write_conflict(out: &mut String, conflict: &Conflict) {
    match conflict.resolution.as_deref() {
        Some(winner) => {
            let _ = writeln!(out, "[RESOLVED] {}\n  → Winner: {}", conflict.topic, winner);
        }
        None => {
            let _ = writeln!(out, "[UNRESOLVED] {}\n  Conflicting claims:", conflict.topic);
            for claim in conflict.claims.iter().take(SIDES_SHOWN) {
                let _ = writeln!(out, "    - {}", claim.text);
            }
        }
    }
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::{
        Claim, ClaimCluster, CredibilityScore, DocType, DocumentId, DocumentSummary, SummaryDepth,
    };

    fn doc(doc_type: DocType) -> DocumentSummary {
        DocumentSummary {
            doc_id: DocumentId::new(),
            doc_type,
            title: None,
            source_url: None,
            credibility_score: CredibilityScore::flat("unclassified", 0.5, ""),
        }
    }

    fn input(documents: Vec<DocumentSummary>, depth: SummaryDepth) -> SummaryInput {
        let a = Claim::new("X causes Y", documents[0].doc_id, 0.9);
        let b = Claim::new("X does not cause Y", documents[0].doc_id, 0.4);
        let cluster = ClaimCluster::new(vec![a.clone(), b]);
        SummaryInput {
            documents,
            resolved_claims: vec![a],
            conflicts: vec![Conflict::unresolved(&cluster)],
            depth,
            passages: vec![],
        }
    }

    #[test]
    fn test_multi_document_prompt_lists_conflicts() {
        let input = input(
            vec![doc(DocType::ResearchPaper), doc(DocType::BlogPost)],
            SummaryDepth::Standard,
        );
        let prompt = SummaryPromptBuilder::new(&input).build();

        assert!(prompt.contains("multi-document summarizer"));
        assert!(prompt.contains("• X causes Y"));
        assert!(prompt.contains("[UNRESOLVED] X causes Y"));
        assert!(prompt.contains("    - X does not cause Y"));
        assert!(prompt.contains("4. Methodology"));
    }

    #[test]
    fn test_brief_prompt_has_no_conflicts() {
        let input = input(
            vec![doc(DocType::NewsArticle), doc(DocType::NewsArticle)],
            SummaryDepth::Brief,
        );
        let prompt = SummaryPromptBuilder::new(&input).build();
        assert!(!prompt.contains("CONFLICTS"));
        assert!(prompt.contains("1. Key Findings\n2. Conclusion"));
    }

    #[test]
    fn test_passages_and_truncation() {
        let input = input(vec![doc(DocType::NewsArticle)], SummaryDepth::Standard);
        let prompt = SummaryPromptBuilder::new(&input)
            .with_passages(vec!["first passage", "second passage"])
            .build();
        assert!(prompt.contains("first passage\n---\nsecond passage"));

        let short = SummaryPromptBuilder::new(&input).with_max_chars(20).build();
        assert_eq!(short.chars().count(), 20);
    }
}
