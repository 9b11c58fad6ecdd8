//! Extraction prompts per document type

use crate::agent::ClaimBudget;
use concord_domain::DocType;

/// Builds the extraction prompt for one chunk of a document
pub struct PromptBuilder<'a> {
    doc_type: DocType,
    title: Option<&'a str>,
    chunk: &'a str,
    part: Option<(usize, usize)>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a chunk
    pub fn new(doc_type: DocType, chunk: &'a str) -> Self {
        Self {
            doc_type,
            title: None,
            chunk,
            part: None,
        }
    }

    /// Add the document title as context
    pub fn with_title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// Mark the chunk as part `index` (1-based) of `total`
    pub fn with_part(mut self, index: usize, total: usize) -> Self {
        if total > 1 {
            self.part = Some((index, total));
        }
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let budget = ClaimBudget::for_type(self.doc_type);
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "{} Extract {} to {} {}.\n",
            role(self.doc_type),
            budget.min,
            budget.max,
            focus(self.doc_type)
        ));
        prompt.push_str(RULES);
        prompt.push_str("\n\n");

        if let Some(title) = self.title.filter(|t| !t.trim().is_empty()) {
            prompt.push_str(&format!("Title: {}\n", title.trim()));
        }
        if let Some((index, total)) = self.part {
            prompt.push_str(&format!("This is part {} of {} of the document.\n", index, total));
        }

        prompt.push_str("Text to analyze:\n---\n");
        prompt.push_str(self.chunk);
        prompt.push_str("\n---\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }
}

fn role(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::ResearchPaper => "You are a scientific research assistant.",
        DocType::NewsArticle => "You are a careful news analyst.",
        DocType::BlogPost => "You are a critical reader of blog content.",
        DocType::LegalDocument => "You are a legal analyst.",
        DocType::Unknown => "You are a careful reader.",
    }
}

fn focus(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::ResearchPaper => {
            "key factual claims covering the problem, methodology, results and conclusions"
        }
        DocType::NewsArticle => "key factual claims reported in this news article",
        DocType::BlogPost => "key factual claims made in this blog post",
        DocType::LegalDocument => "key legal provisions or findings",
        DocType::Unknown => "key factual claims",
    }
}

const RULES: &str = "Rules:
- Each claim must be a single, self-contained, assertive sentence
- Keep the source's hedging words (may, suggests, reportedly) when present
- Do not merge separate facts into one claim
- Do not add facts that are not in the text";

const OUTPUT_FORMAT: &str = r#"Output format (JSON only, no additional text):
{"claims": ["claim 1", "claim 2"]}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_budget_and_text() {
        let prompt = PromptBuilder::new(DocType::ResearchPaper, "We measured X.").build();
        assert!(prompt.contains("Extract 8 to 12"));
        assert!(prompt.contains("We measured X."));
        assert!(prompt.contains(r#"{"claims""#));
    }

    #[test]
    fn test_legal_focus() {
        let prompt = PromptBuilder::new(DocType::LegalDocument, "Section 1.").build();
        assert!(prompt.contains("legal provisions"));
        assert!(prompt.contains("Extract 5 to 8"));
    }

    #[test]
    fn test_title_and_part() {
        let prompt = PromptBuilder::new(DocType::NewsArticle, "chunk")
            .with_title(Some("Flood warning"))
            .with_part(2, 3)
            .build();
        assert!(prompt.contains("Title: Flood warning"));
        assert!(prompt.contains("part 2 of 3"));

        let single = PromptBuilder::new(DocType::NewsArticle, "chunk")
            .with_part(1, 1)
            .build();
        assert!(!single.contains("part 1 of 1"));
    }
}
