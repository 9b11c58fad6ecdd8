//! Backend selection and end-to-end summaries

use concord_domain::{
    Claim, CredibilityScore, DocType, DocumentId, DocumentSummary, LanguageModel, Summarizer,
    SummarizerBackend, SummaryDepth, SummaryInput,
};
use concord_llm::MockProvider;
use concord_summarizer::{summarizer_for, SummarizerConfig};
use std::sync::Arc;

fn input(depth: SummaryDepth) -> SummaryInput {
    let doc_id = DocumentId::new();
    SummaryInput {
        documents: vec![DocumentSummary {
            doc_id,
            doc_type: DocType::ResearchPaper,
            title: Some("Sleep and memory".into()),
            source_url: None,
            credibility_score: CredibilityScore::flat("unclassified", 0.5, ""),
        }],
        resolved_claims: vec![Claim::new(
            "The study found sleep improves recall",
            doc_id,
            0.8,
        )],
        conflicts: vec![],
        depth,
        passages: vec!["Participants who slept recalled more words.".into()],
    }
}

#[tokio::test]
async fn test_rag_uses_model() {
    let mock = MockProvider::new("## Executive Summary\nSleep helps.");
    let model: Arc<dyn LanguageModel> = Arc::new(mock.clone());
    let summarizer = summarizer_for(
        SummarizerBackend::Rag,
        Some(model),
        &SummarizerConfig::default(),
    );

    let output = summarizer
        .summarize(&input(SummaryDepth::DeepResearch))
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(output.sections[0].title, "Executive Summary");
    assert!(mock.prompts()[0].contains("Methodology & Experimental Design"));
}

#[tokio::test]
async fn test_rag_without_model_is_extractive() {
    let summarizer = summarizer_for(SummarizerBackend::Rag, None, &SummarizerConfig::default());
    let output = summarizer.summarize(&input(SummaryDepth::Standard)).await.unwrap();
    assert_eq!(output.sections[0].title, "Key Findings");
    assert!(output.sections.iter().any(|s| s.title == "Methodology"));
}

#[tokio::test]
async fn test_bart_ignores_model() {
    let mock = MockProvider::new("unused");
    let model: Arc<dyn LanguageModel> = Arc::new(mock.clone());
    let summarizer = summarizer_for(
        SummarizerBackend::Bart,
        Some(model),
        &SummarizerConfig::default(),
    );
    summarizer.summarize(&input(SummaryDepth::Brief)).await.unwrap();
    assert_eq!(mock.call_count(), 0);
}
