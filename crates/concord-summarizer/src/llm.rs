//! Language-model ("rag") summarizer

use crate::config::SummarizerConfig;
use crate::prompt::SummaryPromptBuilder;
use crate::retrieval::{passages, retrieve};
use crate::sections::parse_sections;
use async_trait::async_trait;
use concord_domain::{
    CapabilityError, LanguageModel, Summarizer, SummaryInput, SummaryOutput,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Claims used to build the retrieval query
const QUERY_CLAIMS: usize = 10;

/// Summarizer that retrieves supporting passages and asks a language model
#[derive(Clone)]
pub struct LlmSummarizer {
    model: Arc<dyn LanguageModel>,
    config: SummarizerConfig,
}

impl LlmSummarizer {
    /// Create a summarizer over a language model
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            config: SummarizerConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: SummarizerConfig) -> Self {
        self.config = config;
        self
    }

    fn prompt(&self, input: &SummaryInput) -> String {
        let pool = passages(
            &input.passages,
            self.config.passage_words,
            self.config.passage_overlap,
        );
        let query = input
            .resolved_claims
            .iter()
            .take(QUERY_CLAIMS)
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let hits = retrieve(&pool, &query, self.config.top_k_passages);
        debug!(passages = pool.len(), retrieved = hits.len(), "Context retrieved");

        SummaryPromptBuilder::new(input)
            .with_passages(hits)
            .with_max_chars(self.config.max_prompt_chars)
            .build()
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, CapabilityError> {
        let prompt = self.prompt(input);
        let response = self.model.generate(&prompt).await?;
        let full_summary = response.trim().to_string();
        if full_summary.is_empty() {
            return Err(CapabilityError::Invalid("empty summary".to_string()));
        }

        let sections = parse_sections(&full_summary);
        info!(
            model = self.model.name(),
            depth = %input.depth,
            sections = sections.len(),
            "Summary generated"
        );
        Ok(SummaryOutput {
            sections,
            full_summary,
        })
    }
}
