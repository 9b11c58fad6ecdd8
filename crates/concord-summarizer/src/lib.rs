//! Concord Summarizer
//!
//! Implementations of the [`concord_domain::Summarizer`] capability:
//!
//! - [`LlmSummarizer`] (`rag` backend): retrieves supporting passages from
//!   the source texts and asks a language model for a sectioned summary at
//!   the requested depth
//! - [`ExtractiveSummarizer`] (`bart` backend): offline, deterministic
//!   sections built from the resolved claims and conflicts
//!
//! [`summarizer_for`] picks the backend for a job; `rag` without a model
//! falls back to the extractive backend.

#![warn(missing_docs)]

mod config;
pub mod depth;
mod extractive;
mod llm;
mod prompt;
pub mod retrieval;
mod sections;

pub use config::SummarizerConfig;
pub use extractive::ExtractiveSummarizer;
pub use llm::LlmSummarizer;
pub use prompt::SummaryPromptBuilder;
pub use sections::{parse_sections, render_sections};

use concord_domain::{LanguageModel, Summarizer, SummarizerBackend};
use std::sync::Arc;
use tracing::warn;

/// Summarizer for a backend choice
pub fn summarizer_for(
    backend: SummarizerBackend,
    model: Option<Arc<dyn LanguageModel>>,
    config: &SummarizerConfig,
) -> Arc<dyn Summarizer> {
    match (backend, model) {
        (SummarizerBackend::Rag, Some(model)) => {
            Arc::new(LlmSummarizer::new(model).with_config(config.clone()))
        }
        (SummarizerBackend::Rag, None) => {
            warn!("No language model configured, using the extractive summarizer");
            Arc::new(ExtractiveSummarizer)
        }
        (SummarizerBackend::Bart, _) => Arc::new(ExtractiveSummarizer),
    }
}
