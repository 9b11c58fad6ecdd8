//! Claim extraction capabilities
//!
//! Two implementations of [`concord_domain::ClaimExtractor`]:
//! - [`LlmClaimExtractor`]: type-specific prompts, paragraph chunking and
//!   tolerant JSON parsing
//! - [`SentenceExtractor`]: offline, deterministic sentence splitting

mod chunking;
mod llm;
mod parser;
mod prompt;
mod sentence;

pub use chunking::TextChunker;
pub use llm::{LlmClaimExtractor, DEFAULT_MAX_CHUNK_CHARS};
pub use parser::parse_claims;
pub use prompt::PromptBuilder;
pub use sentence::{split_sentences, SentenceExtractor, MIN_CLAIM_CHARS};
