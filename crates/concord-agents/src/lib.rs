//! Concord Scoring Agents
//!
//! Type-specific credibility scoring and claim extraction for one document.
//!
//! # Overview
//!
//! ```text
//! Document ──► AgentRegistry[doc_type] ──► ScoringAgent::score ──► CredibilityScore
//!     │                                        (Signal Library + TrustTables)
//!     └──────► ClaimExtractor (LLM or sentences) ──► HedgeDiscount ──► Claims
//! ```
//!
//! The [`AgentRunner`] wraps both halves for one document and absorbs their
//! faults: a failing agent is replaced by the [`DefaultAgent`] score, a
//! failing extraction yields zero claims.
//!
//! # Example Usage
//!
//! ```
//! use concord_agents::{NewsAgent, ScoringAgent, SignalContext};
//! use concord_domain::{Document, DocumentId};
//!
//! let doc = Document::new(DocumentId::new(), "By Jane Smith\nThe bridge reopened.")
//!     .with_source_url("https://www.reuters.com/world/bridge");
//! let score = NewsAgent.score(&doc, &SignalContext::default()).unwrap();
//! assert_eq!(score.signal("source_trust"), Some(0.94));
//! assert_eq!(score.signal("byline"), Some(0.9));
//! ```

#![warn(missing_docs)]

mod agent;
mod config;
mod error;
pub mod extraction;
mod hedging;
mod registry;
mod runner;
pub mod signals;
pub mod tables;

pub use agent::{
    weights_for, BlogAgent, ClaimBudget, DefaultAgent, LegalAgent, NewsAgent, ResearchAgent,
    ScoringAgent, DEFAULT_SCORE, UNCLASSIFIED_SIGNAL,
};
pub use config::AgentConfig;
pub use error::AgentError;
pub use extraction::{LlmClaimExtractor, SentenceExtractor};
pub use hedging::HedgeDiscount;
pub use registry::AgentRegistry;
pub use runner::{AgentRunner, ScoredDocument};
pub use signals::SignalContext;
pub use tables::TrustTables;
