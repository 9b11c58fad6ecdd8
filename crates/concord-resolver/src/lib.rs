//! Concord Conflict Resolver
//!
//! Clusters the claims of a job by embedding similarity and settles each
//! genuine disagreement with one of four strategies.
//!
//! # Pipeline
//!
//! ```text
//! claims + embeddings ──► single-link clustering (τ) ──► text grouping
//!                                                          │
//!            Resolution { resolved_claims, conflicts } ◄── strategy
//! ```
//!
//! # Strategies
//!
//! - `weighted_vote`: highest confidence wins; a runner-up within ε ties
//! - `majority_vote`: most distinct high-trust sources wins, at least two
//! - `highest_credibility_wins`: (confidence desc, id asc) always wins
//! - `conservative`: every disagreement is unresolved
//!
//! # Example
//!
//! ```
//! use concord_domain::{Claim, ClaimId, ConflictStrategy, DocumentId};
//! use concord_resolver::ConflictResolver;
//! use std::collections::HashMap;
//!
//! let a = Claim::new("X causes Y", DocumentId::new(), 0.9);
//! let b = Claim::new("X does not cause Y", DocumentId::new(), 0.4);
//! let embeddings: HashMap<ClaimId, Vec<f32>> =
//!     [(a.id, vec![1.0, 0.1]), (b.id, vec![1.0, 0.0])].into_iter().collect();
//!
//! let resolution = ConflictResolver::default()
//!     .resolve(vec![a, b], &embeddings, ConflictStrategy::WeightedVote)
//!     .unwrap();
//! assert_eq!(resolution.conflicts[0].resolution.as_deref(), Some("X causes Y"));
//! ```

#![warn(missing_docs)]

mod cluster;
mod config;
mod error;
mod resolver;
pub mod strategy;
pub mod text;

pub use cluster::cluster_claims;
pub use config::{
    ResolverConfig, DEFAULT_HIGH_TRUST_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TIE_EPSILON,
};
pub use error::ResolverError;
pub use resolver::{ConflictResolver, Resolution};
pub use strategy::{default_strategy, select_strategy, strategy_fn, StrategyFn};
