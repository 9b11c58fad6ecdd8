//! Resolution strategies
//!
//! Each strategy is a pure function from a cluster to an optional
//! [`Conflict`]. `None` means the cluster is not a disagreement at all: it has
//! a single claim text, or every claim comes from one document. Strategies
//! only differ in how they settle genuine disagreements.

use crate::config::ResolverConfig;
use crate::text::{group_by_text, TextGroup};
use concord_domain::{Claim, ClaimCluster, Conflict, ConflictStrategy, DocType, DocumentId};
use std::collections::{BTreeMap, BTreeSet};

/// Slack for float comparisons of confidence gaps
const GAP_TOLERANCE: f64 = 1e-9;

/// Signature shared by all strategies
pub type StrategyFn = fn(&ClaimCluster, &ResolverConfig) -> Option<Conflict>;

/// Look up the function implementing a strategy
pub fn strategy_fn(strategy: ConflictStrategy) -> StrategyFn {
    match strategy {
        ConflictStrategy::WeightedVote => weighted_vote,
        ConflictStrategy::MajorityVote => majority_vote,
        ConflictStrategy::HighestCredibilityWins => highest_credibility_wins,
        ConflictStrategy::Conservative => conservative,
    }
}

/// Text groups of a cluster, if it holds a genuine disagreement
///
/// Single-source clusters are repetition, not disagreement.
pub fn disagreement<'a>(
    cluster: &'a ClaimCluster,
    config: &ResolverConfig,
) -> Option<Vec<TextGroup<'a>>> {
    if cluster.len() < 2 || cluster.is_single_source() {
        return None;
    }
    let groups = group_by_text(cluster.members(), config.near_identical_threshold);
    (groups.len() >= 2).then_some(groups)
}

/// Highest confidence wins unless the best competing text is within epsilon
pub fn weighted_vote(cluster: &ClaimCluster, config: &ResolverConfig) -> Option<Conflict> {
    let groups = disagreement(cluster, config)?;

    let mut leaders: Vec<&Claim> = groups.iter().filter_map(TextGroup::best).collect();
    leaders.sort_by(|a, b| a.rank_cmp(b));
    let (winner, runner_up) = match leaders.as_slice() {
        [winner, runner_up, ..] => (*winner, *runner_up),
        _ => return Some(Conflict::unresolved(cluster)),
    };

    if winner.confidence - runner_up.confidence <= config.tie_epsilon + GAP_TOLERANCE {
        return Some(Conflict::unresolved(cluster));
    }
    Some(Conflict::resolved(cluster, &winner.text, winner.confidence))
}

/// The text backed by the most distinct high-trust sources wins
///
/// A text needs at least `min_majority_sources` qualifying sources, and
/// must be strictly ahead of every other text.
pub fn majority_vote(cluster: &ClaimCluster, config: &ResolverConfig) -> Option<Conflict> {
    let groups = disagreement(cluster, config)?;

    let tallies: Vec<(&TextGroup<'_>, BTreeMap<DocumentId, f64>)> = groups
        .iter()
        .map(|group| (group, high_trust_sources(group, config)))
        .collect();

    let top = tallies.iter().map(|(_, s)| s.len()).max().unwrap_or(0);
    let leaders: Vec<_> = tallies.iter().filter(|(_, s)| s.len() == top).collect();

    match leaders.as_slice() {
        [(group, sources)] if top >= config.min_majority_sources => {
            let winner = group.best()?;
            let confidence = sources.values().sum::<f64>() / sources.len() as f64;
            Some(Conflict::resolved(cluster, &winner.text, confidence))
        }
        _ => Some(Conflict::unresolved(cluster)),
    }
}

/// Distinct sources of a group with a qualifying claim, with their best confidence
fn high_trust_sources(group: &TextGroup<'_>, config: &ResolverConfig) -> BTreeMap<DocumentId, f64> {
    let mut sources = BTreeMap::new();
    for claim in group.claims() {
        if claim.confidence >= config.high_trust_threshold {
            let best = sources.entry(claim.source_doc_id).or_insert(claim.confidence);
            *best = best.max(claim.confidence);
        }
    }
    sources
}

/// The single highest-ranked claim always wins
pub fn highest_credibility_wins(cluster: &ClaimCluster, config: &ResolverConfig) -> Option<Conflict> {
    disagreement(cluster, config)?;
    let winner = cluster.top_claim()?;
    Some(Conflict::resolved(cluster, &winner.text, winner.confidence))
}

/// Every disagreement is left for human review
pub fn conservative(cluster: &ClaimCluster, config: &ResolverConfig) -> Option<Conflict> {
    disagreement(cluster, config)?;
    Some(Conflict::unresolved(cluster))
}

/// Default strategy for documents of one type
pub fn default_strategy(doc_type: DocType) -> ConflictStrategy {
    match doc_type {
        DocType::ResearchPaper => ConflictStrategy::WeightedVote,
        DocType::NewsArticle => ConflictStrategy::MajorityVote,
        DocType::LegalDocument => ConflictStrategy::HighestCredibilityWins,
        DocType::BlogPost | DocType::Unknown => ConflictStrategy::Conservative,
    }
}

/// The most frequent document type, or `None` when the top count is shared
pub fn plurality_type(doc_types: &[DocType]) -> Option<DocType> {
    let mut counts: BTreeMap<DocType, usize> = BTreeMap::new();
    for doc_type in doc_types {
        *counts.entry(*doc_type).or_default() += 1;
    }
    let top = counts.values().copied().max()?;
    let leaders: BTreeSet<DocType> = counts
        .into_iter()
        .filter(|(_, n)| *n == top)
        .map(|(t, _)| t)
        .collect();
    match leaders.len() {
        1 => leaders.into_iter().next(),
        _ => None,
    }
}

/// Strategy for a job: the explicit choice, else the plurality type's default
///
/// A tie for plurality counts as a mixed batch and gets `conservative`.
pub fn select_strategy(explicit: Option<ConflictStrategy>, doc_types: &[DocType]) -> ConflictStrategy {
    explicit.unwrap_or_else(|| {
        plurality_type(doc_types)
            .map(default_strategy)
            .unwrap_or(ConflictStrategy::Conservative)
    })
}
