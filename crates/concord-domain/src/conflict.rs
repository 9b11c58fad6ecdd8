//! Conflict module - clusters of claims and their resolution outcome

use crate::claim::Claim;
use crate::ids::DocumentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of applying a strategy to a disagreeing cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStatus {
    /// A winning claim text was chosen
    Resolved,
    /// Flagged for human review
    Unresolved,
}

/// Rule used to pick (or refuse to pick) a winning claim text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// Highest confidence wins unless the runner-up is within epsilon
    WeightedVote,
    /// Text supported by the most distinct high-trust sources wins
    MajorityVote,
    /// Highest confidence always wins
    HighestCredibilityWins,
    /// Every disagreement stays unresolved
    Conservative,
}

impl ConflictStrategy {
    /// All strategies
    pub const ALL: [ConflictStrategy; 4] = [
        ConflictStrategy::WeightedVote,
        ConflictStrategy::MajorityVote,
        ConflictStrategy::HighestCredibilityWins,
        ConflictStrategy::Conservative,
    ];

    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictStrategy::WeightedVote => "weighted_vote",
            ConflictStrategy::MajorityVote => "majority_vote",
            ConflictStrategy::HighestCredibilityWins => "highest_credibility_wins",
            ConflictStrategy::Conservative => "conservative",
        }
    }

    /// Parse a strategy from its name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of claims judged to address the same topic
///
/// Transient: built by the resolver and dropped when resolution ends.
/// Members are kept sorted by claim id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCluster {
    members: Vec<Claim>,
}

impl ClaimCluster {
    /// Build a cluster; members are re-ordered by claim id
    pub fn new(mut members: Vec<Claim>) -> Self {
        members.sort_by(|a, b| a.id.cmp(&b.id));
        Self { members }
    }

    /// Claims in the cluster, ordered by id
    pub fn members(&self) -> &[Claim] {
        &self.members
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Highest-ranked member: highest confidence, then lowest id
    pub fn top_claim(&self) -> Option<&Claim> {
        self.members.iter().min_by(|a, b| a.rank_cmp(b))
    }

    /// Topic label: the text of the highest-ranked member
    pub fn topic(&self) -> String {
        self.top_claim().map(|c| c.text.clone()).unwrap_or_default()
    }

    /// Distinct source documents contributing to this cluster
    pub fn sources(&self) -> BTreeSet<DocumentId> {
        self.members.iter().map(|c| c.source_doc_id).collect()
    }

    /// Whether every member comes from the same document
    pub fn is_single_source(&self) -> bool {
        self.sources().len() <= 1
    }
}

/// A cluster containing genuinely disagreeing claim texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Topic label of the cluster
    pub topic: String,

    /// Every claim of the cluster
    pub claims: Vec<Claim>,

    /// Resolution outcome
    pub status: ConflictStatus,

    /// Winning claim text, present only when resolved
    pub resolution: Option<String>,

    /// Confidence in the resolution, in [0, 1]; 0 when unresolved
    pub confidence: f64,
}

impl Conflict {
    /// Create a resolved conflict
    pub fn resolved(cluster: &ClaimCluster, resolution: impl Into<String>, confidence: f64) -> Self {
        Self {
            topic: cluster.topic(),
            claims: cluster.members().to_vec(),
            status: ConflictStatus::Resolved,
            resolution: Some(resolution.into()),
            confidence,
        }
    }

    /// Create an unresolved conflict
    pub fn unresolved(cluster: &ClaimCluster) -> Self {
        Self {
            topic: cluster.topic(),
            claims: cluster.members().to_vec(),
            status: ConflictStatus::Unresolved,
            resolution: None,
            confidence: 0.0,
        }
    }

    /// Whether a winner was chosen
    pub fn is_resolved(&self) -> bool {
        self.status == ConflictStatus::Resolved
    }
}
