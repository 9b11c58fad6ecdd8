//! Conflict resolution over the claims of one job

use crate::cluster::cluster_claims;
use crate::config::ResolverConfig;
use crate::error::ResolverError;
use crate::strategy::strategy_fn;
use concord_domain::{Claim, ClaimCluster, ClaimId, Conflict, ConflictStrategy};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Output of resolving one job's claims
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// One representative claim per cluster, ordered by cluster
    pub resolved_claims: Vec<Claim>,
    /// Clusters holding a genuine disagreement, ordered by cluster
    pub conflicts: Vec<Conflict>,
    /// Strategy that was applied
    pub strategy: ConflictStrategy,
    /// Number of clusters formed
    pub cluster_count: usize,
}

impl Resolution {
    /// Conflicts left for human review
    pub fn unresolved(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(|c| !c.is_resolved())
    }
}

/// Clusters claims and settles disagreements with one strategy
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver {
    config: ResolverConfig,
}

impl ConflictResolver {
    /// Create a resolver, validating the configuration
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
        config.validate().map_err(ResolverError::Config)?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a job's claims
    ///
    /// Input order does not matter: claims are sorted by id before
    /// clustering. Claims missing from `embeddings` are singletons.
    pub fn resolve(
        &self,
        mut claims: Vec<Claim>,
        embeddings: &HashMap<ClaimId, Vec<f32>>,
        strategy: ConflictStrategy,
    ) -> Result<Resolution, ResolverError> {
        claims.sort_by(|a, b| a.id.cmp(&b.id));
        let mut seen = HashSet::with_capacity(claims.len());
        if let Some(dup) = claims.iter().find(|c| !seen.insert(c.id)) {
            return Err(ResolverError::DuplicateClaim(dup.id));
        }

        let clusters = cluster_claims(&claims, embeddings, self.config.similarity_threshold);
        let apply = strategy_fn(strategy);

        let mut resolved_claims = Vec::with_capacity(clusters.len());
        let mut conflicts = Vec::new();
        for cluster in &clusters {
            let conflict = apply(cluster, &self.config);
            if let Some(representative) = representative(cluster, conflict.as_ref()) {
                resolved_claims.push(representative.clone());
            }
            if let Some(conflict) = conflict {
                debug!(
                    topic = %conflict.topic,
                    claims = conflict.claims.len(),
                    status = ?conflict.status,
                    "Conflict found"
                );
                conflicts.push(conflict);
            }
        }

        let resolution = Resolution {
            resolved_claims,
            conflicts,
            strategy,
            cluster_count: clusters.len(),
        };
        info!(
            %strategy,
            claims = claims.len(),
            clusters = resolution.cluster_count,
            conflicts = resolution.conflicts.len(),
            unresolved = resolution.unresolved().count(),
            "Resolution complete"
        );
        Ok(resolution)
    }
}

/// The claim standing for a cluster in the summary
///
/// The winning claim when a conflict was resolved, otherwise the
/// highest-ranked member.
fn representative<'a>(cluster: &'a ClaimCluster, conflict: Option<&Conflict>) -> Option<&'a Claim> {
    let winning_text = conflict.and_then(|c| c.resolution.as_deref());
    match winning_text {
        Some(text) => cluster
            .members()
            .iter()
            .filter(|c| c.text == text)
            .min_by(|a, b| a.rank_cmp(b))
            .or_else(|| cluster.top_claim()),
        None => cluster.top_claim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::DocumentId;

    fn claim(id: u128, doc: u128, text: &str, confidence: f64) -> Claim {
        Claim::with_id(
            ClaimId::from_value(id),
            text,
            DocumentId::from_value(doc),
            confidence,
        )
    }

    fn same_topic(ids: &[u128]) -> HashMap<ClaimId, Vec<f32>> {
        ids.iter()
            .map(|id| (ClaimId::from_value(*id), vec![1.0, 0.0, 0.0]))
            .collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ResolverConfig {
            tie_epsilon: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            ConflictResolver::new(config),
            Err(ResolverError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_claim_rejected() {
        let claims = vec![claim(1, 1, "a", 0.5), claim(1, 2, "b", 0.5)];
        let result = ConflictResolver::default().resolve(
            claims,
            &HashMap::new(),
            ConflictStrategy::Conservative,
        );
        assert_eq!(
            result,
            Err(ResolverError::DuplicateClaim(ClaimId::from_value(1)))
        );
    }

    #[test]
    fn test_unresolved_representative_is_top_claim() {
        let claims = vec![
            claim(1, 1, "X causes Y", 0.6),
            claim(2, 2, "X does not cause Y", 0.8),
        ];
        let resolution = ConflictResolver::default()
            .resolve(claims, &same_topic(&[1, 2]), ConflictStrategy::Conservative)
            .unwrap();

        assert_eq!(resolution.conflicts.len(), 1);
        assert_eq!(resolution.resolved_claims.len(), 1);
        assert_eq!(resolution.resolved_claims[0].id, ClaimId::from_value(2));
    }

    #[test]
    fn test_resolved_representative_is_winner() {
        let claims = vec![
            claim(1, 1, "Turnout was 60 percent", 0.75),
            claim(2, 2, "Turnout was 60 percent", 0.8),
            claim(3, 3, "Turnout was 45 percent", 0.95),
        ];
        let resolution = ConflictResolver::default()
            .resolve(claims, &same_topic(&[1, 2, 3]), ConflictStrategy::MajorityVote)
            .unwrap();

        assert!(resolution.conflicts[0].is_resolved());
        assert_eq!(resolution.resolved_claims[0].id, ClaimId::from_value(2));
    }

    #[test]
    fn test_consensus_cluster_still_contributes() {
        let claims = vec![
            claim(1, 1, "Rates held steady.", 0.7),
            claim(2, 2, "rates held steady", 0.9),
            claim(3, 3, "Unrelated claim", 0.5),
        ];
        let resolution = ConflictResolver::default()
            .resolve(claims, &same_topic(&[1, 2]), ConflictStrategy::WeightedVote)
            .unwrap();

        assert!(resolution.conflicts.is_empty());
        assert_eq!(resolution.cluster_count, 2);
        let ids: Vec<u128> = resolution.resolved_claims.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
