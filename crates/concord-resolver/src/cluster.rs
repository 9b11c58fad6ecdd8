//! Single-link clustering of claims by embedding similarity
//!
//! Every pair of embedded claims whose cosine similarity exceeds the
//! threshold is linked; clusters are the connected components. Pairs are
//! merged in descending similarity, ties by the lower claim ids, so the
//! process is the same for any input order.

use concord_domain::{Claim, ClaimCluster, ClaimId};
use concord_llm::cosine_similarity;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A candidate link between two claims (indices into the id-sorted input)
#[derive(Debug, Clone, Copy)]
struct Link {
    similarity: f64,
    lo: usize,
    hi: usize,
}

impl Link {
    fn order(&self, other: &Link) -> Ordering {
        other
            .similarity
            .total_cmp(&self.similarity)
            .then_with(|| self.lo.cmp(&other.lo))
            .then_with(|| self.hi.cmp(&other.hi))
    }
}

/// Disjoint-set forest over claim indices
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge two sets; the smaller root index becomes the representative
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (keep, absorb) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[absorb] = keep;
        true
    }
}

/// Cluster claims by single-link agglomeration
///
/// `claims` must be sorted by id with no duplicates. Claims without an
/// embedding in `embeddings` become singleton clusters. The returned
/// clusters are ordered by their lowest claim id.
pub fn cluster_claims(
    claims: &[Claim],
    embeddings: &HashMap<ClaimId, Vec<f32>>,
    threshold: f64,
) -> Vec<ClaimCluster> {
    debug_assert!(claims.windows(2).all(|w| w[0].id < w[1].id));

    let vectors: Vec<Option<&[f32]>> = claims
        .iter()
        .map(|c| embeddings.get(&c.id).map(Vec::as_slice))
        .collect();

    let mut links = Vec::new();
    for (i, a) in vectors.iter().enumerate() {
        let Some(a) = a else { continue };
        for (j, b) in vectors.iter().enumerate().skip(i + 1) {
            let Some(b) = b else { continue };
            let similarity = f64::from(cosine_similarity(a, b));
            if similarity > threshold {
                links.push(Link {
                    similarity,
                    lo: i,
                    hi: j,
                });
            }
        }
    }
    links.sort_by(Link::order);

    let mut sets = UnionFind::new(claims.len());
    let merges = links
        .iter()
        .filter(|link| sets.union(link.lo, link.hi))
        .count();

    let mut components: BTreeMap<usize, Vec<Claim>> = BTreeMap::new();
    for (idx, claim) in claims.iter().enumerate() {
        let root = sets.find(idx);
        components.entry(root).or_default().push(claim.clone());
    }

    debug!(
        claims = claims.len(),
        links = links.len(),
        merges,
        clusters = components.len(),
        "Claims clustered"
    );

    // roots are the lowest index of their set, so BTreeMap order is min-id order
    components.into_values().map(ClaimCluster::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::DocumentId;

    fn claim(id: u128) -> Claim {
        Claim::with_id(
            ClaimId::from_value(id),
            format!("claim {id}"),
            DocumentId::from_value(id),
            0.5,
        )
    }

    fn ids(clusters: &[ClaimCluster]) -> Vec<Vec<u128>> {
        clusters
            .iter()
            .map(|c| c.members().iter().map(|m| m.id.value()).collect())
            .collect()
    }

    fn embed(pairs: &[(u128, Vec<f32>)]) -> HashMap<ClaimId, Vec<f32>> {
        pairs
            .iter()
            .map(|(id, v)| (ClaimId::from_value(*id), v.clone()))
            .collect()
    }

    #[test]
    fn test_similar_claims_share_a_cluster() {
        let claims = vec![claim(1), claim(2), claim(3)];
        let embeddings = embed(&[
            (1, vec![1.0, 0.0]),
            (2, vec![0.95, 0.05]),
            (3, vec![0.0, 1.0]),
        ]);

        let clusters = cluster_claims(&claims, &embeddings, 0.75);
        assert_eq!(ids(&clusters), vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let claims = vec![claim(1), claim(2)];
        let embeddings = embed(&[(1, vec![1.0, 0.0]), (2, vec![1.0, 0.0])]);

        assert_eq!(cluster_claims(&claims, &embeddings, 1.0).len(), 2);
        assert_eq!(cluster_claims(&claims, &embeddings, 0.99).len(), 1);
    }

    #[test]
    fn test_single_link_is_transitive() {
        // 1~2 and 2~3 are linked, 1 and 3 are not
        let claims = vec![claim(1), claim(2), claim(3)];
        let embeddings = embed(&[
            (1, vec![1.0, 0.0]),
            (2, vec![0.8, 0.6]),
            (3, vec![0.28, 0.96]),
        ]);

        let clusters = cluster_claims(&claims, &embeddings, 0.75);
        assert_eq!(ids(&clusters), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_missing_embedding_is_singleton() {
        let claims = vec![claim(1), claim(2), claim(3)];
        let embeddings = embed(&[(1, vec![1.0, 0.0]), (3, vec![1.0, 0.0])]);

        let clusters = cluster_claims(&claims, &embeddings, 0.75);
        assert_eq!(ids(&clusters), vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_claims(&[], &HashMap::new(), 0.75).is_empty());
    }
}
