//! End-to-end resolution scenarios and strategy laws

use concord_domain::{Claim, ClaimId, ConflictStatus, ConflictStrategy, DocumentId};
use concord_resolver::{ConflictResolver, ResolverConfig};
use proptest::prelude::*;
use std::collections::HashMap;

const TOPICS: [[f32; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.9, 0.3, 0.0],
];

const TEXTS: [[&str; 3]; 4] = [
    ["Coffee raises blood pressure", "Coffee lowers blood pressure", "coffee raises blood pressure."],
    ["The bridge opened in 1932", "The bridge opened in 1936", "The bridge never opened"],
    ["Inflation is 3 percent", "Inflation is 5 percent", "inflation is 3 percent"],
    ["Coffee has no effect on blood pressure", "Coffee raises blood pressure a lot", "Tea raises blood pressure"],
];

fn claim(id: u128, doc: u128, text: &str, confidence: f64) -> Claim {
    Claim::with_id(
        ClaimId::from_value(id),
        text,
        DocumentId::from_value(doc),
        confidence,
    )
}

fn embeddings_for(claims: &[(Claim, Vec<f32>)]) -> HashMap<ClaimId, Vec<f32>> {
    claims.iter().map(|(c, v)| (c.id, v.clone())).collect()
}

fn resolve(
    claims: Vec<Claim>,
    embeddings: &HashMap<ClaimId, Vec<f32>>,
    strategy: ConflictStrategy,
) -> concord_resolver::Resolution {
    ConflictResolver::default()
        .resolve(claims, embeddings, strategy)
        .unwrap()
}

#[test]
fn test_research_beats_blog_under_weighted_vote() {
    let research = claim(1, 1, "X causes Y", 0.9);
    let blog = claim(2, 2, "X does not cause Y", 0.4);
    let embeddings: HashMap<ClaimId, Vec<f32>> = [
        (research.id, vec![0.9, 0.1, 0.4]),
        (blog.id, vec![0.85, 0.15, 0.45]),
    ]
    .into_iter()
    .collect();

    let resolution = resolve(vec![research, blog], &embeddings, ConflictStrategy::WeightedVote);

    assert_eq!(resolution.conflicts.len(), 1);
    let conflict = &resolution.conflicts[0];
    assert_eq!(conflict.status, ConflictStatus::Resolved);
    assert_eq!(conflict.resolution.as_deref(), Some("X causes Y"));
    assert_eq!(conflict.claims.len(), 2);
}

#[test]
fn test_two_trusted_outlets_outvote_one() {
    let claims = vec![
        claim(1, 1, "The mayor resigned on Friday.", 0.82),
        claim(2, 2, "The mayor resigned on Friday", 0.78),
        claim(3, 3, "The mayor refused to resign", 0.45),
    ];
    let embeddings = claims
        .iter()
        .map(|c| (c.id, vec![0.2, 0.9, 0.1]))
        .collect();

    let resolution = resolve(claims, &embeddings, ConflictStrategy::MajorityVote);

    assert_eq!(resolution.conflicts.len(), 1);
    let conflict = &resolution.conflicts[0];
    assert!(conflict.is_resolved());
    assert_eq!(
        conflict.resolution.as_deref(),
        Some("The mayor resigned on Friday.")
    );
    assert!((conflict.confidence - 0.80).abs() < 1e-9);
}

#[test]
fn test_unrelated_topics_do_not_conflict() {
    let claims = vec![
        claim(1, 1, "The river flooded in May", 0.8),
        claim(2, 2, "Grain prices doubled", 0.3),
    ];
    let embeddings = [
        (ClaimId::from_value(1), vec![1.0, 0.0]),
        (ClaimId::from_value(2), vec![0.0, 1.0]),
    ]
    .into_iter()
    .collect();

    for strategy in ConflictStrategy::ALL {
        let resolution = resolve(claims.clone(), &embeddings, strategy);
        assert!(resolution.conflicts.is_empty());
        assert_eq!(resolution.resolved_claims.len(), 2);
    }
}

#[test]
fn test_missing_embeddings_degrade_to_singletons() {
    let claims = vec![
        claim(1, 1, "X causes Y", 0.9),
        claim(2, 2, "X does not cause Y", 0.4),
    ];
    let resolution = resolve(claims, &HashMap::new(), ConflictStrategy::Conservative);
    assert!(resolution.conflicts.is_empty());
    assert_eq!(resolution.cluster_count, 2);
}

#[test]
fn test_threshold_comes_from_config() {
    let claims = vec![
        claim(1, 1, "X causes Y", 0.9),
        claim(2, 2, "X does not cause Y", 0.4),
    ];
    // cosine ≈ 0.707
    let embeddings = [
        (ClaimId::from_value(1), vec![1.0, 0.0]),
        (ClaimId::from_value(2), vec![1.0, 1.0]),
    ]
    .into_iter()
    .collect();

    let strict = resolve(claims.clone(), &embeddings, ConflictStrategy::Conservative);
    assert!(strict.conflicts.is_empty());

    let loose = ConflictResolver::new(ResolverConfig::aggressive())
        .unwrap()
        .resolve(claims, &embeddings, ConflictStrategy::Conservative)
        .unwrap();
    assert_eq!(loose.conflicts.len(), 1);
}

const VACCINE: &str =
    "The new vaccine is effective at reducing hospital admissions among elderly patients";

fn same_topic(claims: &[Claim]) -> HashMap<ClaimId, Vec<f32>> {
    claims.iter().map(|c| (c.id, vec![0.3, 0.9, 0.2])).collect()
}

#[test]
fn test_long_negated_claim_is_a_conflict() {
    let claims = vec![
        claim(1, 1, VACCINE, 0.9),
        claim(2, 2, &VACCINE.replace("is effective", "is not effective"), 0.4),
    ];
    let embeddings = same_topic(&claims);

    let weighted = resolve(claims.clone(), &embeddings, ConflictStrategy::WeightedVote);
    assert_eq!(weighted.conflicts.len(), 1);
    assert_eq!(weighted.conflicts[0].resolution.as_deref(), Some(VACCINE));

    let conservative = resolve(claims, &embeddings, ConflictStrategy::Conservative);
    assert_eq!(conservative.conflicts.len(), 1);
    assert_eq!(conservative.conflicts[0].status, ConflictStatus::Unresolved);
}

#[test]
fn test_long_claims_with_different_figures_conflict() {
    let base = "Survey results published this week show that 60 percent of households in the \
                region now rely on public transport for their daily commute";
    let cases = [
        base.replace("60 percent", "45 percent"),
        base.replace("this week", "this week never"),
        base.replace("now rely", "now don't rely"),
    ];

    for other in cases {
        let claims = vec![claim(1, 1, base, 0.8), claim(2, 2, &other, 0.8)];
        let embeddings = same_topic(&claims);
        let resolution = resolve(claims, &embeddings, ConflictStrategy::Conservative);
        assert_eq!(resolution.conflicts.len(), 1, "{other}");
    }
}

#[test]
fn test_long_rewording_is_consensus() {
    let claims = vec![
        claim(1, 1, VACCINE, 0.9),
        claim(2, 2, &format!("{VACCINE}."), 0.8),
        claim(3, 3, &VACCINE.replace("among elderly", "among the elderly"), 0.85),
    ];
    let embeddings = same_topic(&claims);

    let resolution = resolve(claims, &embeddings, ConflictStrategy::Conservative);
    assert!(resolution.conflicts.is_empty());
    assert_eq!(resolution.resolved_claims.len(), 1);
}

fn plain_word() -> impl Strategy<Value = String> {
    "[a-z]{3,9}".prop_filter("polarity words", |w| {
        !["not", "nor", "none", "never", "neither", "nobody", "nothing", "without", "cannot"]
            .contains(&w.as_str())
    })
}

fn scenario() -> impl Strategy<Value = Vec<(Claim, Vec<f32>)>> {
    prop::collection::vec((0usize..4, 0u128..4, 0usize..3, 0.0f64..=1.0), 1..14).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (topic, doc, text, confidence))| {
                (
                    claim(idx as u128 + 1, doc, TEXTS[topic][text], confidence),
                    TOPICS[topic].to_vec(),
                )
            })
            .collect()
    })
}

fn shuffled_scenario() -> impl Strategy<Value = (Vec<(Claim, Vec<f32>)>, Vec<(Claim, Vec<f32>)>)> {
    scenario().prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
}

fn strategy() -> impl Strategy<Value = ConflictStrategy> {
    prop::sample::select(ConflictStrategy::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_resolution_is_order_independent(
        (rows, permuted) in shuffled_scenario(),
        strategy in strategy(),
    ) {
        let embeddings = embeddings_for(&rows);
        let a = resolve(rows.into_iter().map(|(c, _)| c).collect(), &embeddings, strategy);
        let b = resolve(permuted.into_iter().map(|(c, _)| c).collect(), &embeddings, strategy);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_one_representative_per_cluster(rows in scenario(), strategy in strategy()) {
        let embeddings = embeddings_for(&rows);
        let resolution = resolve(rows.into_iter().map(|(c, _)| c).collect(), &embeddings, strategy);
        prop_assert_eq!(resolution.resolved_claims.len(), resolution.cluster_count);
        prop_assert!(resolution.conflicts.len() <= resolution.cluster_count);
    }

    #[test]
    fn prop_conservative_never_resolves(rows in scenario()) {
        let embeddings = embeddings_for(&rows);
        let resolution = resolve(
            rows.into_iter().map(|(c, _)| c).collect(),
            &embeddings,
            ConflictStrategy::Conservative,
        );
        for conflict in &resolution.conflicts {
            prop_assert_eq!(conflict.status, ConflictStatus::Unresolved);
            prop_assert!(conflict.resolution.is_none());
        }
    }

    #[test]
    fn prop_highest_credibility_winner_dominates(rows in scenario()) {
        let embeddings = embeddings_for(&rows);
        let resolution = resolve(
            rows.into_iter().map(|(c, _)| c).collect(),
            &embeddings,
            ConflictStrategy::HighestCredibilityWins,
        );
        for conflict in &resolution.conflicts {
            prop_assert!(conflict.is_resolved());
            let mut ranked = conflict.claims.clone();
            ranked.sort_by(Claim::rank_cmp);
            prop_assert_eq!(conflict.resolution.as_deref(), Some(ranked[0].text.as_str()));
            prop_assert!(conflict.claims.iter().all(|c| c.confidence <= ranked[0].confidence));
        }
    }

    #[test]
    fn prop_single_document_never_conflicts(rows in scenario(), strategy in strategy()) {
        let embeddings = embeddings_for(&rows);
        let claims = rows
            .into_iter()
            .map(|(c, _)| Claim { source_doc_id: DocumentId::from_value(99), ..c })
            .collect();
        let resolution = resolve(claims, &embeddings, strategy);
        prop_assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn prop_conflict_claims_have_distinct_texts(rows in scenario(), strategy in strategy()) {
        let embeddings = embeddings_for(&rows);
        let resolution = resolve(rows.into_iter().map(|(c, _)| c).collect(), &embeddings, strategy);
        for conflict in &resolution.conflicts {
            prop_assert!(conflict.claims.len() >= 2);
            let first = concord_resolver::text::normalize(&conflict.claims[0].text);
            prop_assert!(conflict
                .claims
                .iter()
                .any(|c| concord_resolver::text::normalize(&c.text) != first));
        }
    }

    #[test]
    fn prop_inserting_not_splits_long_claims(
        words in prop::collection::vec(plain_word(), 9..20),
        position in any::<prop::sample::Index>(),
    ) {
        let original = words.join(" ");
        let mut negated_words = words.clone();
        negated_words.insert(position.index(words.len() + 1), "not".to_string());
        let negated = negated_words.join(" ");

        let claims = vec![claim(1, 1, &original, 0.9), claim(2, 2, &negated, 0.4)];
        prop_assert_eq!(concord_resolver::text::group_by_text(&claims, 0.9).len(), 2);

        let embeddings = same_topic(&claims);
        let resolution = resolve(claims, &embeddings, ConflictStrategy::Conservative);
        prop_assert_eq!(resolution.conflicts.len(), 1);
        prop_assert_eq!(resolution.conflicts[0].status, ConflictStatus::Unresolved);
    }
}
