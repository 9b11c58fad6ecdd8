//! Near-identical text grouping
//!
//! Claims inside one cluster are about the same topic; this module decides
//! which of them actually say the same thing. Two texts agree when their
//! normalized forms are equal, or when they carry the same negations and the
//! same figures and their token sets overlap by at least the configured
//! Jaccard ratio.

use concord_domain::Claim;
use std::collections::BTreeSet;

/// Lowercase, drop punctuation, collapse whitespace
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(normalized: &str) -> BTreeSet<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Jaccard overlap of the token sets of two normalized texts
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let (ta, tb) = (tokens(a), tokens(b));
    let union = ta.union(&tb).count();
    if union == 0 {
        return 1.0;
    }
    ta.intersection(&tb).count() as f64 / union as f64
}

/// Words that flip the polarity of a claim
///
/// `t` is what normalization leaves of the `n't` contraction.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "none", "neither", "nobody", "nothing", "without", "cannot", "t",
];

/// Negation words of a normalized text
fn negations(normalized: &str) -> BTreeSet<&str> {
    tokens(normalized)
        .into_iter()
        .filter(|t| NEGATIONS.contains(t))
        .collect()
}

/// Tokens holding a digit: years, amounts, percentages
fn figures(normalized: &str) -> BTreeSet<&str> {
    tokens(normalized)
        .into_iter()
        .filter(|t| t.chars().any(|c| c.is_ascii_digit()))
        .collect()
}

/// Whether two normalized texts say the same thing
///
/// High word overlap is not enough: a negation or a changed figure turns
/// an otherwise identical sentence into a disagreement.
fn same_text(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    negations(a) == negations(b) && figures(a) == figures(b) && token_overlap(a, b) >= threshold
}

/// Whether two claim texts say the same thing
pub fn near_identical(a: &str, b: &str, threshold: f64) -> bool {
    same_text(&normalize(a), &normalize(b), threshold)
}

/// Claims of one cluster that share a text
#[derive(Debug, Clone, PartialEq)]
pub struct TextGroup<'a> {
    normalized: String,
    claims: Vec<&'a Claim>,
}

impl<'a> TextGroup<'a> {
    /// Members, in input order
    pub fn claims(&self) -> &[&'a Claim] {
        &self.claims
    }

    /// Highest-ranked member
    pub fn best(&self) -> Option<&'a Claim> {
        self.claims.iter().copied().min_by(|a, b| a.rank_cmp(b))
    }
}

/// Group claims by near-identical text
///
/// Greedy in input order: each claim joins the first group whose founding
/// text it matches. Callers pass cluster members, which are sorted by id, so
/// the grouping is deterministic. Claims whose text normalizes to nothing
/// are dropped.
pub fn group_by_text(claims: &[Claim], threshold: f64) -> Vec<TextGroup<'_>> {
    let mut groups: Vec<TextGroup<'_>> = Vec::new();
    for claim in claims {
        let normalized = normalize(&claim.text);
        if normalized.is_empty() {
            continue;
        }
        let existing = groups
            .iter_mut()
            .find(|g| same_text(&g.normalized, &normalized, threshold));
        match existing {
            Some(group) => group.claims.push(claim),
            None => groups.push(TextGroup {
                normalized,
                claims: vec![claim],
            }),
        }
    }
    groups
}
