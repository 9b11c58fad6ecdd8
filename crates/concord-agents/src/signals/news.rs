//! News article signals

use super::{pct, published_date, weighted, SignalContext};
use concord_domain::{Document, Signal};
use regex::Regex;
use std::sync::LazyLock;

/// Fixed weights of the news variant
pub const WEIGHTS: [(&str, f64); 5] = [
    ("source_trust", 0.40),
    ("recency", 0.20),
    ("primary_citations", 0.15),
    ("corroboration", 0.15),
    ("byline", 0.10),
];

/// Corroborating outlets at which the corroboration signal saturates
pub const CORROBORATION_SATURATION: f64 = 4.0;

static QUOTES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r#""[^"]{20,}""#, r"“[^”]{20,}”"]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static NAMED_SOURCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:said|told|according\s+to|stated|confirmed)\s+[A-Z]").ok()
});

static BYLINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\bBy\s+[A-Z][a-z]+\s+[A-Z][a-z]+|\bReported\s+by\b|\bStaff\s+Writer\b").ok()
});

/// One-year exponential decay floored at 0.1; missing date scores 0.5
pub fn recency_score(ctx: &SignalContext, document: &Document) -> f64 {
    match published_date(document) {
        Some(date) => (-ctx.age_days(date) / 365.0).exp().max(0.1),
        None => 0.5,
    }
}

/// Direct quotes (×0.1) and named sources (×0.08), capped at 1, floored at 0.2
pub fn citation_score(text: &str) -> f64 {
    let quoted: usize = QUOTES.iter().map(|re| re.find_iter(text).count()).sum();
    let named = NAMED_SOURCE
        .as_ref()
        .map_or(0, |re| re.find_iter(text).count());
    (quoted as f64 * 0.1 + named as f64 * 0.08).min(1.0).max(0.2)
}

/// Corroboration from `corroboration_score`, else `corroboration_count / 4`,
/// else neutral 0.5
pub fn corroboration_score(document: &Document) -> f64 {
    if let Some(score) = document.meta_f64("corroboration_score") {
        return score;
    }
    document
        .meta_f64("corroboration_count")
        .map(|count| (count.max(0.0) / CORROBORATION_SATURATION).min(1.0))
        .unwrap_or(0.5)
}

/// Named author present in the text or in `author` metadata
pub fn has_byline(document: &Document) -> bool {
    document
        .meta_str("author")
        .is_some_and(|a| !a.trim().is_empty())
        || BYLINE
            .as_ref()
            .is_some_and(|re| re.is_match(&document.text))
}

/// Compute the news signal set
pub fn signals(document: &Document, ctx: &SignalContext) -> Vec<Signal> {
    let trust = ctx
        .tables
        .outlet_trust(document.source_url.as_deref(), document.meta_str("publisher"));
    let recency = recency_score(ctx, document);
    let citation = citation_score(&document.text);
    let corroboration = corroboration_score(document);
    let byline = has_byline(document);

    weighted(
        &WEIGHTS,
        vec![
            (
                trust,
                format!(
                    "{} (domain trust score {}%)",
                    if trust >= 0.85 {
                        "High-trust outlet"
                    } else if trust >= 0.6 {
                        "Moderate-trust outlet"
                    } else {
                        "Low-trust or unverified outlet"
                    },
                    pct(trust)
                ),
            ),
            (
                recency,
                format!(
                    "{} (score {}%, 1-year decay)",
                    if recency >= 0.8 {
                        "Very recent"
                    } else if recency >= 0.5 {
                        "Fairly recent"
                    } else {
                        "Older article"
                    },
                    pct(recency)
                ),
            ),
            (
                citation,
                format!(
                    "{} named sources and direct quotes detected (score {}%)",
                    if citation >= 0.5 {
                        "Good number of"
                    } else if citation >= 0.3 {
                        "Some"
                    } else {
                        "Few"
                    },
                    pct(citation)
                ),
            ),
            (
                corroboration,
                format!("Cross-source corroboration score {}%", pct(corroboration)),
            ),
            if byline {
                (0.9, "Named author byline detected".to_string())
            } else {
                (0.3, "No clear author byline found".to_string())
            },
        ],
    )
}
