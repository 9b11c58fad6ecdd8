//! Research paper signals

use super::{pct, publication_year, weighted, SignalContext};
use concord_domain::{Document, Signal};
use serde_json::Value;

/// Fixed weights of the research variant
pub const WEIGHTS: [(&str, f64); 5] = [
    ("source_authority", 0.30),
    ("venue_tier", 0.25),
    ("citation_count", 0.20),
    ("recency", 0.15),
    ("author_hindex", 0.10),
];

/// Venue keywords in priority order
pub const VENUE_TIER: &[(&str, f64)] = &[
    ("nature", 1.0),
    ("science", 1.0),
    ("cell", 0.98),
    ("lancet", 0.97),
    ("nejm", 0.97),
    ("jama", 0.96),
    ("ieee", 0.85),
    ("acm", 0.82),
    ("plos", 0.75),
    ("arxiv", 0.5),
    ("biorxiv", 0.45),
    ("preprint", 0.35),
];

/// Score for a named venue that is not in [`VENUE_TIER`]
pub const UNLISTED_VENUE: f64 = 0.55;

/// Citation count at which the citation signal saturates
pub const CITATION_SATURATION: f64 = 5000.0;

/// h-index at which the author signal saturates
pub const HINDEX_SATURATION: f64 = 60.0;

/// Half-life of research recency, in years
pub const RECENCY_HALF_LIFE_YEARS: f64 = 5.0;

/// Venue tier; missing venue scores 0
pub fn venue_score(venue: Option<&str>) -> f64 {
    let Some(venue) = venue.map(str::trim).filter(|v| !v.is_empty()) else {
        return 0.0;
    };
    let words: Vec<String> = venue
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    VENUE_TIER
        .iter()
        .find(|(key, _)| words.iter().any(|w| w == key))
        .map(|(_, score)| *score)
        .unwrap_or(UNLISTED_VENUE)
}

/// `ln(1 + c) / ln(1 + 5000)`, capped at 1; missing count scores 0
pub fn citation_score(count: Option<f64>) -> f64 {
    match count {
        Some(c) if c.is_finite() => ((c.max(0.0)).ln_1p() / CITATION_SATURATION.ln_1p()).min(1.0),
        _ => 0.0,
    }
}

/// Exponential decay with a five-year half-life; missing year scores 0.5
pub fn recency_score(ctx: &SignalContext, year: Option<i32>) -> f64 {
    match year {
        Some(year) => (-(2f64.ln()) * ctx.age_years(year) / RECENCY_HALF_LIFE_YEARS).exp(),
        None => 0.5,
    }
}

/// Best author h-index over 60, capped at 1; unknown scores 0
pub fn hindex_score(max_hindex: Option<f64>) -> f64 {
    max_hindex
        .filter(|h| h.is_finite())
        .map(|h| (h.max(0.0) / HINDEX_SATURATION).min(1.0))
        .unwrap_or(0.0)
}

fn citation_count(document: &Document) -> Option<f64> {
    document
        .meta_f64("citation_count")
        .or_else(|| document.meta_f64("citations"))
}

/// Highest h-index among `author_hindex`, `h_index` or `authors[].hIndex`
fn max_hindex(document: &Document) -> Option<f64> {
    let direct = document
        .meta_f64("author_hindex")
        .or_else(|| document.meta_f64("h_index"));
    let from_authors = document
        .metadata
        .get("authors")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|a| a.get("hIndex").or_else(|| a.get("h_index")))
        .filter_map(Value::as_f64)
        .reduce(f64::max);

    match (direct, from_authors) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Compute the research signal set
pub fn signals(document: &Document, ctx: &SignalContext) -> Vec<Signal> {
    let authority = ctx.tables.source_authority(document.source_url.as_deref());
    let venue = document
        .meta_str("venue")
        .or_else(|| document.meta_str("journal"));
    let venue_s = venue_score(venue);
    let citations = citation_count(document);
    let citation_s = citation_score(citations);
    let year = publication_year(document);
    let recency = recency_score(ctx, year);
    let hindex = max_hindex(document);
    let hindex_s = hindex_score(hindex);

    weighted(
        &WEIGHTS,
        vec![
            (
                authority,
                format!(
                    "Domain authority score {}%: {}",
                    pct(authority),
                    if authority >= 0.7 {
                        "known trustworthy source"
                    } else {
                        "unverified or lower-trust domain"
                    }
                ),
            ),
            (
                venue_s,
                format!(
                    "Published in '{}': {}",
                    venue.unwrap_or("unknown venue"),
                    if venue_s >= 0.85 {
                        "top-tier peer-reviewed venue"
                    } else if venue_s >= 0.5 {
                        "mid-tier or preprint venue"
                    } else {
                        "unknown or low-tier venue"
                    }
                ),
            ),
            (
                citation_s,
                match citations {
                    Some(c) => format!(
                        "{} citations: {}",
                        c.max(0.0) as u64,
                        if citation_s >= 0.7 {
                            "highly cited"
                        } else if citation_s >= 0.3 {
                            "moderately cited"
                        } else {
                            "few citations"
                        }
                    ),
                    None => "Citation count unknown".to_string(),
                },
            ),
            (
                recency,
                match year {
                    Some(y) => format!(
                        "Published in {}: {} (5-year half-life)",
                        y,
                        if recency >= 0.85 {
                            "very recent"
                        } else if recency >= 0.6 {
                            "fairly recent"
                        } else {
                            "older work"
                        }
                    ),
                    None => "Publication year unknown, neutral recency".to_string(),
                },
            ),
            (
                hindex_s,
                match hindex {
                    Some(h) => format!(
                        "Lead author h-index {}: {}",
                        h.max(0.0) as u64,
                        if hindex_s >= 0.6 {
                            "highly prolific researcher"
                        } else if hindex_s >= 0.3 {
                            "established researcher"
                        } else {
                            "limited publication history"
                        }
                    ),
                    None => "Author h-index unknown".to_string(),
                },
            ),
        ],
    )
}
