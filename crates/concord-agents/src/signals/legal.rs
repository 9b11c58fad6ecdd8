//! Legal document signals

use super::{pct, published_date, weighted, SignalContext};
use crate::tables::host_of;
use concord_domain::{Document, Signal};
use regex::Regex;
use std::sync::LazyLock;

/// Fixed weights of the legal variant
pub const WEIGHTS: [(&str, f64); 4] = [
    ("official_source", 0.35),
    ("jurisdiction", 0.30),
    ("statute_citations", 0.20),
    ("recency", 0.15),
];

/// Host suffixes of official government and court sources
pub const OFFICIAL_SUFFIXES: &[&str] = &[".gov", ".gov.uk", ".europa.eu", ".un.org", ".court"];

/// Score of jurisdiction language when nothing more specific is found
pub const BASE_JURISDICTION: f64 = 0.5;

static JURISDICTIONS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    [
        (r"(?i)\bsupreme\s+court\b", 1.0),
        (r"(?i)\bcourt\s+of\s+appeals?\b", 0.88),
        (r"(?i)\bfederal\b", 0.85),
        (r"(?i)\bdistrict\s+court\b", 0.80),
        (r"\bUS\b|\bU\.S\.", 0.85),
        (r"\bEU\b|(?i:\beuropean\s+union\b)", 0.82),
        (r"\bUK\b|\bU\.K\.|(?i:\bunited\s+kingdom\b)", 0.80),
        (r"(?i)\bstate\b", 0.70),
        (r"(?i)\bmunicipal\b", 0.55),
    ]
    .into_iter()
    .filter_map(|(p, score)| Regex::new(p).ok().map(|re| (re, score)))
    .collect()
});

static STATUTES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d+\s+U\.?S\.?C\.?\s+§\s*\d+",
        r"\bPub\.?\s*L\.?\s+\d+-\d+",
        r"\b\d+\s+C\.?F\.?R\.?\s+§\s*\d+",
        r"\bArticle\s+\d+\b",
        r"(?:\bSection|§)\s*\d+",
    ]
    .into_iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").ok());

/// 1.0 for an official host, 0.45 otherwise, 0.4 without a URL
pub fn official_source_score(url: Option<&str>) -> f64 {
    let Some(url) = url else {
        return 0.4;
    };
    let official = host_of(url).is_some_and(|host| {
        let dotted = format!(".{}", host);
        OFFICIAL_SUFFIXES
            .iter()
            .any(|suffix| dotted.ends_with(suffix) || dotted.contains(&format!("{}.", suffix)))
    });
    if official {
        1.0
    } else {
        0.45
    }
}

/// Strongest jurisdiction mentioned in the text or `jurisdiction` metadata
pub fn jurisdiction_score(document: &Document) -> f64 {
    let declared = document.meta_str("jurisdiction").unwrap_or("");
    JURISDICTIONS
        .iter()
        .filter(|(re, _)| re.is_match(&document.text) || re.is_match(declared))
        .map(|(_, score)| *score)
        .fold(BASE_JURISDICTION, f64::max)
}

/// Distinct statute citation forms ×0.2, capped at 1; none scores 0.25
pub fn statute_score(text: &str) -> f64 {
    match STATUTES.iter().filter(|re| re.is_match(text)).count() {
        0 => 0.25,
        found => (found as f64 * 0.2).min(1.0),
    }
}

/// Fifteen-year exponential decay floored at 0.2
///
/// Uses the publication date when present, else the first year mentioned in
/// the text, else a neutral 0.5.
pub fn recency_score(ctx: &SignalContext, document: &Document) -> f64 {
    if let Some(date) = published_date(document) {
        return (-(ctx.age_days(date) / 365.0) / 15.0).exp().max(0.2);
    }
    YEAR.as_ref()
        .and_then(|re| re.find(&document.text))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .map(|year| (-ctx.age_years(year) / 15.0).exp().max(0.2))
        .unwrap_or(0.5)
}

/// Compute the legal signal set
pub fn signals(document: &Document, ctx: &SignalContext) -> Vec<Signal> {
    let url = document.source_url.as_deref();
    let official = official_source_score(url);
    let jurisdiction = jurisdiction_score(document);
    let statute = statute_score(&document.text);
    let recency = recency_score(ctx, document);

    weighted(
        &WEIGHTS,
        vec![
            (
                official,
                if official >= 0.9 {
                    "Official government or court domain".to_string()
                } else {
                    format!(
                        "No official government domain found (URL: {}), may be a secondary source",
                        url.unwrap_or("none")
                    )
                },
            ),
            (
                jurisdiction,
                if jurisdiction >= 0.75 {
                    format!("High-authority jurisdiction language (score {}%)", pct(jurisdiction))
                } else {
                    format!("Standard or unspecified jurisdiction (score {}%)", pct(jurisdiction))
                },
            ),
            (
                statute,
                if statute >= 0.4 {
                    format!("Statute or code references found (score {}%)", pct(statute))
                } else {
                    "Few or no formal statute citations detected".to_string()
                },
            ),
            (
                recency,
                if recency >= 0.7 {
                    format!("Document appears recent (score {}%, 15-year decay)", pct(recency))
                } else {
                    format!(
                        "Document may be older and amended since (score {}%)",
                        pct(recency)
                    )
                },
            ),
        ],
    )
}
