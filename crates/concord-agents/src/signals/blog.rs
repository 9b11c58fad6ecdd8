//! Blog post signals

use super::{pct, published_date, weighted, SignalContext};
use concord_domain::{Document, Signal};
use regex::Regex;
use std::sync::LazyLock;

/// Fixed weights of the blog variant
pub const WEIGHTS: [(&str, f64); 4] = [
    ("domain_authority", 0.30),
    ("author_credentials", 0.25),
    ("external_references", 0.25),
    ("recency", 0.20),
];

static LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s)>"]+"#).ok());

/// Credential markers in author bios and introductions
static CREDENTIALS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bPh\.?\s?D\b",
        r"\bM\.D\.",
        r"(?i)\bprofessor\b",
        r"(?i)\bresearcher\b",
        r"(?i)\bscientist\b",
        r"(?i)\b(senior|staff|principal|lead)\s+engineer\b",
        r"(?i)\byears\s+of\s+experience\b",
        r"(?i)\bcertified\b",
        r"(?i)\bpeer[- ]reviewed\b",
    ]
    .into_iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Number of external links in the text
pub fn link_count(text: &str) -> usize {
    LINK.as_ref().map_or(0, |re| re.find_iter(text).count())
}

/// Links ×0.08 capped at 1; no links scores 0.2
pub fn references_score(text: &str) -> f64 {
    match link_count(text) {
        0 => 0.2,
        links => (links as f64 * 0.08).min(1.0),
    }
}

/// Author credentials
///
/// An `author_credentials_score` metadata value wins. Otherwise each distinct
/// credential marker found in the text adds 0.1 to a neutral 0.5, capped at 0.9.
pub fn credentials_score(document: &Document) -> f64 {
    if let Some(score) = document.meta_f64("author_credentials_score") {
        return score;
    }
    let bio = document.meta_str("author_bio").unwrap_or("");
    let hits = CREDENTIALS
        .iter()
        .filter(|re| re.is_match(&document.text) || re.is_match(bio))
        .count();
    (0.5 + hits as f64 * 0.1).min(0.9)
}

/// Two-year exponential decay floored at 0.1; missing date scores 0.4
pub fn recency_score(ctx: &SignalContext, document: &Document) -> f64 {
    match published_date(document) {
        Some(date) => (-ctx.age_days(date) / 730.0).exp().max(0.1),
        None => 0.4,
    }
}

/// Compute the blog signal set
pub fn signals(document: &Document, ctx: &SignalContext) -> Vec<Signal> {
    let url = document.source_url.as_deref();
    let domain = ctx.tables.domain_authority(url);
    let author = credentials_score(document);
    let links = link_count(&document.text);
    let references = references_score(&document.text);
    let recency = recency_score(ctx, document);

    weighted(
        &WEIGHTS,
        vec![
            (
                domain,
                format!(
                    "{} (score {}%, {})",
                    if domain >= 0.8 {
                        "High-authority domain"
                    } else if domain >= 0.55 {
                        "Moderate-authority domain"
                    } else {
                        "Low or unknown domain authority"
                    },
                    pct(domain),
                    url.map_or_else(|| "no URL provided".to_string(), |u| format!("source: {}", u))
                ),
            ),
            (
                author,
                format!(
                    "{} (score {}%)",
                    if author >= 0.75 {
                        "Strong author credentials detected"
                    } else if author > 0.5 {
                        "Some author credentials detected"
                    } else {
                        "Limited or no author credentials found"
                    },
                    pct(author)
                ),
            ),
            (
                references,
                format!(
                    "{} external link{} found: {}",
                    links,
                    if links == 1 { "" } else { "s" },
                    if references >= 0.5 {
                        "well-referenced"
                    } else if references >= 0.25 {
                        "moderately referenced"
                    } else {
                        "few or no external sources cited"
                    }
                ),
            ),
            (
                recency,
                format!(
                    "{} post (score {}%, 2-year decay)",
                    if recency >= 0.7 {
                        "Recent"
                    } else if recency >= 0.4 {
                        "Somewhat dated"
                    } else {
                        "Older"
                    },
                    pct(recency)
                ),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::{CredibilityScore, DocumentId};
    use serde_json::json;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_references() {
        assert_eq!(references_score("no links"), 0.2);
        let text = "see https://a.example/x and (https://b.example/y) and http://c.example";
        assert_eq!(link_count(text), 3);
        assert!((references_score(text) - 0.24).abs() < 1e-9);
        let many = "https://x.example ".repeat(20);
        assert_eq!(references_score(&many), 1.0);
    }

    #[test]
    fn test_credentials_heuristic() {
        let plain = Document::new(DocumentId::new(), "I like bread.");
        assert_eq!(credentials_score(&plain), 0.5);

        let expert = Document::new(
            DocumentId::new(),
            "I am a professor and research scientist with a PhD and 20 years of experience.",
        );
        assert!((credentials_score(&expert) - 0.9).abs() < 1e-9);

        let scored = plain.with_metadata("author_credentials_score", json!(0.3));
        assert_eq!(credentials_score(&scored), 0.3);
    }

    #[test]
    fn test_unknown_blog_without_date() {
        let doc = Document::new(DocumentId::new(), "Just my thoughts on bread.");
        let score = CredibilityScore::from_signals(signals(&doc, &SignalContext::default()));
        let expected = 0.30 * 0.4 + 0.25 * 0.5 + 0.25 * 0.2 + 0.20 * 0.4;
        assert!((score.overall - expected).abs() < 1e-9);
        assert!(score.explanations["domain_authority"].contains("no URL provided"));
    }
}
