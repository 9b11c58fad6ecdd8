//! Keyword and pattern tables per document type

use concord_domain::DocType;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled signals for one document type
pub struct TypeSignals {
    /// Type these signals vote for
    pub doc_type: DocType,
    /// Whole-word keywords, case-insensitive
    pub keywords: Vec<Regex>,
    /// Structural patterns
    pub patterns: Vec<Regex>,
}

impl TypeSignals {
    fn compile(doc_type: DocType, keywords: &[&str], patterns: &[&str]) -> Self {
        Self {
            doc_type,
            keywords: keywords
                .iter()
                .filter_map(|kw| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).ok())
                .collect(),
            patterns: patterns.iter().filter_map(|p| Regex::new(p).ok()).collect(),
        }
    }

    /// `0.4 * keyword_ratio + 0.6 * pattern_ratio` over a text sample
    pub fn score(&self, sample: &str) -> f64 {
        let kw_hits = self.keywords.iter().filter(|re| re.is_match(sample)).count();
        let pat_hits = self.patterns.iter().filter(|re| re.is_match(sample)).count();

        let kw_score = kw_hits as f64 / self.keywords.len().max(1) as f64;
        let pat_score = pat_hits as f64 / self.patterns.len().max(1) as f64;
        0.4 * kw_score + 0.6 * pat_score
    }
}

/// Signal tables in tie-break order: research, news, blog, legal
pub static SIGNALS: LazyLock<Vec<TypeSignals>> = LazyLock::new(|| {
    vec![
        TypeSignals::compile(
            DocType::ResearchPaper,
            &[
                "abstract", "introduction", "methodology", "conclusion", "references", "doi",
                "arxiv", "peer-reviewed", "hypothesis", "experiment", "dataset",
                "literature review", "findings", "results", "figure", "table", "appendix",
                "journal", "proceedings", "citation", "et al", "preprint",
            ],
            &[
                r"(?is)\babstract\b.{0,600}\bintroduction\b",
                r"(?i)\breferences\b[\s\S]{0,300}\[\d+\]",
                r"(?i)\b\d+\.\s+introduction\b",
                r"(?i)doi\.org",
                r"(?i)arxiv\.org",
            ],
        ),
        TypeSignals::compile(
            DocType::NewsArticle,
            &[
                "reported", "according to", "said", "spokesperson", "breaking", "exclusive",
                "journalist", "byline", "wire", "AP", "Reuters", "AFP", "correspondent",
                "editor", "bureau", "published", "updated", "news", "article", "press", "media",
            ],
            &[
                r"\b[Bb]y [A-Z][a-z]+ [A-Z][a-z]+\b",
                r"(?i)\b(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b",
                r"(?i)\breuters\b|\bap news\b|\bbbc\b|\bcnn\b|\bnpr\b",
                r"(?i)\b(hours?|days?|weeks?) ago\b",
            ],
        ),
        TypeSignals::compile(
            DocType::BlogPost,
            &[
                "i think", "i believe", "in my opinion", "my experience", "subscribe",
                "newsletter", "follow me", "share this", "comment below", "read more",
                "click here", "posted", "author bio", "about me", "substack", "medium",
                "wordpress", "blogger",
            ],
            &[
                r"(?i)\bsubstack\.com\b",
                r"(?i)\bmedium\.com\b",
                r"(?i)\bwordpress\b",
                r"(?i)subscribe\s+to\s+(my|our|the)",
            ],
        ),
        TypeSignals::compile(
            DocType::LegalDocument,
            &[
                "whereas", "hereinafter", "pursuant to", "plaintiff", "defendant",
                "jurisdiction", "hereby", "notwithstanding", "shall", "contract", "agreement",
                "liability", "party", "clause", "indemnify", "statute", "regulation",
                "ordinance", "section", "subsection",
            ],
            &[
                r"(?i)\bwhereas\b",
                r"(?i)\bhereinafter\b",
                r"(?i)\bparty of the first part\b",
                r"(?i)\bpursuant to\b",
                r"§\s*\d+",
            ],
        ),
    ]
});

static LEGAL_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bwhereas\b|\bhereinafter\b|\bpursuant to\b").ok());

static BYLINE_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[Bb]y [A-Z][a-z]+ [A-Z][a-z]+\b").ok());

fn hint_matches(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// Score every known type over a sample; order follows [`SIGNALS`]
pub fn keyword_scores(sample: &str) -> Vec<(DocType, f64)> {
    SIGNALS
        .iter()
        .map(|signals| (signals.doc_type, signals.score(sample)))
        .collect()
}

/// Best-scoring type; the earlier type wins a tie
pub fn best_match(sample: &str) -> Option<(DocType, f64)> {
    keyword_scores(sample)
        .into_iter()
        .fold(None, |best, (doc_type, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((doc_type, score)),
        })
}

/// Last-resort heuristics used when nothing else decided
pub fn simple_hint(text: &str) -> Option<DocType> {
    let lower = text.to_lowercase();
    if lower.contains("abstract") && lower.contains("introduction") {
        return Some(DocType::ResearchPaper);
    }
    if hint_matches(&LEGAL_HINT, text) {
        return Some(DocType::LegalDocument);
    }
    if hint_matches(&BYLINE_HINT, text) {
        return Some(DocType::NewsArticle);
    }
    None
}
