//! Trust and authority lookup tables
//!
//! Tables are loaded once, then shared read-only between every job through an
//! `Arc`. Lookups are by host: a table entry `bbc.co.uk` matches
//! `https://www.bbc.co.uk/news` and `https://news.bbc.co.uk/x`, but not
//! `https://notbbc.co.uk`.

use crate::config::AgentConfig;
use crate::error::AgentError;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Neutral authority for a document without a URL
pub const NO_URL_AUTHORITY: f64 = 0.5;

/// Authority for a URL that no table or pattern recognizes
pub const UNRECOGNIZED_AUTHORITY: f64 = 0.45;

/// Outlet trust when neither URL nor publisher is recognized
pub const UNKNOWN_OUTLET_TRUST: f64 = 0.5;

/// Blog domain authority without a URL
pub const NO_URL_DOMAIN_AUTHORITY: f64 = 0.4;

/// Blog domain authority for an unlisted domain
pub const UNKNOWN_DOMAIN_AUTHORITY: f64 = 0.45;

const BUILTIN_OUTLETS: &[(&str, f64)] = &[
    ("reuters.com", 0.94),
    ("apnews.com", 0.94),
    ("bbc.com", 0.91),
    ("bbc.co.uk", 0.91),
    ("theguardian.com", 0.87),
    ("nytimes.com", 0.86),
    ("npr.org", 0.88),
    ("unep.org", 0.97),
    ("who.int", 0.97),
    ("un.org", 0.97),
    ("cdc.gov", 0.96),
    ("nih.gov", 0.97),
    ("nature.com", 0.97),
    ("foxnews.com", 0.65),
    ("breitbart.com", 0.35),
    ("infowars.com", 0.10),
];

// Applied after any override file: high-traffic outlets with known credibility issues
const BIAS_CORRECTIONS: &[(&str, f64)] = &[
    ("rt.com", 0.20),
    ("sputniknews.com", 0.18),
    ("globalresearch.ca", 0.15),
    ("zerohedge.com", 0.28),
    ("dailywire.com", 0.45),
    ("thedailybeast.com", 0.58),
    ("huffpost.com", 0.65),
    ("buzzfeednews.com", 0.68),
];

const BUILTIN_BLOG_DOMAINS: &[(&str, f64)] = &[
    ("medium.com", 0.72),
    ("substack.com", 0.65),
    ("wordpress.com", 0.55),
    ("towardsdatascience.com", 0.82),
    ("hackernoon.com", 0.75),
    ("techcrunch.com", 0.88),
    ("wired.com", 0.87),
    ("ycombinator.com", 0.90),
];

/// Institutional TLD patterns, matched against `.{host}/`
static TLD_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    [
        (r"\.gov(/|\.)", 0.93),
        (r"\.gov\.[a-z]{2}/", 0.92),
        (r"\.int(/|\.)", 0.94),
        (r"\.un\.org/", 0.97),
        (r"\.edu(/|\.)", 0.88),
        (r"\.edu\.[a-z]{2}/", 0.87),
        (r"\.ac\.[a-z]{2}/", 0.87),
    ]
    .into_iter()
    .filter_map(|(pattern, score)| Regex::new(pattern).ok().map(|re| (re, score)))
    .collect()
});

/// Lowercased host of a URL, without a leading `www.`
///
/// Scheme-less inputs such as `reuters.com/world` are accepted.
pub fn host_of(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = url::Url::parse(trimmed)
        .or_else(|_| url::Url::parse(&format!("https://{}", trimmed)))
        .ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Read-only lookup tables for outlet trust and domain authority
#[derive(Debug, Clone, PartialEq)]
pub struct TrustTables {
    outlets: BTreeMap<String, f64>,
    blog_domains: BTreeMap<String, f64>,
}

impl Default for TrustTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TrustTables {
    /// Built-in tables only
    pub fn builtin() -> Self {
        let mut tables = Self {
            outlets: to_table(BUILTIN_OUTLETS),
            blog_domains: to_table(BUILTIN_BLOG_DOMAINS),
        };
        tables.apply_bias_corrections();
        tables
    }

    /// Built-in tables with the override files named in the configuration
    pub fn load(config: &AgentConfig) -> Result<Self, AgentError> {
        let mut tables = Self::builtin();
        if let Some(path) = &config.trust_db_path {
            tables.outlets.extend(read_table(path)?);
            tables.apply_bias_corrections();
        }
        if let Some(path) = &config.domain_db_path {
            tables.blog_domains.extend(read_table(path)?);
        }
        Ok(tables)
    }

    /// Add or replace outlet entries; bias corrections still win
    pub fn with_outlets<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.outlets
            .extend(entries.into_iter().map(|(d, s)| (d.into().to_lowercase(), s)));
        self.apply_bias_corrections();
        self
    }

    /// Add or replace blog domain entries
    pub fn with_blog_domains<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.blog_domains
            .extend(entries.into_iter().map(|(d, s)| (d.into().to_lowercase(), s)));
        self
    }

    fn apply_bias_corrections(&mut self) {
        self.outlets.extend(to_table(BIAS_CORRECTIONS));
    }

    /// Number of outlet entries
    pub fn outlet_count(&self) -> usize {
        self.outlets.len()
    }

    /// Trust score for a host from the outlet table or institutional TLDs
    pub fn lookup_host(&self, host: &str) -> Option<f64> {
        lookup(&self.outlets, host).or_else(|| {
            let dotted = format!(".{}/", host);
            TLD_PATTERNS
                .iter()
                .find(|(re, _)| re.is_match(&dotted))
                .map(|(_, score)| *score)
        })
    }

    /// Authority of a source URL
    ///
    /// No URL scores [`NO_URL_AUTHORITY`]; an unrecognized one
    /// [`UNRECOGNIZED_AUTHORITY`].
    pub fn source_authority(&self, url: Option<&str>) -> f64 {
        let Some(url) = url else {
            return NO_URL_AUTHORITY;
        };
        host_of(url)
            .and_then(|host| self.lookup_host(&host))
            .unwrap_or(UNRECOGNIZED_AUTHORITY)
    }

    /// Trust in a news outlet, by URL first and publisher name second
    pub fn outlet_trust(&self, url: Option<&str>, publisher: Option<&str>) -> f64 {
        url.and_then(host_of)
            .and_then(|host| self.lookup_host(&host))
            .or_else(|| publisher.and_then(|p| self.lookup_publisher(p)))
            .unwrap_or(UNKNOWN_OUTLET_TRUST)
    }

    /// Match a publisher name against the first label of each outlet domain
    fn lookup_publisher(&self, publisher: &str) -> Option<f64> {
        let words: Vec<String> = publisher
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        self.outlets.iter().find_map(|(domain, score)| {
            let label = domain.split('.').next()?;
            (label.len() >= 3 && words.iter().any(|w| w == label)).then_some(*score)
        })
    }

    /// Authority of a blog's domain
    pub fn domain_authority(&self, url: Option<&str>) -> f64 {
        let Some(url) = url else {
            return NO_URL_DOMAIN_AUTHORITY;
        };
        host_of(url)
            .and_then(|host| lookup(&self.blog_domains, &host))
            .unwrap_or(UNKNOWN_DOMAIN_AUTHORITY)
    }
}

fn to_table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(d, s)| (d.to_string(), *s)).collect()
}

/// Longest matching domain wins, so `bbc.co.uk` beats `co.uk`
fn lookup(table: &BTreeMap<String, f64>, host: &str) -> Option<f64> {
    table
        .iter()
        .filter(|(domain, _)| host_matches(host, domain))
        .max_by_key(|(domain, _)| domain.len())
        .map(|(_, score)| *score)
}

fn read_table(path: &Path) -> Result<BTreeMap<String, f64>, AgentError> {
    let content = std::fs::read_to_string(path).map_err(|source| AgentError::TableIo {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&content).map_err(|message| AgentError::TableFormat {
        path: path.display().to_string(),
        message,
    })
}

/// Parse a JSON object of `domain: score`
///
/// Keys starting with `_` are comments and skipped. Scores must lie in [0, 1].
pub fn parse_table(json: &str) -> Result<BTreeMap<String, f64>, String> {
    let raw: BTreeMap<String, Value> =
        serde_json::from_str(json).map_err(|e| format!("expected a JSON object: {}", e))?;

    let mut table = BTreeMap::new();
    for (domain, value) in raw {
        if domain.starts_with('_') {
            continue;
        }
        let score = value
            .as_f64()
            .ok_or_else(|| format!("score for '{}' is not a number", domain))?;
        if !(0.0..=1.0).contains(&score) {
            return Err(format!("score for '{}' is outside [0, 1]", domain));
        }
        table.insert(domain.trim().to_lowercase(), score);
    }
    Ok(table)
}
