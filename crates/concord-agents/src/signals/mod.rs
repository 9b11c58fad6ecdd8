//! Credibility Signal Library
//!
//! Pure functions from a document's metadata and content to named signals in
//! [0, 1]. One module per document type; each exposes its fixed `WEIGHTS`
//! and a `signals` function returning one [`Signal`] per weight, in order.
//!
//! The only shared state is the read-only [`TrustTables`] and the reference
//! clock, both carried in a [`SignalContext`].

pub mod blog;
pub mod legal;
pub mod news;
pub mod research;

use crate::tables::TrustTables;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use concord_domain::{Document, Signal};
use std::sync::Arc;

/// Shared inputs of every signal function
#[derive(Debug, Clone)]
pub struct SignalContext {
    /// Outlet trust and domain authority tables
    pub tables: Arc<TrustTables>,
    /// Reference time for recency signals
    pub now: DateTime<Utc>,
}

impl SignalContext {
    /// Context with the given tables, evaluated at the current time
    pub fn new(tables: Arc<TrustTables>) -> Self {
        Self {
            tables,
            now: Utc::now(),
        }
    }

    /// Pin the reference time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Whole days from `date` to the reference time, never negative
    pub fn age_days(&self, date: DateTime<Utc>) -> f64 {
        (self.now - date).num_days().max(0) as f64
    }

    /// Whole years from `year` to the reference year, never negative
    pub fn age_years(&self, year: i32) -> f64 {
        (self.now.year() - year).max(0) as f64
    }
}

impl Default for SignalContext {
    fn default() -> Self {
        Self::new(Arc::new(TrustTables::builtin()))
    }
}

/// Build signals from a weight table and matching values
pub(crate) fn weighted(
    weights: &[(&'static str, f64)],
    values: Vec<(f64, String)>,
) -> Vec<Signal> {
    weights
        .iter()
        .zip(values)
        .map(|((name, weight), (value, explanation))| Signal::new(name, *weight, value, explanation))
        .collect()
}

/// Parse a publication date: RFC 3339, `YYYY-MM-DD`, or a bare year
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d")
        .ok()
        .or_else(|| {
            raw.parse::<i32>()
                .ok()
                .filter(|y| (1000..=9999).contains(y))
                .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        })?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// The document's publication date from `published_date` or `date` metadata
pub fn published_date(document: &Document) -> Option<DateTime<Utc>> {
    document
        .meta_str("published_date")
        .or_else(|| document.meta_str("date"))
        .and_then(parse_date)
}

/// Publication year from `year` metadata or the publication date
pub fn publication_year(document: &Document) -> Option<i32> {
    document
        .meta_f64("year")
        .filter(|y| y.is_finite() && *y >= 1000.0 && *y <= 9999.0)
        .map(|y| y as i32)
        .or_else(|| published_date(document).map(|d| d.year()))
}

/// Value as a whole percentage for explanations
pub(crate) fn pct(value: f64) -> i64 {
    (value.clamp(0.0, 1.0) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::DocumentId;
    use serde_json::json;

    fn ctx_2025() -> SignalContext {
        SignalContext::default().at(parse_date("2025-06-01").unwrap())
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-03-01T10:00:00Z").is_some());
        assert!(parse_date("2024-03-01T10:00:00+02:00").is_some());
        assert_eq!(parse_date("2024-03-01").unwrap().year(), 2024);
        assert_eq!(parse_date("2019").unwrap().year(), 2019);
        assert!(parse_date("last spring").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_future_dates_have_zero_age() {
        let ctx = ctx_2025();
        assert_eq!(ctx.age_days(parse_date("2030-01-01").unwrap()), 0.0);
        assert_eq!(ctx.age_years(2030), 0.0);
    }

    #[test]
    fn test_publication_year_sources() {
        let doc = Document::new(DocumentId::new(), "t").with_metadata("year", json!(2020));
        assert_eq!(publication_year(&doc), Some(2020));

        let doc = Document::new(DocumentId::new(), "t")
            .with_metadata("published_date", json!("2018-05-04"));
        assert_eq!(publication_year(&doc), Some(2018));

        assert_eq!(publication_year(&Document::new(DocumentId::new(), "t")), None);
    }
}
