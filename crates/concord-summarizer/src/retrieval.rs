//! Keyword retrieval of supporting passages from the source texts

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w+").ok());

/// Split texts into overlapping word windows
pub fn passages(texts: &[String], words_per_passage: usize, overlap: usize) -> Vec<String> {
    let step = words_per_passage.saturating_sub(overlap).max(1);
    let mut out = Vec::new();
    for text in texts {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut start = 0;
        while start < words.len() {
            let end = (start + words_per_passage).min(words.len());
            out.push(words[start..end].join(" "));
            if end == words.len() {
                break;
            }
            start += step;
        }
    }
    out
}

fn word_set(text: &str) -> BTreeSet<String> {
    match WORD.as_ref() {
        Some(re) => re
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect(),
        None => text.split_whitespace().map(str::to_lowercase).collect(),
    }
}

/// The `top_k` passages sharing the most words with `query`
///
/// Ties keep passage order; passages sharing no word are never returned.
pub fn retrieve<'a>(passages: &'a [String], query: &str, top_k: usize) -> Vec<&'a str> {
    let query_words = word_set(query);
    let mut scored: Vec<(usize, usize)> = passages
        .iter()
        .enumerate()
        .map(|(idx, p)| (word_set(p).intersection(&query_words).count(), idx))
        .filter(|(overlap, _)| *overlap > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(top_k)
        .map(|(_, idx)| passages[idx].as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passages_overlap() {
        let text = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let out = passages(&[text], 4, 1);
        assert_eq!(out, vec!["1 2 3 4", "4 5 6 7", "7 8 9 10"]);
    }

    #[test]
    fn test_short_text_is_one_passage() {
        assert_eq!(passages(&["a b".to_string()], 300, 50), vec!["a b"]);
        assert!(passages(&[String::new()], 300, 50).is_empty());
    }

    #[test]
    fn test_retrieve_ranks_by_overlap() {
        let passages = vec![
            "the weather was mild".to_string(),
            "coffee raises blood pressure in adults".to_string(),
            "blood tests were taken".to_string(),
        ];
        let hits = retrieve(&passages, "Does coffee raise blood pressure?", 2);
        assert_eq!(hits, vec!["coffee raises blood pressure in adults", "blood tests were taken"]);
    }
}
