//! Approximate matching over entry hover text.
//!
//! Scores follow the usual approximate-matching convention: `0.0` is a perfect match
//! and larger scores are worse.

use crate::types::Entry;
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::tokenize::fuzzy_words;

/// Default maximum score a match may have to be returned.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Tuning knobs for [`FuzzyMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Matches scoring above this are dropped.
    pub threshold: f64,
    pub limit: Option<usize>,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            limit: None,
        }
    }
}

/// One fuzzy match, referring back into the matcher's entry sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub item: Arc<Entry>,
    /// Position of `item` in the sequence the matcher was built from
    pub ref_index: usize,
    pub score: f64,
}

/// Typo-tolerant matcher built once from an ordered entry sequence.
///
/// Each entry's hover text is split into words up front. A query scores against an
/// entry as `1 - mean(best Jaro-Winkler similarity of each query word)`.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    entries: Vec<Arc<Entry>>,
    /// Pre-split words per entry, aligned with `entries`; empty means unmatchable
    words: Vec<Vec<String>>,
    options: FuzzyOptions,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Vec::new(), FuzzyOptions::default())
    }
}

impl FuzzyMatcher {
    pub fn new(entries: Vec<Arc<Entry>>, options: FuzzyOptions) -> Self {
        let words = entries
            .iter()
            .map(|entry| entry.hover_text().map(fuzzy_words).unwrap_or_default())
            .collect();

        Self {
            entries,
            words,
            options,
        }
    }

    /// Returns matches ordered by increasing score; ties keep ingestion order.
    pub fn search(&self, query: &str) -> Vec<FuzzyMatch> {
        self.search_where(query, |_| true)
    }

    /// Like [`Self::search`], but only entries accepted by `admit` are scored, so the
    /// limit counts admitted matches only.
    pub fn search_where(&self, query: &str, admit: impl Fn(&Entry) -> bool) -> Vec<FuzzyMatch> {
        let query_words = fuzzy_words(query);
        if query_words.is_empty() {
            return vec![];
        }

        let mut matches: Vec<FuzzyMatch> = self
            .words
            .iter()
            .enumerate()
            .filter(|(ref_index, _)| admit(&self.entries[*ref_index]))
            .filter_map(|(ref_index, words)| {
                let score = score_words(&query_words, words)?;
                (score <= self.options.threshold).then(|| FuzzyMatch {
                    item: Arc::clone(&self.entries[ref_index]),
                    ref_index,
                    score,
                })
            })
            .collect();

        // Stable sort keeps ingestion order among equal scores
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));

        if let Some(limit) = self.options.limit {
            matches.truncate(limit);
        }

        matches
    }

    /// The entry sequence this matcher was built from.
    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }
}

/// Scores query words against one entry's words, `None` if the entry has no text.
fn score_words(query_words: &[String], words: &[String]) -> Option<f64> {
    if words.is_empty() {
        return None;
    }

    let total: f64 = query_words
        .iter()
        .map(|query_word| {
            words
                .iter()
                .map(|word| jaro_winkler::similarity(query_word.chars(), word.chars()))
                .fold(0.0, f64::max)
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let mean = total / query_words.len() as f64;
    Some((1.0 - mean).max(0.0))
}
