// Character n-gram frequency profiles.
//
// A profile counts every overlapping window of n characters in a text and
// turns the counts into relative frequencies. When a cap is given only the
// most frequent n-grams are kept, but their frequencies are still divided by
// the full pre-truncation total, so a capped profile sums to less than 1.0.
//
// Lengths are measured in chars, not bytes, so accented letters and other
// multi-byte characters count as one position in the sliding window.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// One retained n-gram with its raw count and relative frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntry {
    pub ngram: String,
    pub count: usize,
    /// count / total n-gram occurrences of the source text
    pub frequency: f64,
}

/// Relative-frequency profile of a text over character n-grams.
///
/// Entries are held in rank order: raw count descending, ties broken by the
/// n-gram string ascending. That order is also the vector order used by the
/// similarity scorer.
#[derive(Debug, Clone)]
pub struct NgramProfile {
    n: usize,
    total: usize,
    entries: Vec<ProfileEntry>,
    lookup: HashMap<String, usize>,
}

impl NgramProfile {
    /// Build a profile of `text` over n-grams of length `n`.
    ///
    /// With `cap = Some(s)` only the `s` highest-count n-grams are retained.
    /// Fails with `InvalidInput` if `n` or `s` is zero, or if the text is
    /// shorter than `n` characters.
    pub fn build(text: &str, n: usize, cap: Option<usize>) -> Result<Self> {
        if n == 0 {
            return Err(AnalysisError::invalid("n-gram length must be at least 1"));
        }
        if cap == Some(0) {
            return Err(AnalysisError::invalid(
                "profile cap must be a positive integer (use no cap instead of 0)",
            ));
        }

        let bounds = char_boundaries(text);
        let char_len = bounds.len() - 1;
        if char_len < n {
            return Err(AnalysisError::invalid(format!(
                "text has {char_len} characters, shorter than the n-gram length {n}"
            )));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for start in 0..=(char_len - n) {
            let gram = &text[bounds[start]..bounds[start + n]];
            *counts.entry(gram).or_insert(0) += 1;
        }
        let total = char_len - n + 1;

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(cap) = cap {
            ranked.truncate(cap);
        }

        let entries: Vec<ProfileEntry> = ranked
            .into_iter()
            .map(|(gram, count)| ProfileEntry {
                ngram: gram.to_string(),
                count,
                frequency: count as f64 / total as f64,
            })
            .collect();
        let lookup = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.ngram.clone(), i))
            .collect();

        Ok(Self {
            n,
            total,
            entries,
            lookup,
        })
    }

    /// The n-gram length this profile was built with.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total n-gram occurrences in the source text, before any truncation.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of retained n-grams.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries in rank order.
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Retained n-grams in rank order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.ngram.as_str())
    }

    /// Relative frequency of `ngram`, or 0.0 if it was not retained.
    pub fn frequency(&self, ngram: &str) -> f64 {
        self.lookup
            .get(ngram)
            .map_or(0.0, |&i| self.entries[i].frequency)
    }

    /// Raw count of `ngram`, or 0 if it was not retained.
    pub fn count(&self, ngram: &str) -> usize {
        self.lookup.get(ngram).map_or(0, |&i| self.entries[i].count)
    }

    /// The `k` highest-ranked entries.
    pub fn top(&self, k: usize) -> &[ProfileEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// Sum of the retained relative frequencies (1.0 when uncapped).
    pub fn frequency_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.frequency).sum()
    }
}

/// Byte offset of every char start, plus the text length as a final sentinel.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Number of chars in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
