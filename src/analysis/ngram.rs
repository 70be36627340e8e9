//! Repeated n-gram detection.
//!
//! A repeating key tends to encrypt repeated plaintext fragments into
//! identical ciphertext fragments whenever they fall at the same key
//! offset, so repeated substrings are the raw material of Kasiski's
//! method. Enumeration is worst-case O(len²) in the text length; fine for
//! classical exercises, a caveat for very large ciphertexts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest n-gram considered structural.
pub const MIN_NGRAM_LEN: usize = 3;

/// A substring of length >= 3 occurring at least twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedNgram {
    /// The repeated substring, in alphabet symbols.
    pub gram: String,
    /// Offsets of every occurrence, ascending.
    pub positions: Vec<usize>,
}

impl RepeatedNgram {
    /// Number of occurrences (always >= 2).
    pub fn occurrences(&self) -> usize {
        self.positions.len()
    }

    /// Length of the gram in symbols.
    pub fn gram_len(&self) -> usize {
        self.gram.chars().count()
    }
}

/// Finds every repeated n-gram of the text, for n = 3 upward.
///
/// Growth stops the first time a length yields no repeats: longer
/// coincidental repeats are exponentially less likely, so once a length
/// has none, longer ones almost surely have none either. This is a
/// heuristic, not a guarantee (a length-5 repeat without a length-4
/// repeat cannot exist, but the cutoff also skips lengths whose only
/// repeats would extend shorter ones).
///
/// The result is ordered by descending gram length, then descending
/// occurrence count, then first occurrence offset.
pub fn find_repeats(symbols: &[char]) -> Vec<RepeatedNgram> {
    let mut all = Vec::new();

    for n in MIN_NGRAM_LEN..=symbols.len() / 2 {
        let mut seen: HashMap<String, Vec<usize>> = HashMap::new();
        for (offset, window) in symbols.windows(n).enumerate() {
            seen.entry(window.iter().collect()).or_default().push(offset);
        }

        let mut repeated: Vec<RepeatedNgram> = seen
            .into_iter()
            .filter(|(_, positions)| positions.len() >= 2)
            .map(|(gram, positions)| RepeatedNgram { gram, positions })
            .collect();

        if repeated.is_empty() {
            break;
        }

        repeated.sort_by(|a, b| {
            b.occurrences()
                .cmp(&a.occurrences())
                .then_with(|| a.positions[0].cmp(&b.positions[0]))
        });
        debug!(n, repeats = repeated.len(), "repeated n-grams found");
        all.push(repeated);
    }

    // Longest grams first.
    all.into_iter().rev().flatten().collect()
}
