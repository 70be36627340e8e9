//! Kasiski period estimation.
//!
//! Distances between consecutive occurrences of a repeated n-gram are
//! (usually) multiples of the key period, so every divisor of every
//! distance is a candidate period, weighted by how much repeated
//! structure backs it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::ngram::RepeatedNgram;
use crate::error::{Error, Result};

/// How many candidate periods survive the aggregation.
pub const MAX_CANDIDATES: usize = 5;

/// A candidate period with its accumulated Kasiski evidence weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KasiskiCandidate {
    /// Candidate key period.
    pub period: usize,
    /// Accumulated evidence weight.
    pub weight: usize,
}

/// Turns repeat distances into weighted period candidates.
///
/// For every pair of consecutive occurrences of each repeated n-gram, each
/// divisor of the distance in `[2, distance]` gains the n-gram's total
/// occurrence count as weight. The top [`MAX_CANDIDATES`] periods by
/// weight are kept; ties keep their first-seen aggregation order.
///
/// Fails with [`Error::KasiskiInsufficientData`] when no repeated n-gram
/// exists at all, or when the best candidate carries no real structural
/// signal (weight <= 1).
pub fn estimate_periods(ngrams: &[RepeatedNgram]) -> Result<Vec<KasiskiCandidate>> {
    if ngrams.is_empty() {
        return Err(Error::KasiskiInsufficientData);
    }

    // Insertion-ordered accumulation so weight ties stay deterministic.
    let mut candidates: Vec<KasiskiCandidate> = Vec::new();

    for ngram in ngrams {
        let occurrences = ngram.occurrences();
        for pair in ngram.positions.windows(2) {
            let distance = pair[1] - pair[0];
            debug!(gram = %ngram.gram, distance, "repeat distance");

            for period in 2..=distance {
                if distance % period != 0 {
                    continue;
                }
                match candidates.iter_mut().find(|c| c.period == period) {
                    Some(candidate) => candidate.weight += occurrences,
                    None => candidates.push(KasiskiCandidate {
                        period,
                        weight: occurrences,
                    }),
                }
            }
        }
    }

    candidates.sort_by(|a, b| b.weight.cmp(&a.weight));
    candidates.truncate(MAX_CANDIDATES);

    match candidates.first() {
        Some(best) if best.weight > 1 => {
            debug!(?candidates, "Kasiski candidates");
            Ok(candidates)
        }
        _ => Err(Error::KasiskiInsufficientData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ngram(gram: &str, positions: &[usize]) -> RepeatedNgram {
        RepeatedNgram {
            gram: gram.to_string(),
            positions: positions.to_vec(),
        }
    }

    #[test]
    fn test_divisors_of_distance_are_weighted() {
        // One gram twice, distance 12: divisors 2,3,4,6,12 each get weight 2.
        let candidates = estimate_periods(&[ngram("ABC", &[0, 12])]).unwrap();
        let periods: Vec<usize> = candidates.iter().map(|c| c.period).collect();
        assert_eq!(periods, vec![2, 3, 4, 6, 12]);
        assert!(candidates.iter().all(|c| c.weight == 2));
    }

    #[test]
    fn test_dominant_divisor_wins() {
        let candidates = estimate_periods(&[
            ngram("ABC", &[0, 6, 12]),  // distances 6, 6 -> 2, 3, 6
            ngram("XYZ", &[1, 10]),     // distance 9 -> 3, 9
        ])
        .unwrap();
        assert_eq!(candidates[0].period, 3);
        // 3 divides every distance: 3 + 3 + 2
        assert_eq!(candidates[0].weight, 8);
    }

    #[test]
    fn test_no_ngrams_is_insufficient_data() {
        assert!(matches!(
            estimate_periods(&[]),
            Err(Error::KasiskiInsufficientData)
        ));
    }

    #[test]
    fn test_at_most_five_candidates() {
        // Distance 60 has many divisors; only the top five survive.
        let candidates = estimate_periods(&[ngram("ABC", &[0, 60])]).unwrap();
        assert_eq!(candidates.len(), MAX_CANDIDATES);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let candidates = estimate_periods(&[ngram("ABC", &[0, 12])]).unwrap();
        // All weights equal: aggregation order (ascending divisors) preserved.
        assert_eq!(candidates[0].period, 2);
        assert_eq!(candidates[4].period, 12);
    }
}
