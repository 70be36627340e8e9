//! Index-of-coincidence period scoring.
//!
//! The index of coincidence (IC) is the probability that two randomly
//! chosen letters of a text are identical. Splitting at the true period
//! yields monoalphabetic subsequences whose average IC approaches the
//! language's reference value; wrong periods flatten it toward the
//! uniform 1/|alphabet|.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::language::LanguageProfile;
use crate::text::split_subsequences;

/// Guard against division by zero when an IC difference is exact.
const MIN_IC_DISTANCE: f64 = 1e-9;

/// Largest period probed by the expected-IC lookup.
pub const MAX_LOOKUP_PERIOD: usize = 20;

/// Index of coincidence of a symbol sequence: Σ f(f−1) / (n(n−1)).
///
/// Defined as 0 for texts of length <= 1.
pub fn index_of_coincidence(symbols: &[char]) -> f64 {
    let n = symbols.len();
    if n <= 1 {
        return 0.0;
    }

    let mut frequencies: HashMap<char, usize> = HashMap::new();
    for &symbol in symbols {
        *frequencies.entry(symbol).or_insert(0) += 1;
    }

    let pairs = (n * (n - 1)) as f64;
    frequencies
        .values()
        .map(|&f| (f * (f - 1)) as f64 / pairs)
        .sum()
}

/// Mean IC over the `period` subsequences of the text.
pub fn average_ic(symbols: &[char], period: usize) -> Result<f64> {
    let subsequences = split_subsequences(symbols, period)?;
    let sum: f64 = subsequences
        .iter()
        .map(|sub| index_of_coincidence(sub))
        .sum();
    Ok(sum / period as f64)
}

/// Expected IC of a ciphertext of length `n` encrypted with period `d`,
/// for a language with the given reference IC and alphabet size.
pub fn expected_ic(n: usize, d: usize, language_ic: f64, alphabet_len: usize) -> f64 {
    let n = n as f64;
    let d = d as f64;
    (1.0 / d) * ((n - d) / (n - 1.0)) * language_ic
        + ((d - 1.0) / d) * (n / (n - 1.0)) * (1.0 / alphabet_len as f64)
}

/// Index of the value nearest to `target`; on an exact tie the later
/// element wins. None for an empty slice.
pub fn closest_to(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().enumerate() {
        let distance = (value - target).abs();
        match best {
            Some((_, best_distance)) if distance > best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Nearest-match strategy: candidate periods ranked by how close their
/// average IC is to the language reference IC, ascending distance.
///
/// Ties keep the input candidate order. Returns (period, average IC).
pub fn rank_by_language_ic(
    symbols: &[char],
    periods: &[usize],
    profile: &LanguageProfile,
) -> Result<Vec<(usize, f64)>> {
    let mut scored = Vec::with_capacity(periods.len());
    for &period in periods {
        let avg = average_ic(symbols, period)?;
        debug!(period, avg_ic = avg, "subsequence-averaged IC");
        scored.push((period, avg));
    }

    let reference = profile.reference_ic();
    scored.sort_by(|a, b| {
        let da = (a.1 - reference).abs();
        let db = (b.1 - reference).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(scored)
}

/// Expected-IC model strategy: each candidate period scored by the inverse
/// distance between its average IC and its model-expected IC, normalized
/// into a probability distribution. Returned in input order.
pub fn model_probabilities(
    symbols: &[char],
    periods: &[usize],
    profile: &LanguageProfile,
) -> Result<Vec<(usize, f64)>> {
    let n = symbols.len();
    let language_ic = profile.reference_ic();
    let alphabet_len = profile.alphabet().len();

    let mut inverses = Vec::with_capacity(periods.len());
    for &period in periods {
        let avg = average_ic(symbols, period)?;
        let expected = expected_ic(n, period, language_ic, alphabet_len);
        let distance = (avg - expected).abs().max(MIN_IC_DISTANCE);
        inverses.push((period, 1.0 / distance));
    }

    let total: f64 = inverses.iter().map(|(_, inv)| inv).sum();
    Ok(inverses
        .into_iter()
        .map(|(period, inv)| (period, inv / total))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_ic_of_repeated_symbol_is_one() {
        assert_eq!(index_of_coincidence(&chars("AAAA")), 1.0);
        assert_eq!(index_of_coincidence(&chars("ZZ")), 1.0);
    }

    #[test]
    fn test_ic_of_short_text_is_zero() {
        assert_eq!(index_of_coincidence(&[]), 0.0);
        assert_eq!(index_of_coincidence(&chars("A")), 0.0);
    }

    #[test]
    fn test_ic_of_two_distinct_symbols() {
        // AB: no identical pair
        assert_eq!(index_of_coincidence(&chars("AB")), 0.0);
        // AABB: 2 identical pairs of 6
        let ic = index_of_coincidence(&chars("AABB"));
        assert!((ic - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_ic_monoalphabetic_period() {
        // ABAB at period 2: both subsequences are constant
        let avg = average_ic(&chars("ABABABAB"), 2).unwrap();
        assert_eq!(avg, 1.0);
    }

    #[test]
    fn test_closest_to_tie_takes_later_element() {
        assert_eq!(closest_to(&[1.0, 2.0, 4.0, 6.0], 3.0), Some(2));
    }

    #[test]
    fn test_closest_to_simple() {
        assert_eq!(closest_to(&[1.0, 2.0, 3.0], 1.8), Some(1));
        assert_eq!(closest_to(&[], 1.0), None);
    }

    #[test]
    fn test_rank_by_language_ic_prefers_monoalphabetic_split() {
        let profile = LanguageProfile::new(Language::English);
        // At period 2 both subsequences are constant (IC 1.0); at period 3
        // they are uniform over {A,B} and score near 0.5. Neither is close
        // to English, but 0.5 is closer than 1.0.
        let symbols = chars("ABABABABABABABABABAB");
        let ranked = rank_by_language_ic(&symbols, &[2, 3], &profile).unwrap();
        assert_eq!(ranked[0].0, 3);
        assert_eq!(ranked[1].0, 2);
        assert_eq!(ranked[1].1, 1.0);
    }

    #[test]
    fn test_model_probabilities_sum_to_one() {
        let profile = LanguageProfile::new(Language::English);
        let symbols = chars("ABCABCABCABCABCABCABCABC");
        let probs = model_probabilities(&symbols, &[2, 3, 4], &profile).unwrap();
        let total: f64 = probs.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
