//! Fusion of Kasiski and index-of-coincidence signals.
//!
//! Kasiski evidence is the primary signal; the two IC strategies act as
//! small fixed bonuses on top of it. The bonuses stay small relative to
//! the base budget: a multiple of the true period often edges out the
//! true period on raw IC distance, and must not be able to overtake a
//! stronger Kasiski candidate on bonuses alone. The result is a ranked
//! candidate list whose confidences sum to 100%.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::coincidence::{
    average_ic, closest_to, expected_ic, index_of_coincidence, MAX_LOOKUP_PERIOD,
};
use crate::analysis::kasiski::KasiskiCandidate;
use crate::error::{Error, Result};
use crate::language::LanguageProfile;

/// Points distributed proportionally to Kasiski weights.
const BASE_POINTS: f64 = 90.0;

/// Bonus for the candidate whose average IC is nearest the language IC.
const LANGUAGE_IC_BONUS: f64 = 5.0;

/// Bonus for the candidate nearest the expected-IC-derived period.
const EXPECTED_IC_BONUS: f64 = 5.0;

/// A period with its Kasiski evidence and fused confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodCandidate {
    /// Candidate key period.
    pub period: usize,
    /// Kasiski evidence weight.
    pub weight: usize,
    /// Fused confidence, in percent. The full list sums to 100.
    pub confidence: f64,
}

/// Merges Kasiski candidates with both IC strategies into one ranked,
/// percentage-scored list.
///
/// Fails with [`Error::PeriodGuessFailed`] when there is nothing to rank.
pub fn guess_periods(
    symbols: &[char],
    kasiski: &[KasiskiCandidate],
    profile: &LanguageProfile,
) -> Result<Vec<PeriodCandidate>> {
    if kasiski.is_empty() || symbols.is_empty() {
        return Err(Error::PeriodGuessFailed);
    }

    let total_weight: usize = kasiski.iter().map(|c| c.weight).sum();
    if total_weight == 0 {
        return Err(Error::PeriodGuessFailed);
    }

    let mut scored: Vec<(KasiskiCandidate, f64)> = kasiski
        .iter()
        .map(|&c| (c, BASE_POINTS * c.weight as f64 / total_weight as f64))
        .collect();

    // Nearest-match bonus: the candidate whose subsequence-averaged IC is
    // closest to the language reference IC.
    let mut avg_ics = Vec::with_capacity(kasiski.len());
    for candidate in kasiski {
        avg_ics.push(average_ic(symbols, candidate.period)?);
    }
    if let Some(pos) = closest_to(&avg_ics, profile.reference_ic()) {
        debug!(period = scored[pos].0.period, "closest to language IC");
        scored[pos].1 += LANGUAGE_IC_BONUS;
    }

    // Expected-IC bonus: find the period (1..=20) whose model-expected IC
    // is closest to the whole ciphertext's IC, then reward the candidate
    // nearest that period.
    let text_ic = index_of_coincidence(symbols);
    let model_ics: Vec<f64> = (1..=MAX_LOOKUP_PERIOD)
        .map(|d| expected_ic(symbols.len(), d, profile.reference_ic(), profile.alphabet().len()))
        .collect();
    if let Some(pos) = closest_to(&model_ics, text_ic) {
        let derived_period = pos + 1;
        debug!(derived_period, text_ic, "expected-IC-derived period");
        let periods: Vec<f64> = scored.iter().map(|(c, _)| c.period as f64).collect();
        if let Some(pos) = closest_to(&periods, derived_period as f64) {
            scored[pos].1 += EXPECTED_IC_BONUS;
        }
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = scored.iter().map(|(_, s)| s).sum();
    let candidates = scored
        .into_iter()
        .map(|(c, score)| PeriodCandidate {
            period: c.period,
            weight: c.weight,
            confidence: 100.0 * score / total,
        })
        .collect();

    debug!(?candidates, "fused period candidates");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn kasiski(weights: &[(usize, usize)]) -> Vec<KasiskiCandidate> {
        weights
            .iter()
            .map(|&(period, weight)| KasiskiCandidate { period, weight })
            .collect()
    }

    #[test]
    fn test_confidences_sum_to_hundred() {
        let profile = LanguageProfile::new(Language::English);
        let symbols: Vec<char> = "ABCABCABCABCABCABCABCABCABCABC".chars().collect();
        let candidates =
            guess_periods(&symbols, &kasiski(&[(3, 6), (2, 3), (6, 3)]), &profile).unwrap();

        let total: f64 = candidates.iter().map(|c| c.confidence).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranked_descending() {
        let profile = LanguageProfile::new(Language::English);
        let symbols: Vec<char> = "ABCABCABCABCABCABCABCABCABCABC".chars().collect();
        let candidates =
            guess_periods(&symbols, &kasiski(&[(3, 6), (2, 3), (6, 3)]), &profile).unwrap();

        for pair in candidates.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_empty_input_fails() {
        let profile = LanguageProfile::new(Language::English);
        assert!(matches!(
            guess_periods(&[], &kasiski(&[(3, 6)]), &profile),
            Err(Error::PeriodGuessFailed)
        ));
        assert!(matches!(
            guess_periods(&['A', 'B', 'C'], &[], &profile),
            Err(Error::PeriodGuessFailed)
        ));
    }

    #[test]
    fn test_dominant_kasiski_weight_wins() {
        let profile = LanguageProfile::new(Language::English);
        // Period 3 holds most of the Kasiski weight and the IC bonuses
        // cannot overcome a 10x base-score gap on their own.
        let symbols: Vec<char> = "ABCABCABCABCABCABCABCABCABCABCABCABCABCABC"
            .chars()
            .collect();
        let candidates =
            guess_periods(&symbols, &kasiski(&[(3, 40), (7, 2)]), &profile).unwrap();
        assert_eq!(candidates[0].period, 3);
    }
}
