//! Pipeline facade: from raw ciphertext to key and plaintext.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{estimate_periods, find_repeats, guess_periods, KasiskiCandidate, PeriodCandidate, RepeatedNgram};
use crate::error::Result;
use crate::language::{Language, LanguageProfile};
use crate::solver::{recover_key, CandidateSelector, Recovery};
use crate::text::{normalize, normalize_strict, NormalizedText};

/// Everything one crack run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrackResult {
    /// Ranked period candidates (empty when the period was supplied).
    pub candidates: Vec<PeriodCandidate>,
    /// The period actually used for recovery.
    pub period: usize,
    /// Recovered key, shifts and plaintext.
    pub recovery: Recovery,
}

/// Holds the language profile and normalized ciphertext for one
/// analysis; every method is a pure function of that state.
#[derive(Debug, Clone)]
pub struct Cracker {
    profile: LanguageProfile,
    text: NormalizedText,
}

impl Cracker {
    /// Prepares a ciphertext for analysis (lenient normalization).
    pub fn new(raw: &str, language: Language) -> Self {
        let profile = LanguageProfile::new(language);
        let text = normalize(raw, profile.alphabet());
        debug!(language = %language, symbols = text.len(), "ciphertext normalized");
        Self { profile, text }
    }

    /// Strict variant: fails on letters outside the alphabet.
    pub fn new_strict(raw: &str, language: Language) -> Result<Self> {
        let profile = LanguageProfile::new(language);
        let text = normalize_strict(raw, profile.alphabet())?;
        Ok(Self { profile, text })
    }

    /// The language profile in use.
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// The normalized ciphertext.
    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    /// Repeated n-grams of the ciphertext (length >= 3, >= 2 occurrences).
    pub fn repeated_ngrams(&self) -> Vec<RepeatedNgram> {
        find_repeats(self.text.symbols())
    }

    /// Weighted Kasiski period candidates.
    pub fn kasiski_candidates(&self) -> Result<Vec<KasiskiCandidate>> {
        estimate_periods(&self.repeated_ngrams())
    }

    /// Full period estimation: Kasiski evidence fused with both IC
    /// strategies into a ranked, percentage-scored candidate list.
    pub fn guess_periods(&self) -> Result<Vec<PeriodCandidate>> {
        let kasiski = self.kasiski_candidates()?;
        guess_periods(self.text.symbols(), &kasiski, &self.profile)
    }

    /// Recovers key and plaintext for a chosen period.
    pub fn recover(&self, period: usize, selector: &mut dyn CandidateSelector) -> Result<Recovery> {
        recover_key(&self.text, period, &self.profile, selector)
    }

    /// The whole pipeline: estimate the period (unless one is given),
    /// then recover the key and plaintext.
    pub fn crack(
        &self,
        period: Option<usize>,
        selector: &mut dyn CandidateSelector,
    ) -> Result<CrackResult> {
        let (candidates, period) = match period {
            Some(period) => (Vec::new(), period),
            None => {
                let candidates = self.guess_periods()?;
                let best = candidates
                    .first()
                    .map(|c| c.period)
                    .ok_or(crate::error::Error::PeriodGuessFailed)?;
                (candidates, best)
            }
        };

        let recovery = self.recover(period, selector)?;
        Ok(CrackResult {
            candidates,
            period,
            recovery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;
    use crate::error::Error;
    use crate::solver::AutoSelector;

    #[test]
    fn test_degenerate_inputs_yield_typed_errors() {
        for raw in ["", "x", "no repeats here"] {
            let cracker = Cracker::new(raw, Language::English);
            assert!(matches!(
                cracker.guess_periods(),
                Err(Error::KasiskiInsufficientData)
            ));
        }
    }

    #[test]
    fn test_explicit_period_bypasses_estimation() {
        let plain = "a short note with too little repetition for kasiski to work with";
        let encrypted = cipher::encrypt(plain, "B", Language::English).unwrap();
        let cracker = Cracker::new(&encrypted, Language::English);

        let result = cracker.crack(Some(1), &mut AutoSelector).unwrap();
        assert!(result.candidates.is_empty());
        assert_eq!(result.period, 1);
    }
}
