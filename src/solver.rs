//! Key recovery by frequency alignment.
//!
//! For a chosen period, each subsequence is a monoalphabetic shift
//! cipher. The most frequent ciphertext symbols of the subsequence are
//! hypothesized, one by one, to be the encryption of the language's most
//! frequent letter; each hypothesis is scored by how many of the frequent
//! ciphertext symbols it decrypts into the language's frequent-letter
//! list. The winning shift decrypts the subsequence, and the shifts
//! together spell the key.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::language::LanguageProfile;
use crate::text::{interleave, split_subsequences, NormalizedText};

/// How many of a subsequence's most frequent symbols are considered.
pub const TOP_SYMBOLS: usize = 5;

/// One hypothesis: a ciphertext symbol assumed to encrypt the language's
/// most frequent letter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftHypothesis {
    /// The ciphertext symbol.
    pub symbol: char,
    /// Occurrences of the symbol in the subsequence.
    pub occurrences: usize,
    /// The additive shift this hypothesis implies.
    pub shift: usize,
    /// Frequent ciphertext symbols that this shift decrypts into the
    /// language's frequent-letter list.
    pub matches: usize,
    /// `matches` as a percentage of all hypotheses' matches.
    pub score: f64,
}

/// Decides which hypothesis to apply for one subsequence.
///
/// This is the seam between automatic and interactive solving: the same
/// recovery loop serves both, and tests can drive manual mode without a
/// terminal.
pub trait CandidateSelector {
    /// Returns the chosen ciphertext symbol for the subsequence.
    ///
    /// `hypotheses` is ranked best-first and never empty. The returned
    /// symbol does not have to appear in the list, but it must belong to
    /// the alphabet.
    fn choose(&mut self, subsequence: usize, hypotheses: &[ShiftHypothesis]) -> Result<char>;
}

/// Takes the top-ranked hypothesis, no questions asked.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoSelector;

impl CandidateSelector for AutoSelector {
    fn choose(&mut self, _subsequence: usize, hypotheses: &[ShiftHypothesis]) -> Result<char> {
        hypotheses
            .first()
            .map(|h| h.symbol)
            .ok_or(Error::PeriodGuessFailed)
    }
}

/// The terminal output of one recovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recovery {
    /// Recovered key, one letter per subsequence.
    pub key: String,
    /// The additive shift behind each key letter.
    pub shifts: Vec<usize>,
    /// Decrypted text, re-expanded into the original layout.
    pub plaintext: String,
}

/// Recovers the key and plaintext for a chosen period.
pub fn recover_key(
    text: &NormalizedText,
    period: usize,
    profile: &LanguageProfile,
    selector: &mut dyn CandidateSelector,
) -> Result<Recovery> {
    let alphabet = profile.alphabet();
    let n = alphabet.len();
    let subsequences = split_subsequences(text.symbols(), period)?;

    let mut key = String::with_capacity(period);
    let mut shifts = Vec::with_capacity(period);
    let mut decrypted = Vec::with_capacity(period);

    for (index, subsequence) in subsequences.iter().enumerate() {
        let hypotheses = rank_hypotheses(subsequence, profile);
        if hypotheses.is_empty() {
            return Err(Error::InvalidPeriod {
                period,
                length: text.len(),
            });
        }

        let chosen = alphabet.fold(selector.choose(index, &hypotheses)?);
        let chosen_pos = alphabet.index_of(chosen).ok_or(Error::InvalidCharacter {
            position: index,
            character: chosen,
        })?;

        let most_frequent = profile.most_frequent_letter();
        let plain_pos = alphabet
            .index_of(most_frequent)
            .ok_or(Error::InvalidCharacter {
                position: index,
                character: most_frequent,
            })?;
        let shift = (chosen_pos + n - plain_pos) % n;

        // Canonical convention: the key letter sits one position below the
        // raw shift, matching Enc(x) = x + index(k) + 1.
        let key_letter = alphabet.symbol_at(shift + n - 1);
        debug!(subsequence = index, chosen = %chosen, shift, key_letter = %key_letter, "resolved shift");

        let mut sub_plain = Vec::with_capacity(subsequence.len());
        for &symbol in subsequence {
            let decrypted_symbol =
                alphabet
                    .shift_backward(symbol, shift)
                    .ok_or(Error::InvalidCharacter {
                        position: index,
                        character: symbol,
                    })?;
            sub_plain.push(decrypted_symbol);
        }

        key.push(key_letter);
        shifts.push(shift);
        decrypted.push(sub_plain);
    }

    let plaintext = text.expand(&interleave(&decrypted));

    Ok(Recovery {
        key,
        shifts,
        plaintext,
    })
}

/// Builds and ranks the shift hypotheses for one subsequence.
///
/// The subsequence's top symbols are ordered by (frequency desc, symbol
/// asc); ranking of hypotheses is by match count, ties keeping that
/// frequency order.
pub fn rank_hypotheses(subsequence: &[char], profile: &LanguageProfile) -> Vec<ShiftHypothesis> {
    let alphabet = profile.alphabet();
    let n = alphabet.len();
    let frequent = profile.frequent_letters();

    let Some(plain_pos) = alphabet.index_of(profile.most_frequent_letter()) else {
        return Vec::new();
    };

    // Frequency histogram over the alphabet, then top-k by
    // (frequency desc, symbol asc) for determinism.
    let mut counts = vec![0usize; n];
    for &symbol in subsequence {
        if let Some(pos) = alphabet.index_of(symbol) {
            counts[pos] += 1;
        }
    }

    let mut top: Vec<(char, usize)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(pos, &count)| (alphabet.symbol_at(pos), count))
        .collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top.truncate(TOP_SYMBOLS);

    let mut hypotheses: Vec<ShiftHypothesis> = top
        .iter()
        .filter_map(|&(symbol, occurrences)| {
            let shift = (alphabet.index_of(symbol)? + n - plain_pos) % n;
            let matches = top
                .iter()
                .filter_map(|&(other, _)| alphabet.shift_backward(other, shift))
                .filter(|decrypted| frequent.contains(decrypted))
                .count();
            Some(ShiftHypothesis {
                symbol,
                occurrences,
                shift,
                matches,
                score: 0.0,
            })
        })
        .collect();

    hypotheses.sort_by(|a, b| b.matches.cmp(&a.matches));

    let total_matches: usize = hypotheses.iter().map(|h| h.matches).sum();
    if total_matches > 0 {
        for hypothesis in &mut hypotheses {
            hypothesis.score = 100.0 * hypothesis.matches as f64 / total_matches as f64;
        }
    }

    hypotheses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;
    use crate::language::{Language, LanguageProfile};
    use crate::text::normalize;

    const ENGLISH_SAMPLE: &str = "The index of coincidence was developed as a tool to attack \
        ciphers that use a repeating key. The idea rests on a simple observation: the letters \
        of a natural language are not used with equal frequency, and that unevenness survives \
        any substitution that maps one letter to another in a fixed way. When the period of \
        the key is known, the ciphertext can be separated into groups that were each encrypted \
        with a single letter of the key, and the frequencies inside every group then line up \
        with the frequencies of the language itself. Counting the most common letters in each \
        group and matching them against the most common letters of the language reveals the \
        shift that was applied, and the shifts taken together spell out the entire key.";

    #[test]
    fn test_recover_caesar_shift() {
        // Period 1 is a plain Caesar cipher.
        let profile = LanguageProfile::new(Language::English);
        let encrypted = cipher::encrypt(ENGLISH_SAMPLE, "C", Language::English).unwrap();
        let text = normalize(&encrypted, profile.alphabet());

        let recovery = recover_key(&text, 1, &profile, &mut AutoSelector).unwrap();
        assert_eq!(recovery.key, "C");
        assert_eq!(recovery.plaintext, ENGLISH_SAMPLE);
    }

    #[test]
    fn test_recover_period_three() {
        let profile = LanguageProfile::new(Language::English);
        let encrypted = cipher::encrypt(ENGLISH_SAMPLE, "KEY", Language::English).unwrap();
        let text = normalize(&encrypted, profile.alphabet());

        let recovery = recover_key(&text, 3, &profile, &mut AutoSelector).unwrap();
        assert_eq!(recovery.key, "KEY");
        assert_eq!(recovery.plaintext, ENGLISH_SAMPLE);
    }

    #[test]
    fn test_manual_selector_drives_recovery() {
        // A selector that always answers with the encryption of E under
        // shift 3 ('H') recovers the key "CCC" regardless of statistics.
        struct Fixed;
        impl CandidateSelector for Fixed {
            fn choose(&mut self, _i: usize, _h: &[ShiftHypothesis]) -> Result<char> {
                Ok('H')
            }
        }

        let profile = LanguageProfile::new(Language::English);
        let encrypted = cipher::encrypt(ENGLISH_SAMPLE, "CCC", Language::English).unwrap();
        let text = normalize(&encrypted, profile.alphabet());

        let recovery = recover_key(&text, 3, &profile, &mut Fixed).unwrap();
        assert_eq!(recovery.key, "CCC");
    }

    #[test]
    fn test_selector_symbol_outside_alphabet_fails() {
        struct Bad;
        impl CandidateSelector for Bad {
            fn choose(&mut self, _i: usize, _h: &[ShiftHypothesis]) -> Result<char> {
                Ok('Ñ')
            }
        }

        let profile = LanguageProfile::new(Language::English);
        let text = normalize(ENGLISH_SAMPLE, profile.alphabet());
        assert!(matches!(
            recover_key(&text, 2, &profile, &mut Bad),
            Err(Error::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_selector_abort_stops_recovery() {
        // A selector can run out of input (closed stdin in manual mode);
        // recovery must surface the abort instead of continuing.
        struct Aborting;
        impl CandidateSelector for Aborting {
            fn choose(&mut self, _i: usize, _h: &[ShiftHypothesis]) -> Result<char> {
                Err(Error::SelectionAborted)
            }
        }

        let profile = LanguageProfile::new(Language::English);
        let text = normalize(ENGLISH_SAMPLE, profile.alphabet());
        assert!(matches!(
            recover_key(&text, 3, &profile, &mut Aborting),
            Err(Error::SelectionAborted)
        ));
    }

    #[test]
    fn test_hypotheses_ranked_and_scored() {
        let profile = LanguageProfile::new(Language::English);
        let encrypted = cipher::encrypt(ENGLISH_SAMPLE, "Q", Language::English).unwrap();
        let text = normalize(&encrypted, profile.alphabet());

        let hypotheses = rank_hypotheses(text.symbols(), &profile);
        assert!(!hypotheses.is_empty());
        assert!(hypotheses.len() <= TOP_SYMBOLS);
        for pair in hypotheses.windows(2) {
            assert!(pair[0].matches >= pair[1].matches);
        }
        let total: f64 = hypotheses.iter().map(|h| h.score).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_period_rejected() {
        let profile = LanguageProfile::new(Language::English);
        let text = normalize("short", profile.alphabet());
        assert!(recover_key(&text, 0, &profile, &mut AutoSelector).is_err());
        assert!(recover_key(&text, 100, &profile, &mut AutoSelector).is_err());
    }
}
