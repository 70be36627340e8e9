//! Language profiles for statistical cryptanalysis.
//!
//! A profile bundles the alphabet (which fixes the modulus for all shift
//! arithmetic), the reference monographic index of coincidence, and the
//! language's most frequent letters. The reference constants are the
//! verified per-language values; every module reads them from here so the
//! whole pipeline agrees on a single figure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// English alphabet: the 26 Latin letters.
const ENGLISH_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Spanish alphabet: 27 letters, with Ñ between N and O.
const SPANISH_LETTERS: [char; 27] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'Ñ', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Monographic index of coincidence of English text.
const ENGLISH_IC: f64 = 0.066895;

/// Monographic index of coincidence of Spanish text.
const SPANISH_IC: f64 = 0.076613;

/// Most frequent English letters, descending.
const ENGLISH_FREQUENT: [char; 5] = ['E', 'T', 'A', 'O', 'I'];

/// Most frequent Spanish letters, descending.
const SPANISH_FREQUENT: [char; 5] = ['E', 'A', 'O', 'S', 'R'];

/// Supported target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English (26-letter alphabet).
    English,
    /// Spanish (27-letter alphabet, includes Ñ).
    Spanish,
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "spanish" | "es" => Ok(Language::Spanish),
            other => Err(Error::InvalidLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Spanish"),
        }
    }
}

/// A fixed ordered sequence of symbols. Defines the modulus for all
/// shift computations. Immutable for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    letters: &'static [char],
}

impl Alphabet {
    /// Number of symbols (the shift modulus).
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false: both supported alphabets are non-empty.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The symbols in order.
    pub fn letters(&self) -> &'static [char] {
        self.letters
    }

    /// Position of an (uppercase) symbol, or None if it is not in the alphabet.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.letters.iter().position(|&l| l == symbol)
    }

    /// Whether the symbol belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Symbol at the given position modulo the alphabet length.
    pub fn symbol_at(&self, index: usize) -> char {
        self.letters[index % self.letters.len()]
    }

    /// Upper-cases a character into alphabet form ('ñ' becomes 'Ñ').
    ///
    /// Characters whose uppercase form is not a single character, such as
    /// 'ß' ("SS"), come back unchanged so they never match the alphabet.
    pub fn fold(&self, c: char) -> char {
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(folded), None) => folded,
            _ => c,
        }
    }

    /// Shifts a symbol forward by `shift` positions.
    ///
    /// Returns None when the symbol is outside the alphabet.
    pub fn shift_forward(&self, symbol: char, shift: usize) -> Option<char> {
        let pos = self.index_of(symbol)?;
        Some(self.symbol_at(pos + shift))
    }

    /// Shifts a symbol backward by `shift` positions.
    ///
    /// Returns None when the symbol is outside the alphabet.
    pub fn shift_backward(&self, symbol: char, shift: usize) -> Option<char> {
        let pos = self.index_of(symbol)?;
        let n = self.letters.len();
        Some(self.symbol_at(pos + n - shift % n))
    }
}

/// Alphabet, reference IC and frequent-letter list for one language.
///
/// Selected once at initialization and shared by every pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct LanguageProfile {
    language: Language,
    alphabet: Alphabet,
    reference_ic: f64,
    frequent: &'static [char],
}

impl LanguageProfile {
    /// Builds the profile for a language.
    pub fn new(language: Language) -> Self {
        match language {
            Language::English => Self {
                language,
                alphabet: Alphabet {
                    letters: &ENGLISH_LETTERS,
                },
                reference_ic: ENGLISH_IC,
                frequent: &ENGLISH_FREQUENT,
            },
            Language::Spanish => Self {
                language,
                alphabet: Alphabet {
                    letters: &SPANISH_LETTERS,
                },
                reference_ic: SPANISH_IC,
                frequent: &SPANISH_FREQUENT,
            },
        }
    }

    /// The language this profile describes.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The language's alphabet.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Reference monographic index of coincidence.
    pub fn reference_ic(&self) -> f64 {
        self.reference_ic
    }

    /// The language's most frequent letters, descending.
    pub fn frequent_letters(&self) -> &'static [char] {
        self.frequent
    }

    /// The single most frequent letter of the language.
    pub fn most_frequent_letter(&self) -> char {
        self.frequent[0]
    }
}
