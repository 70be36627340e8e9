//! Normalization of raw input into alphabet symbols.
//!
//! The analysis stages only ever see the uppercase alphabet symbols of the
//! input. Everything else (punctuation, whitespace, digits) is recorded in
//! a layout map so the decrypted text can be re-expanded into the exact
//! shape of the original, casing included.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::Alphabet;

/// One position of the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Slot {
    /// An alphabet symbol; `lowercase` remembers the original casing.
    Symbol {
        /// Whether the original character was lowercase.
        lowercase: bool,
    },
    /// A character outside the alphabet, reinserted verbatim on expansion.
    Other(char),
}

/// The alphabet symbols of a raw input plus the layout needed to rebuild it.
///
/// Invariant: every element of `symbols` belongs to the alphabet, and the
/// number of `Symbol` slots in the layout equals `symbols.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedText {
    symbols: Vec<char>,
    layout: Vec<Slot>,
}

impl NormalizedText {
    /// The uppercase alphabet symbols, in input order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of alphabet symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when the input contained no alphabet symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols as one uppercase string.
    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }

    /// Re-expands a decrypted symbol sequence into the original layout.
    ///
    /// Discarded characters come back at their original positions and the
    /// recorded casing is applied to each symbol. `replacement` must have
    /// the same length as `symbols()`; extra symbols are ignored and missing
    /// ones leave the tail of the layout unfilled.
    pub fn expand(&self, replacement: &[char]) -> String {
        let mut out = String::with_capacity(self.layout.len());
        let mut next = replacement.iter();

        for slot in &self.layout {
            match slot {
                Slot::Other(c) => out.push(*c),
                Slot::Symbol { lowercase } => {
                    if let Some(&sym) = next.next() {
                        if *lowercase {
                            out.extend(sym.to_lowercase());
                        } else {
                            out.push(sym);
                        }
                    }
                }
            }
        }

        out
    }
}

/// Normalizes raw text against an alphabet (lenient).
///
/// Alphabet letters are case-folded and kept; every other character is
/// recorded for reinsertion.
pub fn normalize(raw: &str, alphabet: Alphabet) -> NormalizedText {
    let mut symbols = Vec::new();
    let mut layout = Vec::with_capacity(raw.len());

    for c in raw.chars() {
        let folded = alphabet.fold(c);
        if alphabet.contains(folded) {
            symbols.push(folded);
            layout.push(Slot::Symbol {
                lowercase: folded != c,
            });
        } else {
            layout.push(Slot::Other(c));
        }
    }

    NormalizedText { symbols, layout }
}

/// Strict variant of [`normalize`].
///
/// Accepted classes are alphabet letters, punctuation, whitespace and
/// digits; any other alphabetic character (an accented vowel, a letter from
/// another script) fails with [`Error::InvalidCharacter`].
pub fn normalize_strict(raw: &str, alphabet: Alphabet) -> Result<NormalizedText> {
    for (position, c) in raw.chars().enumerate() {
        if c.is_alphabetic() && !alphabet.contains(alphabet.fold(c)) {
            return Err(Error::InvalidCharacter {
                position,
                character: c,
            });
        }
    }

    Ok(normalize(raw, alphabet))
}
