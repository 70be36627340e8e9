//! Vigenère encryption and decryption with a known key.
//!
//! The offset convention matches the recovery convention of the solver:
//! a key letter `k` shifts by `index(k) + 1`, so `Enc(x) =
//! Alphabet[(index(x) + index(k) + 1) mod N]` and the key recovered from
//! a ciphertext produced here round-trips exactly.

use crate::error::{Error, Result};
use crate::language::{Alphabet, Language, LanguageProfile};
use crate::text::normalize;

/// Encrypts a text with a repeating key, preserving layout and casing.
pub fn encrypt(raw: &str, key: &str, language: Language) -> Result<String> {
    transform(raw, key, language, Direction::Encrypt)
}

/// Decrypts a text with a repeating key, preserving layout and casing.
pub fn decrypt(raw: &str, key: &str, language: Language) -> Result<String> {
    transform(raw, key, language, Direction::Decrypt)
}

enum Direction {
    Encrypt,
    Decrypt,
}

fn transform(raw: &str, key: &str, language: Language, direction: Direction) -> Result<String> {
    let profile = LanguageProfile::new(language);
    let alphabet = profile.alphabet();
    let shifts = key_shifts(key, alphabet)?;

    let text = normalize(raw, alphabet);
    let mut out = Vec::with_capacity(text.len());

    for (pos, &symbol) in text.symbols().iter().enumerate() {
        let shift = shifts[pos % shifts.len()];
        let moved = match direction {
            Direction::Encrypt => alphabet.shift_forward(symbol, shift),
            Direction::Decrypt => alphabet.shift_backward(symbol, shift),
        };
        // Normalization guarantees the symbol is in the alphabet.
        out.push(moved.ok_or(Error::InvalidCharacter {
            position: pos,
            character: symbol,
        })?);
    }

    Ok(text.expand(&out))
}

/// Shift sequence of a key: `index(k) + 1` per key letter.
fn key_shifts(key: &str, alphabet: Alphabet) -> Result<Vec<usize>> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }

    let mut shifts = Vec::with_capacity(key.chars().count());
    for (position, c) in key.chars().enumerate() {
        let folded = alphabet.fold(c);
        let index = alphabet
            .index_of(folded)
            .ok_or(Error::InvalidCharacter {
                position,
                character: c,
            })?;
        shifts.push(index + 1);
    }

    Ok(shifts)
}
