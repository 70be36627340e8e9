//! Typed errors for the cryptanalysis pipeline.
//!
//! Every stage surfaces one of these instead of silently producing a
//! meaningless result; the caller decides whether to prompt for a manual
//! period, abort with a diagnostic, or retry with different parameters.

use thiserror::Error;

/// Errors that can occur while analyzing or deciphering a text.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested language has no profile.
    #[error("Unsupported language: {0} (expected English or Spanish)")]
    InvalidLanguage(String),

    /// Strict normalization found a letter outside the alphabet,
    /// or a selector returned a symbol the alphabet does not contain.
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Character position in the input (0-based).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// No repeated n-gram of length >= 3 exists, or the best repeated
    /// structure is statistically insignificant. The caller must supply
    /// an explicit period.
    #[error("Kasiski's method failed: insufficient repeated n-grams")]
    KasiskiInsufficientData,

    /// Confidence fusion had nothing to rank (degenerate or too-short input).
    #[error("Period estimation failed: no candidates to rank")]
    PeriodGuessFailed,

    /// The chosen period cannot partition the normalized text.
    #[error("Invalid period {period} for a text of {length} symbols")]
    InvalidPeriod {
        /// The rejected period.
        period: usize,
        /// Length of the normalized text.
        length: usize,
    },

    /// Key selection ended before a symbol was chosen for a subsequence
    /// (for example, interactive input was closed mid-recovery).
    #[error("Key selection aborted: no symbol chosen")]
    SelectionAborted,

    /// An empty key was supplied to the cipher.
    #[error("Key must contain at least one alphabet letter")]
    EmptyKey,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
