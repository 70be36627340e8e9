//! # Polycrack - break repeating-key ciphers without the key
//!
//! Polycrack recovers the key and plaintext of text encrypted with a
//! repeating-key (Vigenère-family) polyalphabetic substitution cipher,
//! using classical statistical cryptanalysis.
//!
//! ## Pipeline
//!
//! 1. **Normalize**: strip non-alphabet characters, record their layout
//!    for exact reinsertion later ([`text::normalize`]).
//! 2. **Repeated n-grams**: find substrings of length >= 3 that occur
//!    more than once ([`analysis::ngram`]).
//! 3. **Kasiski**: turn repeat distances into weighted period candidates
//!    ([`analysis::kasiski`]).
//! 4. **Index of coincidence**: score candidate periods against the
//!    target language's statistics ([`analysis::coincidence`]).
//! 5. **Fuse**: merge both signals into one ranked, percentage-scored
//!    candidate list ([`analysis::fuse`]).
//! 6. **Recover**: per subsequence, align letter frequencies to find the
//!    shift, spell out the key and decrypt ([`solver`]).
//!
//! ## Example
//!
//! ```rust
//! use polycrack::{cipher, Cracker, Language};
//! use polycrack::solver::AutoSelector;
//!
//! let plain = "The letters of a natural language are not used with equal \
//!     frequency, and that unevenness survives any substitution that maps \
//!     one letter to another in a fixed way. Counting the most common \
//!     letters of the ciphertext and matching them against the most common \
//!     letters of the language reveals the shift that was applied.";
//! let encrypted = cipher::encrypt(plain, "R", Language::English).unwrap();
//!
//! // A single-letter key is a Caesar cipher: pass the period explicitly.
//! let cracker = Cracker::new(&encrypted, Language::English);
//! let result = cracker.crack(Some(1), &mut AutoSelector).unwrap();
//!
//! assert_eq!(result.recovery.key, "R");
//! assert_eq!(result.recovery.plaintext, plain);
//! ```
//!
//! This is a classical, academic cryptanalysis exercise: no security
//! guarantees of any kind, and n-gram enumeration is quadratic in the
//! text length, so very large corpora will be slow.

pub mod analysis;
pub mod cipher;
pub mod cracker;
pub mod error;
pub mod language;
pub mod solver;
pub mod text;

// Re-export commonly used types at the crate root
pub use analysis::{KasiskiCandidate, PeriodCandidate, RepeatedNgram};
pub use cracker::{CrackResult, Cracker};
pub use error::{Error, Result};
pub use language::{Alphabet, Language, LanguageProfile};
pub use solver::{AutoSelector, CandidateSelector, Recovery, ShiftHypothesis};
pub use text::NormalizedText;
