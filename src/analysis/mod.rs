//! Statistical period analysis.
//!
//! The stages run in dependency order: repeated n-gram detection
//! ([`ngram`]), Kasiski period estimation ([`kasiski`]), index-of-coincidence
//! scoring ([`coincidence`]) and confidence fusion ([`fuse`]).

pub mod coincidence;
pub mod fuse;
pub mod kasiski;
pub mod ngram;

pub use coincidence::{
    average_ic, closest_to, expected_ic, index_of_coincidence, model_probabilities,
    rank_by_language_ic,
};
pub use fuse::{guess_periods, PeriodCandidate};
pub use kasiski::{estimate_periods, KasiskiCandidate};
pub use ngram::{find_repeats, RepeatedNgram};
