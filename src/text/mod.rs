//! Text preparation for the cryptanalysis pipeline.
//!
//! This module provides:
//! - Normalization into alphabet symbols with an exact reinsertion layout
//! - Period-based subsequence splitting and round-robin interleaving

pub mod normalize;
pub mod subsequence;

pub use normalize::{normalize, normalize_strict, NormalizedText};
pub use subsequence::{interleave, split_subsequences};
