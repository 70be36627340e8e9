//! Subsequence splitting for a candidate period.
//!
//! For period `d`, subsequence `i` holds the symbols at positions
//! congruent to `i` modulo `d`, in original order. Round-robin
//! interleaving of all `d` subsequences reconstructs the text exactly,
//! including when the length is not a multiple of `d` (earlier
//! subsequences are one symbol longer).

use crate::error::{Error, Result};

/// Splits symbols into `period` subsequences by position modulo the period.
pub fn split_subsequences(symbols: &[char], period: usize) -> Result<Vec<Vec<char>>> {
    if period == 0 || period > symbols.len() {
        return Err(Error::InvalidPeriod {
            period,
            length: symbols.len(),
        });
    }

    let mut subsequences = vec![Vec::with_capacity(symbols.len() / period + 1); period];
    for (pos, &symbol) in symbols.iter().enumerate() {
        subsequences[pos % period].push(symbol);
    }

    Ok(subsequences)
}

/// Round-robin interleaving: position `p` receives symbol `p / d` of
/// subsequence `p % d`. Inverse of [`split_subsequences`].
pub fn interleave(subsequences: &[Vec<char>]) -> Vec<char> {
    let total: usize = subsequences.iter().map(Vec::len).sum();
    let d = subsequences.len();
    let mut out = Vec::with_capacity(total);

    for p in 0..total {
        out.push(subsequences[p % d][p / d]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_split_example() {
        // defendtheeastwallcastle at period 2, from the classical worked example
        let symbols = chars("DEFENDTHEEASTWALLCASTLE");
        let subs = split_subsequences(&symbols, 2).unwrap();
        assert_eq!(subs[0].iter().collect::<String>(), "DFNTEATALATE");
        assert_eq!(subs[1].iter().collect::<String>(), "EEDHESWLCSL");
    }

    #[test]
    fn test_round_trip_all_periods_and_lengths() {
        for len in 1..40 {
            let symbols: Vec<char> = (0..len).map(|i| (b'A' + (i % 26) as u8) as char).collect();
            for period in 1..=len {
                let subs = split_subsequences(&symbols, period).unwrap();
                assert_eq!(interleave(&subs), symbols, "len={len} period={period}");
            }
        }
    }

    #[test]
    fn test_uneven_lengths_differ_by_at_most_one() {
        let symbols = chars("ABCDEFGHIJK");
        let subs = split_subsequences(&symbols, 3).unwrap();
        assert_eq!(subs[0].len(), 4);
        assert_eq!(subs[1].len(), 4);
        assert_eq!(subs[2].len(), 3);
    }

    #[test]
    fn test_invalid_periods() {
        let symbols = chars("ABC");
        assert!(split_subsequences(&symbols, 0).is_err());
        assert!(split_subsequences(&symbols, 4).is_err());
    }
}
