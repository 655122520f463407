//! Bit-parallel k-mismatch substring matching (Shift-Or / Bitap)
//!
//! Generalizes exact Shift-Or matching to tolerate up to `max_mismatches`
//! character substitutions between the query and a window of the target.
//! Only substitutions count: a window is always exactly `query.chars().count()`
//! symbols long, so insertions and deletions are never absorbed.
//!
//! Two variants share the same state-update skeleton:
//! - [`ascii_fuzzy_match`]: dense 128-entry mask table, 64-bit state words.
//!   Symbols outside 7-bit ASCII are a checked [`MatchError::UnsupportedSymbol`].
//! - [`unicode_fuzzy_match`]: sparse `char -> mask` table, native-word state.
//!   Any code point is representable.
//!
//! Complexity: O(|query| + |target| * k), independent of alphabet size.

use ahash::AHashMap;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

/// Size of the dense mask table for the bounded-alphabet variant.
const ASCII_ALPHABET: usize = 128;

/// Maximum query length (in symbols) for the bounded-alphabet variant.
///
/// The match test probes bit `|query|` of a 64-bit state word, so the query
/// may use at most 63 positions.
pub const ASCII_QUERY_CAPACITY: usize = u64::BITS as usize - 1;

/// Maximum query length (in code points) for the extended variant.
pub const UNICODE_QUERY_CAPACITY: usize = usize::BITS as usize - 1;

/// Errors raised by the matcher itself.
///
/// Both are local, recoverable conditions; neither variant ever panics on
/// caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Bounded-alphabet mode saw a query or target symbol outside 7-bit ASCII.
    #[error("symbol {0:?} is outside the bounded alphabet")]
    UnsupportedSymbol(char),

    /// The query uses more symbol positions than the state word can hold.
    #[error("query length {len} exceeds the matcher capacity of {capacity} symbols")]
    InvalidConfiguration { len: usize, capacity: usize },
}

/// Look up a symbol's slot in the dense mask table.
#[inline]
fn ascii_slot(symbol: char) -> Result<usize, MatchError> {
    let slot = symbol as usize;
    if slot < ASCII_ALPHABET {
        Ok(slot)
    } else {
        Err(MatchError::UnsupportedSymbol(symbol))
    }
}

/// Bounded-alphabet k-mismatch match.
///
/// Returns true iff some window of `target` of `|query|` characters differs
/// from `query` in at most `max_mismatches` positions. An empty query is
/// defined to match any target, including the empty one.
///
/// Fails with [`MatchError::UnsupportedSymbol`] on any non-ASCII symbol in
/// either string, and [`MatchError::InvalidConfiguration`] if the query is
/// longer than [`ASCII_QUERY_CAPACITY`].
pub fn ascii_fuzzy_match(
    query: &str,
    target: &str,
    max_mismatches: usize,
) -> Result<bool, MatchError> {
    let query_len = query.chars().count();
    if query_len == 0 {
        return Ok(true);
    }
    if query_len > ASCII_QUERY_CAPACITY {
        return Err(MatchError::InvalidConfiguration {
            len: query_len,
            capacity: ASCII_QUERY_CAPACITY,
        });
    }

    // A window has only query_len positions, so any larger budget behaves
    // the same and would overflow the state allocation below.
    let max_mismatches = max_mismatches.min(query_len);

    // Inverted mask convention: bit i is *cleared* where the symbol occurs at
    // query position i, all bits set for symbols absent from the query.
    let mut masks = [!0u64; ASCII_ALPHABET];
    for (i, symbol) in query.chars().enumerate() {
        masks[ascii_slot(symbol)?] &= !(1u64 << i);
    }

    // One state word per error level; !1 encodes "nothing consumed yet".
    let mut state: SmallVec<[u64; 4]> = smallvec![!1u64; max_mismatches + 1];
    let hit = 1u64 << query_len;

    for symbol in target.chars() {
        let mask = masks[ascii_slot(symbol)?];

        let mut prev = state[0];
        state[0] = (state[0] | mask) << 1;
        for level in 1..=max_mismatches {
            // Level e consumes the previous iteration's level e-1 word, so it
            // forgives exactly one more substitution than the level below.
            let current = state[level];
            state[level] = (prev & (current | mask)) << 1;
            prev = current;
        }

        if state[max_mismatches] & hit == 0 {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Extended (full code point) k-mismatch match.
///
/// Same contract as [`ascii_fuzzy_match`] but keyed by arbitrary code points,
/// so there is no unsupported-symbol failure mode. State words are native
/// width; queries longer than [`UNICODE_QUERY_CAPACITY`] code points are
/// rejected with [`MatchError::InvalidConfiguration`].
pub fn unicode_fuzzy_match(
    query: &str,
    target: &str,
    max_mismatches: usize,
) -> Result<bool, MatchError> {
    let query_len = query.chars().count();
    if query_len == 0 {
        return Ok(true);
    }
    if query_len > UNICODE_QUERY_CAPACITY {
        return Err(MatchError::InvalidConfiguration {
            len: query_len,
            capacity: UNICODE_QUERY_CAPACITY,
        });
    }

    let max_mismatches = max_mismatches.min(query_len);

    let mut masks: AHashMap<char, usize> = AHashMap::with_capacity(query_len);
    for (i, symbol) in query.chars().enumerate() {
        *masks.entry(symbol).or_insert(!0usize) &= !(1usize << i);
    }

    let mut state: SmallVec<[usize; 4]> = smallvec![!1usize; max_mismatches + 1];
    let hit = 1usize << query_len;

    for symbol in target.chars() {
        // Symbols absent from the query match nowhere: all bits set.
        let mask = masks.get(&symbol).copied().unwrap_or(!0);

        let mut prev = state[0];
        state[0] = (state[0] | mask) << 1;
        for level in 1..=max_mismatches {
            let current = state[level];
            state[level] = (prev & (current | mask)) << 1;
            prev = current;
        }

        if state[max_mismatches] & hit == 0 {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_match_all_budgets() {
        for k in 0..4 {
            assert_eq!(ascii_fuzzy_match("street", "street", k), Ok(true));
            assert_eq!(unicode_fuzzy_match("caf\u{e9}", "caf\u{e9}", k), Ok(true));
        }
    }

    #[test]
    fn zero_budget_is_exact_containment() {
        let pairs = [
            ("street", "123 elm street"),
            ("street", "123 elm streat"),
            ("bob", "bob"),
            ("bob", "alice"),
            ("elm", "123 elm street"),
            ("xyz", "123 elm street"),
        ];
        for (query, target) in pairs {
            assert_eq!(
                ascii_fuzzy_match(query, target, 0),
                Ok(target.contains(query)),
                "query={query:?} target={target:?}"
            );
            assert_eq!(
                unicode_fuzzy_match(query, target, 0),
                Ok(target.contains(query))
            );
        }
    }

    #[test]
    fn budget_monotonicity() {
        // "cut" is one substitution away from "cat".
        assert_eq!(ascii_fuzzy_match("cat", "xx cut xx", 0), Ok(false));
        assert_eq!(ascii_fuzzy_match("cat", "xx cut xx", 1), Ok(true));
        assert_eq!(ascii_fuzzy_match("cat", "xx cut xx", 2), Ok(true));
        assert_eq!(ascii_fuzzy_match("cat", "xx cut xx", 3), Ok(true));
    }

    #[test]
    fn asymmetric_contract() {
        // The window is sized to the query, so swapping the arguments flips
        // the answer when only one direction can cover a full window.
        assert_eq!(ascii_fuzzy_match("street", "123 elm street", 2), Ok(true));
        assert_eq!(ascii_fuzzy_match("123 elm street", "street", 2), Ok(false));
    }

    #[test]
    fn no_partial_windows_past_target_end() {
        // A window is only tested once its full length is available, so a
        // query longer than the target never matches, whatever the budget.
        assert_eq!(ascii_fuzzy_match("abc", "ab", 2), Ok(false));
        assert_eq!(ascii_fuzzy_match("abc", "ab", 10), Ok(false));
        assert_eq!(unicode_fuzzy_match("abcd", "abc", 3), Ok(false));
    }

    #[test]
    fn empty_query_always_matches() {
        for k in 0..3 {
            assert_eq!(ascii_fuzzy_match("", "anything", k), Ok(true));
            assert_eq!(ascii_fuzzy_match("", "", k), Ok(true));
            assert_eq!(unicode_fuzzy_match("", "anything", k), Ok(true));
            assert_eq!(unicode_fuzzy_match("", "", k), Ok(true));
        }
    }

    #[test]
    fn empty_target_never_matches_nonempty_query() {
        assert_eq!(ascii_fuzzy_match("a", "", 5), Ok(false));
        assert_eq!(unicode_fuzzy_match("a", "", 5), Ok(false));
    }

    #[test]
    fn cafe_scenario() {
        let target = "according to this map, the nearest caf\u{e9} is 1.2 miles away.";
        assert_eq!(unicode_fuzzy_match("caf\u{e9}", target, 2), Ok(true));
        // Six characters of "coffee" never come within two substitutions of
        // any six-character window of the target.
        assert_eq!(unicode_fuzzy_match("coffee", target, 2), Ok(false));
    }

    #[test]
    fn substitutions_only_no_shift_absorption() {
        // "xabdefx" is edit distance 1 from containing "abcdef", but the
        // deleted character misaligns every following position; the best
        // Hamming window ("xabdef") still carries three substitutions.
        assert_eq!(ascii_fuzzy_match("abcdef", "xabdefx", 2), Ok(false));
        assert_eq!(ascii_fuzzy_match("abcdef", "xabdefx", 3), Ok(true));
    }

    #[test]
    fn ascii_rejects_non_ascii_query_symbol() {
        assert_eq!(
            ascii_fuzzy_match("caf\u{e9}", "cafe", 2),
            Err(MatchError::UnsupportedSymbol('\u{e9}'))
        );
    }

    #[test]
    fn ascii_rejects_non_ascii_target_symbol() {
        assert_eq!(
            ascii_fuzzy_match("cafe", "caf\u{e9}", 2),
            Err(MatchError::UnsupportedSymbol('\u{e9}'))
        );
    }

    #[test]
    fn unicode_has_no_unsupported_symbols() {
        assert_eq!(unicode_fuzzy_match("\u{1f441}", "x\u{1f441}x", 0), Ok(true));
        assert_eq!(unicode_fuzzy_match("\u{1f441}", "xyz", 2), Ok(false));
    }

    #[test]
    fn overlong_query_is_a_checked_error() {
        let query = "a".repeat(ASCII_QUERY_CAPACITY + 1);
        assert_eq!(
            ascii_fuzzy_match(&query, "aaaa", 2),
            Err(MatchError::InvalidConfiguration {
                len: ASCII_QUERY_CAPACITY + 1,
                capacity: ASCII_QUERY_CAPACITY,
            })
        );

        let query = "a".repeat(UNICODE_QUERY_CAPACITY + 1);
        assert_eq!(
            unicode_fuzzy_match(&query, "aaaa", 2),
            Err(MatchError::InvalidConfiguration {
                len: UNICODE_QUERY_CAPACITY + 1,
                capacity: UNICODE_QUERY_CAPACITY,
            })
        );
    }

    #[test]
    fn budgets_beyond_query_length_saturate() {
        // Budgets past |query| cannot forgive more than a window holds; even
        // usize::MAX must not overflow the state allocation.
        assert_eq!(ascii_fuzzy_match("ab", "zz", usize::MAX), Ok(true));
        assert_eq!(unicode_fuzzy_match("ab", "zz", usize::MAX), Ok(true));

        // A full window is still required,
        assert_eq!(ascii_fuzzy_match("abc", "zz", usize::MAX), Ok(false));
        // and bounded-alphabet symbol checking still applies.
        assert_eq!(
            ascii_fuzzy_match("ab", "z\u{e9}", usize::MAX),
            Err(MatchError::UnsupportedSymbol('\u{e9}'))
        );
    }

    #[test]
    fn query_at_capacity_still_matches() {
        let query = "a".repeat(ASCII_QUERY_CAPACITY);
        let target = format!("xx{query}xx");
        assert_eq!(ascii_fuzzy_match(&query, &target, 0), Ok(true));
    }

    #[test]
    fn variants_agree_on_ascii_input() {
        let cases = [
            ("street", "432 fake street", 2),
            ("bob", "123 elm street", 2),
            ("cat", "xx cut xx", 1),
            ("hello", "help me", 2),
        ];
        for (query, target, k) in cases {
            assert_eq!(
                ascii_fuzzy_match(query, target, k),
                unicode_fuzzy_match(query, target, k),
                "query={query:?} target={target:?} k={k}"
            );
        }
    }
}
