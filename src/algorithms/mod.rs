//! Core approximate-matching algorithms
//!
//! [`bitap`] holds the bit-parallel k-mismatch matcher in both alphabet
//! variants; [`normalize`] holds the case/diacritic folding applied to both
//! sides of every comparison.

pub mod bitap;
pub mod normalize;

pub use bitap::{
    ascii_fuzzy_match, unicode_fuzzy_match, MatchError, ASCII_QUERY_CAPACITY,
    UNICODE_QUERY_CAPACITY,
};
pub use normalize::{fold, FoldOptions};
