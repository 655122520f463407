//! fuzzfield - approximate substring search over in-memory records
//!
//! Given a query and one or more string-valued fields per record, reports
//! which records contain, in at least one field, a substring within a
//! configured number of character *substitutions* of the query. Matching is
//! Hamming-distance-bounded over sliding windows (Shift-Or/Bitap generalized
//! to k mismatches), not edit distance: insertions and deletions are never
//! absorbed, nothing is ranked, and no index structure is persisted: every
//! search re-scans the borrowed record slice.
//!
//! # Example
//!
//! ```
//! use fuzzfield::{FieldExtractor, FieldRegistry, MatchConfig, SearchIndex};
//!
//! struct Person {
//!     name: String,
//!     address: String,
//! }
//!
//! let people = vec![
//!     Person { name: "Alice".into(), address: "123 Elm Street".into() },
//!     Person { name: "Bob".into(), address: "432 Fake Street".into() },
//! ];
//!
//! let mut fields = FieldRegistry::new();
//! fields
//!     .register(FieldExtractor::new("name", |p: &Person| p.name.clone()))
//!     .register(FieldExtractor::new("address", |p: &Person| p.address.clone()));
//!
//! let index = SearchIndex::with_fields(&people, MatchConfig::default(), fields);
//!
//! // "Streat" is one substitution from "Street"; both addresses match.
//! assert_eq!(index.search("Streat").unwrap().len(), 2);
//! assert_eq!(index.search("Bob").unwrap().len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`algorithms`]: the bit-parallel matcher ([`ascii_fuzzy_match`],
//!   [`unicode_fuzzy_match`]) and case/diacritic folding ([`fold`]).
//! - [`indexing`]: [`SearchIndex`] orchestration, the [`FieldRegistry`] of
//!   record projections, and the [`SharedSearchIndex`] concurrency wrapper.

pub mod algorithms;
pub mod indexing;

pub use algorithms::bitap::{
    ascii_fuzzy_match, unicode_fuzzy_match, MatchError, ASCII_QUERY_CAPACITY,
    UNICODE_QUERY_CAPACITY,
};
pub use algorithms::normalize::{fold, FoldOptions};
pub use indexing::fields::{FieldExtractor, FieldRegistry};
pub use indexing::index::{
    EncodingMode, MatchConfig, SearchError, SearchIndex, DEFAULT_QUERY_BYTE_LIMIT,
};
pub use indexing::threadsafe::SharedSearchIndex;
