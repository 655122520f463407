//! Record-collection search orchestration
//!
//! [`fields`] defines the extractor registry, [`index`] the search index that
//! drives folding and matching per record and field, and [`threadsafe`] the
//! lock-guarded handle for concurrent use.

pub mod fields;
pub mod index;
pub mod threadsafe;

pub use fields::{FieldExtractor, FieldRegistry};
pub use index::{EncodingMode, MatchConfig, SearchError, SearchIndex, DEFAULT_QUERY_BYTE_LIMIT};
pub use threadsafe::SharedSearchIndex;
