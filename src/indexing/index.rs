//! Multi-field fuzzy search over an in-memory record collection
//!
//! [`SearchIndex`] borrows a read-only record slice for its whole lifetime
//! and drives folding and the bit-parallel matcher per record and field.
//! Results are concatenated field-major, then record order, with duplicates
//! across fields preserved; [`SearchIndex::search_unique`] is the
//! deduplicating convenience on top.

use ahash::AHashSet;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithms::bitap::{
    ascii_fuzzy_match, unicode_fuzzy_match, MatchError, ASCII_QUERY_CAPACITY,
    UNICODE_QUERY_CAPACITY,
};
use crate::algorithms::normalize::{fold, FoldOptions};
use crate::indexing::fields::{FieldExtractor, FieldRegistry};

/// Default maximum query size in bytes.
pub const DEFAULT_QUERY_BYTE_LIMIT: usize = 64;

/// Which matcher variant the index drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingMode {
    /// Bounded alphabet: dense 7-bit ASCII table, 64-bit state words.
    /// Queries and targets outside that set are unsupported.
    Ascii,
    /// Extended: sparse table keyed by code point, native-width state words.
    #[default]
    Unicode,
}

impl EncodingMode {
    /// Maximum query length in matcher symbols for this mode.
    pub fn query_capacity(self) -> usize {
        match self {
            EncodingMode::Ascii => ASCII_QUERY_CAPACITY,
            EncodingMode::Unicode => UNICODE_QUERY_CAPACITY,
        }
    }
}

/// Immutable-per-search matching configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Folding applied to both query and field text before matching.
    pub fold: FoldOptions,
    /// Matcher variant selection.
    pub encoding: EncodingMode,
    /// Maximum tolerated character substitutions; 0 is exact matching.
    pub max_mismatches: usize,
    /// Maximum accepted query size in bytes (pre-folding).
    pub query_byte_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            fold: FoldOptions::default(),
            encoding: EncodingMode::default(),
            max_mismatches: 2,
            query_byte_limit: DEFAULT_QUERY_BYTE_LIMIT,
        }
    }
}

/// Errors surfaced by a search call. All are recoverable conditions for the
/// caller; none abort the scan partway through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query's byte length exceeds the configured limit.
    #[error("query is {len} bytes, exceeding the {limit}-byte limit")]
    QueryTooLong { len: usize, limit: usize },

    /// A search was invoked with no field extractors available, neither an
    /// override nor a registered default list.
    #[error("no field extractors registered and none supplied")]
    EmptyFieldList,

    /// Query-side matcher rejection (unsupported symbol or over-capacity
    /// query for the active encoding mode).
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Fuzzy search index over a borrowed record collection.
///
/// The record slice is read-only for the index's lifetime; there is no
/// insertion or removal. Configuration and the default-field registry are
/// plain mutable state here; wrap the index in
/// [`SharedSearchIndex`](crate::indexing::threadsafe::SharedSearchIndex) to
/// mutate them safely while other threads search.
pub struct SearchIndex<'a, T> {
    records: &'a [T],
    config: MatchConfig,
    fields: FieldRegistry<T>,
}

impl<'a, T> SearchIndex<'a, T> {
    /// Create an index with an empty default-field list.
    pub fn new(records: &'a [T], config: MatchConfig) -> Self {
        Self {
            records,
            config,
            fields: FieldRegistry::new(),
        }
    }

    /// Create an index with a pre-built default-field registry.
    pub fn with_fields(records: &'a [T], config: MatchConfig, fields: FieldRegistry<T>) -> Self {
        Self {
            records,
            config,
            fields,
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    pub fn fields(&self) -> &FieldRegistry<T> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldRegistry<T> {
        &mut self.fields
    }

    pub fn set_fold_options(&mut self, fold: FoldOptions) {
        self.config.fold = fold;
    }

    pub fn set_encoding_mode(&mut self, encoding: EncodingMode) {
        self.config.encoding = encoding;
    }

    pub fn set_max_mismatches(&mut self, max_mismatches: usize) {
        self.config.max_mismatches = max_mismatches;
    }

    /// Search the default field list.
    ///
    /// Results are concatenated field-major then record order; a record
    /// matching under several fields appears once per matching field.
    pub fn search(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        if self.fields.is_empty() {
            return Err(SearchError::EmptyFieldList);
        }
        let folded = self.prepare_query(query)?;
        let mut results = Vec::new();
        for field in self.fields.iter() {
            results.extend(self.scan_field(&folded, field));
        }
        Ok(results)
    }

    /// Search an ad hoc field subset instead of the registered defaults.
    pub fn search_fields(
        &self,
        query: &str,
        fields: &[FieldExtractor<T>],
    ) -> Result<Vec<&'a T>, SearchError> {
        if fields.is_empty() {
            return Err(SearchError::EmptyFieldList);
        }
        let folded = self.prepare_query(query)?;
        let mut results = Vec::new();
        for field in fields {
            results.extend(self.scan_field(&folded, field));
        }
        Ok(results)
    }

    /// Like [`search`](Self::search) but deduplicated by record identity,
    /// keeping each record's first occurrence.
    pub fn search_unique(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        let mut seen: AHashSet<*const T> = AHashSet::new();
        let mut results = self.search(query)?;
        results.retain(|record| seen.insert(*record as *const T));
        Ok(results)
    }

    /// Exact-pattern sibling filter, delegated entirely to the host regex
    /// engine. Field text is matched raw, without folding.
    pub fn search_matching(&self, pattern: &Regex) -> Result<Vec<&'a T>, SearchError> {
        if self.fields.is_empty() {
            return Err(SearchError::EmptyFieldList);
        }
        let mut results = Vec::new();
        for field in self.fields.iter() {
            results.extend(self.scan_field_matching(pattern, field));
        }
        Ok(results)
    }

    /// [`search_matching`](Self::search_matching) over an ad hoc field subset
    /// instead of the registered defaults.
    pub fn search_matching_fields(
        &self,
        pattern: &Regex,
        fields: &[FieldExtractor<T>],
    ) -> Result<Vec<&'a T>, SearchError> {
        if fields.is_empty() {
            return Err(SearchError::EmptyFieldList);
        }
        let mut results = Vec::new();
        for field in fields {
            results.extend(self.scan_field_matching(pattern, field));
        }
        Ok(results)
    }

    /// Direct access to the underlying matcher: folds both strings with the
    /// configured options and tests under the configured mode and budget,
    /// bypassing field extraction and the query byte limit.
    pub fn fuzzy_match(&self, query: &str, target: &str) -> Result<bool, MatchError> {
        let query = fold(query, self.config.fold);
        let target = fold(target, self.config.fold);
        self.match_folded(&query, &target)
    }

    /// Validate and fold the query once per search call.
    fn prepare_query(&self, query: &str) -> Result<String, SearchError> {
        let limit = self.config.query_byte_limit;
        if query.len() > limit {
            return Err(SearchError::QueryTooLong {
                len: query.len(),
                limit,
            });
        }

        let folded = fold(query, self.config.fold).into_owned();

        // Mode checks run on the folded form: folding may map symbols like
        // 'é' into the bounded alphabet.
        if self.config.encoding == EncodingMode::Ascii {
            if let Some(symbol) = folded.chars().find(|c| !c.is_ascii()) {
                return Err(MatchError::UnsupportedSymbol(symbol).into());
            }
        }
        let len = folded.chars().count();
        let capacity = self.config.encoding.query_capacity();
        if len > capacity {
            return Err(MatchError::InvalidConfiguration { len, capacity }.into());
        }

        Ok(folded)
    }

    fn scan_field_matching(&self, pattern: &Regex, field: &FieldExtractor<T>) -> Vec<&'a T> {
        self.records
            .iter()
            .filter(|record| {
                field
                    .extract(record)
                    .is_some_and(|text| pattern.is_match(&text))
            })
            .collect()
    }

    fn scan_field(&self, query: &str, field: &FieldExtractor<T>) -> Vec<&'a T> {
        self.records
            .iter()
            .filter(|record| self.record_matches(query, field, record))
            .collect()
    }

    fn record_matches(&self, query: &str, field: &FieldExtractor<T>, record: &T) -> bool {
        let Some(raw) = field.extract(record) else {
            return false;
        };
        let target = fold(&raw, self.config.fold);
        // The query was validated before the scan, so a matcher error here is
        // target-side (bounded mode, out-of-alphabet field text) and
        // disqualifies only this record.
        self.match_folded(query, &target).unwrap_or(false)
    }

    fn match_folded(&self, query: &str, target: &str) -> Result<bool, MatchError> {
        match self.config.encoding {
            EncodingMode::Ascii => ascii_fuzzy_match(query, target, self.config.max_mismatches),
            EncodingMode::Unicode => unicode_fuzzy_match(query, target, self.config.max_mismatches),
        }
    }
}

impl<'a, T: Sync> SearchIndex<'a, T> {
    /// [`search`](Self::search) with the record scan partitioned across the
    /// rayon pool. The ordered collect per field preserves the field-major,
    /// record-order result contract.
    pub fn par_search(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        if self.fields.is_empty() {
            return Err(SearchError::EmptyFieldList);
        }
        let folded = self.prepare_query(query)?;
        let mut results = Vec::new();
        for field in self.fields.iter() {
            results.par_extend(
                self.records
                    .par_iter()
                    .filter(|record| self.record_matches(&folded, field, record)),
            );
        }
        Ok(results)
    }
}
