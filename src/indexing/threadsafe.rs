//! Thread-safe wrapper for [`SearchIndex`]
//!
//! Searches take a shared read lock and configuration or field-registry
//! mutation takes an exclusive write lock, so an in-flight search never
//! observes a torn fold-options/encoding-mode pair or a half-edited field
//! list. The record collection itself stays borrowed and immutable.

use parking_lot::RwLock;
use regex::Regex;
use std::sync::Arc;

use crate::algorithms::bitap::MatchError;
use crate::algorithms::normalize::FoldOptions;
use crate::indexing::fields::FieldExtractor;
use crate::indexing::index::{EncodingMode, MatchConfig, SearchError, SearchIndex};

/// Cloneable, thread-safe handle to a [`SearchIndex`].
pub struct SharedSearchIndex<'a, T> {
    inner: Arc<RwLock<SearchIndex<'a, T>>>,
}

impl<'a, T> Clone for SharedSearchIndex<'a, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<'a, T> SharedSearchIndex<'a, T> {
    pub fn new(index: SearchIndex<'a, T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Search the default field list under a read lock.
    pub fn search(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().search(query)
    }

    /// Search an ad hoc field subset under a read lock.
    pub fn search_fields(
        &self,
        query: &str,
        fields: &[FieldExtractor<T>],
    ) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().search_fields(query, fields)
    }

    /// Deduplicated search under a read lock.
    pub fn search_unique(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().search_unique(query)
    }

    /// Exact-pattern sibling filter under a read lock.
    pub fn search_matching(&self, pattern: &Regex) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().search_matching(pattern)
    }

    /// Exact-pattern filter over an ad hoc field subset under a read lock.
    pub fn search_matching_fields(
        &self,
        pattern: &Regex,
        fields: &[FieldExtractor<T>],
    ) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().search_matching_fields(pattern, fields)
    }

    /// Direct matcher access under a read lock.
    pub fn fuzzy_match(&self, query: &str, target: &str) -> Result<bool, MatchError> {
        self.inner.read().fuzzy_match(query, target)
    }

    pub fn config(&self) -> MatchConfig {
        self.inner.read().config()
    }

    pub fn set_fold_options(&self, fold: FoldOptions) {
        self.inner.write().set_fold_options(fold);
    }

    pub fn set_encoding_mode(&self, encoding: EncodingMode) {
        self.inner.write().set_encoding_mode(encoding);
    }

    pub fn set_max_mismatches(&self, max_mismatches: usize) {
        self.inner.write().set_max_mismatches(max_mismatches);
    }

    /// Append a default-field extractor under a write lock.
    pub fn register_field(&self, field: FieldExtractor<T>) {
        self.inner.write().fields_mut().register(field);
    }

    /// Remove a default-field extractor by name under a write lock.
    pub fn remove_field(&self, name: &str) -> bool {
        self.inner.write().fields_mut().remove(name)
    }
}

impl<'a, T: Sync> SharedSearchIndex<'a, T> {
    /// Rayon-partitioned search under a read lock.
    pub fn par_search(&self, query: &str) -> Result<Vec<&'a T>, SearchError> {
        self.inner.read().par_search(query)
    }
}
