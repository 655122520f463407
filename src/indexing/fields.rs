//! Field extractors for record-to-string projection
//!
//! A [`FieldExtractor`] is a named, pure projection from a record to one of
//! its searchable string attributes. A [`FieldRegistry`] holds the ordered
//! default-field list of a search index; order determines result ordering,
//! not matching correctness.

use std::fmt;
use std::sync::Arc;

type ExtractFn<T> = dyn Fn(&T) -> Option<String> + Send + Sync;

/// A named projection from a record to a searchable string.
///
/// Extractors are pure and side-effect-free. An extractor may return `None`
/// for records where the field is absent or malformed; such records simply
/// contribute no match for that field.
pub struct FieldExtractor<T> {
    name: String,
    extract: Arc<ExtractFn<T>>,
}

impl<T> FieldExtractor<T> {
    /// Create an extractor from an infallible projection.
    pub fn new<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Arc::new(move |record| Some(extract(record))),
        }
    }

    /// Create an extractor whose field may be missing on some records.
    pub fn optional<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Arc::new(extract),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project the field out of a record.
    pub fn extract(&self, record: &T) -> Option<String> {
        (self.extract)(record)
    }
}

impl<T> Clone for FieldExtractor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<T> fmt::Debug for FieldExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered list of default field extractors.
///
/// Starts empty: the default field list must be configured explicitly before
/// an unscoped search, otherwise the search reports
/// [`SearchError::EmptyFieldList`](crate::indexing::index::SearchError::EmptyFieldList).
///
/// Mutating the registry is not safe against concurrent searches over the
/// same index; use [`SharedSearchIndex`](crate::indexing::threadsafe::SharedSearchIndex)
/// when that matters.
pub struct FieldRegistry<T> {
    fields: Vec<FieldExtractor<T>>,
}

impl<T> Clone for FieldRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

impl<T> Default for FieldRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldRegistry<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append an extractor to the end of the default-field list.
    pub fn register(&mut self, field: FieldExtractor<T>) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Remove the extractor with the given name. Returns true if one was
    /// removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.name() != name);
        self.fields.len() != before
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn get(&self, name: &str) -> Option<&FieldExtractor<T>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Extractors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldExtractor<T>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: String,
        nickname: Option<String>,
    }

    fn person(name: &str, nickname: Option<&str>) -> Person {
        Person {
            name: name.to_string(),
            nickname: nickname.map(str::to_string),
        }
    }

    #[test]
    fn extract_infallible() {
        let field = FieldExtractor::new("name", |p: &Person| p.name.clone());
        assert_eq!(field.name(), "name");
        assert_eq!(
            field.extract(&person("Alice", None)),
            Some("Alice".to_string())
        );
    }

    #[test]
    fn extract_optional() {
        let field = FieldExtractor::optional("nickname", |p: &Person| p.nickname.clone());
        assert_eq!(field.extract(&person("Alice", None)), None);
        assert_eq!(
            field.extract(&person("Robert", Some("Bob"))),
            Some("Bob".to_string())
        );
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry: FieldRegistry<Person> = FieldRegistry::new();
        registry
            .register(FieldExtractor::new("name", |p: &Person| p.name.clone()))
            .register(FieldExtractor::optional("nickname", |p: &Person| {
                p.nickname.clone()
            }));

        let names: Vec<&str> = registry.iter().map(FieldExtractor::name).collect();
        assert_eq!(names, ["name", "nickname"]);
    }

    #[test]
    fn registry_remove_by_name() {
        let mut registry: FieldRegistry<Person> = FieldRegistry::new();
        registry.register(FieldExtractor::new("name", |p: &Person| p.name.clone()));

        assert!(registry.remove("name"));
        assert!(!registry.remove("name"));
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_get_by_name() {
        let mut registry: FieldRegistry<Person> = FieldRegistry::new();
        registry.register(FieldExtractor::new("name", |p: &Person| p.name.clone()));

        assert!(registry.get("name").is_some());
        assert!(registry.get("address").is_none());
    }
}
