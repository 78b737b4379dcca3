//! Statement-set container
//!
//! The in-memory triple store the converters write into and the projectors
//! read from. Set semantics: adding a duplicate triple is a no-op. Iteration
//! order is insertion order; projection's last-write-wins tie-break for
//! colliding property keys depends on it, so nothing here may sort or rehash
//! into a different order.

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered, duplicate-suppressing set of triples.
///
/// Scoped to one entity (streaming mode) or one entity-type batch (batch
/// mode); triples are only ever added, never mutated.
#[derive(Debug, Clone, Default)]
pub struct StatementSet {
    triples: IndexSet<Triple, FxBuildHasher>,
}

impl StatementSet {
    /// Create a new empty statement set
    pub fn new() -> Self {
        Self {
            triples: IndexSet::with_hasher(FxBuildHasher),
        }
    }

    /// Add a triple. Returns `true` if it was new, `false` if it was
    /// already present (no-op).
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Check if a triple is present
    pub fn has(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Iterate over triples matching a pattern, in insertion order
    pub fn matching<'a>(
        &'a self,
        pattern: &'a TriplePattern,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| pattern.matches(t))
    }

    /// Triples with the given subject, in insertion order
    pub fn with_subject<'a>(
        &'a self,
        subject: &'a RdfSubject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    /// Triples `(?, predicate, ?)`, in insertion order
    pub fn with_predicate<'a>(
        &'a self,
        predicate: &'a RdfPredicate,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.predicate == predicate)
    }

    /// Triples `(?, predicate, object)`, in insertion order
    pub fn with_predicate_object<'a>(
        &'a self,
        predicate: &'a RdfPredicate,
        object: &'a RdfObject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.predicate == predicate && &t.object == object)
    }

    /// First object of `(subject, predicate, ?)`, if any
    pub fn object_for(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
    ) -> Option<&RdfObject> {
        self.triples
            .iter()
            .find(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }
}

impl Extend<Triple> for StatementSet {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode};

    fn triple(n: u32) -> Triple {
        Triple::new(
            NamedNode::new("http://example.org/location_1").unwrap(),
            RdfPredicate::new("http://example.org/props#name").unwrap(),
            Literal::new_simple(format!("name {}", n)),
        )
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut store = StatementSet::new();
        assert!(store.add(triple(1)));
        assert!(!store.add(triple(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insertion_order_iteration() {
        let mut store = StatementSet::new();
        for n in 0..20 {
            store.add(triple(n));
        }
        let values: Vec<String> = store
            .iter()
            .map(|t| t.object.as_literal().unwrap().value().to_string())
            .collect();
        let expected: Vec<String> = (0..20).map(|n| format!("name {}", n)).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_pattern_match() {
        let mut store = StatementSet::new();
        store.add(triple(1));
        store.add(triple(2));

        let pattern = TriplePattern::new(
            Some(NamedNode::new("http://example.org/location_1").unwrap().into()),
            None,
            None,
        );
        assert_eq!(store.matching(&pattern).count(), 2);

        let pattern = TriplePattern::new(
            None,
            None,
            Some(Literal::new_simple("name 2").into()),
        );
        assert_eq!(store.matching(&pattern).count(), 1);
    }

    #[test]
    fn test_with_subject() {
        let mut store = StatementSet::new();
        store.add(triple(1));
        let subject: RdfSubject = NamedNode::new("http://example.org/location_1")
            .unwrap()
            .into();
        assert_eq!(store.with_subject(&subject).count(), 1);
        let other: RdfSubject = NamedNode::new("http://example.org/location_2")
            .unwrap()
            .into();
        assert_eq!(store.with_subject(&other).count(), 0);
    }
}
