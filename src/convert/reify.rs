//! Statement reification
//!
//! A relationship occurrence ("person P performed at event E, in order 3")
//! carries properties the base triple cannot hold. Reification mints a
//! statement node for the base triple and hangs those properties off it.
//!
//! Statement identifiers are content-addressed: a sha256 over the canonical
//! form of exactly the base triple, never the extra properties. Re-running
//! the converter over unchanged input therefore reuses the same statement
//! node and the statement set does not grow. Extra properties from later
//! calls merge additively into the existing node.

use crate::rdf::{NamedNode, RdfObject, RdfResult, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

/// Reify a base triple and attach extra properties to its statement node.
///
/// Adds:
/// - `(subject, statement-props:pred, statement)` so the reification is
///   discoverable from the subject without an index,
/// - `(statement, rdf:type, rdf:Statement)` and the `mpc:Statement` class,
/// - the standard `rdf:subject` / `rdf:predicate` / `rdf:object` quad,
/// - one triple per non-null extra property.
///
/// Returns the statement node so callers can nest further reified edges
/// under it (multi-level qualifiers).
pub fn reify(
    edge: &Triple,
    extra_properties: &[(&str, Option<RdfObject>)],
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> RdfResult<NamedNode> {
    let statement = vocab.statement_node(&vocab.hash_triple(edge))?;
    let terms = vocab.terms();

    let pointer_predicate = vocab.statement_predicate(&edge.predicate)?;
    store.add(Triple::new(
        edge.subject.clone(),
        pointer_predicate,
        statement.clone(),
    ));
    store.add(Triple::new(
        statement.clone(),
        terms.rdf_type.clone(),
        terms.rdf_statement.clone(),
    ));
    store.add(Triple::new(
        statement.clone(),
        terms.rdf_type.clone(),
        vocab.class_node("statement")?,
    ));
    store.add(Triple::new(
        statement.clone(),
        terms.rdf_subject.clone(),
        RdfObject::from(edge.subject.clone()),
    ));
    store.add(Triple::new(
        statement.clone(),
        terms.rdf_predicate.clone(),
        edge.predicate.as_named_node().clone(),
    ));
    store.add(Triple::new(
        statement.clone(),
        terms.rdf_object.clone(),
        edge.object.clone(),
    ));

    for (key, value) in extra_properties {
        if let Some(object) = value {
            store.add(Triple::new(
                statement.clone(),
                vocab.property_predicate(key)?,
                object.clone(),
            ));
        }
    }

    Ok(statement)
}

/// All statement nodes that reify the given triple, in insertion order.
///
/// Multiple reifications of one base triple are valid (distinct statement
/// nodes from different import passes); the projector flattens their
/// properties together, so every match is returned.
pub fn find_reifying_statements(edge: &Triple, vocab: &Vocabulary, store: &StatementSet) -> Vec<RdfSubject> {
    let terms = vocab.terms();
    let subject_as_object = RdfObject::from(edge.subject.clone());

    store
        .with_predicate_object(&terms.rdf_subject, &subject_as_object)
        .filter(|candidate| {
            let statement = &candidate.subject;
            store.has(&Triple::new(
                statement.clone(),
                terms.rdf_predicate.clone(),
                edge.predicate.as_named_node().clone(),
            )) && store.has(&Triple::new(
                statement.clone(),
                terms.rdf_object.clone(),
                edge.object.clone(),
            ))
        })
        .map(|candidate| candidate.subject.clone())
        .collect()
}

/// Add `(subject, props:key, entity#key_{id})`, an edge whose property
/// name and target entity type coincide.
pub fn add_simple_edge(
    subject: &RdfSubject,
    key: &str,
    id: i64,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> RdfResult<()> {
    add_named_simple_edge(subject, key, key, id, vocab, store)
}

/// Add `(subject, props:name, entity#{target_type}_{id})` with no
/// reification; used when a relationship carries no qualifying properties.
pub fn add_named_simple_edge(
    subject: &RdfSubject,
    name: &str,
    target_type: &str,
    id: i64,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> RdfResult<()> {
    store.add(Triple::new(
        subject.clone(),
        vocab.property_predicate(name)?,
        vocab.entity_node(target_type, id)?,
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn edge(vocab: &Vocabulary) -> Triple {
        Triple::new(
            vocab.entity_node("person", 1).unwrap(),
            vocab.property_predicate("event").unwrap(),
            vocab.entity_node("event", 2).unwrap(),
        )
    }

    #[test]
    fn test_reify_is_idempotent() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let edge = edge(&vocab);

        let extras = [("order", Some(RdfObject::from(Literal::new_simple("1"))))];
        let first = reify(&edge, &extras, &vocab, &mut store).unwrap();
        let count = store.len();
        let second = reify(&edge, &extras, &vocab, &mut store).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), count);
    }

    #[test]
    fn test_reify_merges_extra_properties_additively() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let edge = edge(&vocab);

        let s1 = reify(
            &edge,
            &[("order", Some(Literal::new_simple("1").into()))],
            &vocab,
            &mut store,
        )
        .unwrap();
        let s2 = reify(
            &edge,
            &[("role", Some(Literal::new_simple("conductor").into()))],
            &vocab,
            &mut store,
        )
        .unwrap();
        assert_eq!(s1, s2);

        let statement: RdfSubject = s1.into();
        let props: Vec<_> = store.with_subject(&statement).collect();
        // type x2, subject, predicate, object, order, role
        assert_eq!(props.len(), 7);
    }

    #[test]
    fn test_null_extra_properties_are_skipped() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let edge = edge(&vocab);

        let statement = reify(&edge, &[("subject", None)], &vocab, &mut store).unwrap();
        let subject_pred = vocab.property_predicate("subject").unwrap();
        let statement: RdfSubject = statement.into();
        assert!(store
            .with_subject(&statement)
            .all(|t| t.predicate != subject_pred));
    }

    #[test]
    fn test_find_reifying_statements_round_trip() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let edge = edge(&vocab);

        reify(
            &edge,
            &[("test", Some(Literal::new_simple("success").into()))],
            &vocab,
            &mut store,
        )
        .unwrap();

        let statements = find_reifying_statements(&edge, &vocab, &store);
        assert_eq!(statements.len(), 1);

        let test_pred = vocab.property_predicate("test").unwrap();
        let value = store
            .object_for(&statements[0], &test_pred)
            .and_then(|o| o.as_literal())
            .map(|l| l.value().to_string());
        assert_eq!(value, Some("success".to_string()));
    }

    #[test]
    fn test_find_reifying_statements_misses_other_edges() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        reify(&edge(&vocab), &[], &vocab, &mut store).unwrap();

        let other = Triple::new(
            vocab.entity_node("person", 1).unwrap(),
            vocab.property_predicate("event").unwrap(),
            vocab.entity_node("event", 3).unwrap(),
        );
        assert!(find_reifying_statements(&other, &vocab, &store).is_empty());
    }

    #[test]
    fn test_simple_edge() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let subject: RdfSubject = vocab.entity_node("location", 1332).unwrap().into();

        add_simple_edge(&subject, "event", 1, &vocab, &mut store).unwrap();
        assert!(store.has(&Triple::new(
            vocab.entity_node("location", 1332).unwrap(),
            vocab.property_predicate("event").unwrap(),
            vocab.entity_node("event", 1).unwrap(),
        )));

        add_named_simple_edge(&subject, "parent", "location", 1331, &vocab, &mut store).unwrap();
        assert!(store.has(&Triple::new(
            vocab.entity_node("location", 1332).unwrap(),
            vocab.property_predicate("parent").unwrap(),
            vocab.entity_node("location", 1331).unwrap(),
        )));
    }
}
