//! Subject (topic/genre vocabulary) conversion
//!
//! Subjects deviate from the standard name pattern: the name relationship
//! exists only in its reification, and the order is attached to the
//! statement node after the fact.

use super::records::SubjectRecord;
use super::reify::{add_named_simple_edge, add_simple_edge, reify};
use super::{tagged_literal, write_entity_frame, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn subject_to_rdf(
    record: &SubjectRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("subject", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    for entry in &record.names {
        let Some(name) = &entry.name else { continue };
        let literal = tagged_literal(name, entry.language.as_deref())?;
        if entry.order == 1 {
            store.add(Triple::new(
                subject.clone(),
                terms.rdfs_label.clone(),
                literal.clone(),
            ));
        }
        let edge = Triple::new(subject.clone(), vocab.property_predicate("name")?, literal);
        let statement = reify(&edge, &[], vocab, store)?;
        store.add(Triple::new(
            statement,
            vocab.property_predicate("order")?,
            Literal::new_typed(entry.order.to_string(), terms.xsd_integer.clone()),
        ));
    }

    for a in record.authorities.iter().flatten() {
        add_simple_edge(&subject_ref, "authority", a.authority, vocab, store)?;
    }
    for p in record.projects.iter().flatten() {
        add_simple_edge(&subject_ref, "project", p.project, vocab, store)?;
    }
    for p in record.persons.iter().flatten() {
        add_simple_edge(&subject_ref, "person", p.person, vocab, store)?;
    }
    for p in record.parents.iter().flatten() {
        add_named_simple_edge(&subject_ref, "parent", "subject", p.subject, vocab, store)?;
    }
    for c in record.childs.iter().flatten() {
        add_named_simple_edge(&subject_ref, "child", "subject", c.subject, vocab, store)?;
    }
    for e in record.events.iter().flatten() {
        add_named_simple_edge(&subject_ref, "event", "event", e.event, vocab, store)?;
    }
    for c in record.corporations.iter().flatten() {
        add_named_simple_edge(
            &subject_ref,
            "corporation",
            "corporation",
            c.corporation,
            vocab,
            store,
        )?;
    }
    for s in record.serials.iter().flatten() {
        add_named_simple_edge(&subject_ref, "serial", "serial", s.series, vocab, store)?;
    }
    for p in record.performances.iter().flatten() {
        add_named_simple_edge(&subject_ref, "performance", "person", p.person, vocab, store)?;
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}
