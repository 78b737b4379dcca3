//! Person conversion

use super::records::PersonRecord;
use super::reify::{add_named_simple_edge, add_simple_edge, reify};
use super::{add_standard_names, tagged_literal, write_entity_frame, ConvertResult};
use crate::rdf::{NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn person_to_rdf(
    record: &PersonRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("person", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    add_standard_names(&subject, &record.names, vocab, store)?;

    for c in record.corporations.iter().flatten() {
        add_simple_edge(&subject_ref, "corporation", c.corporation, vocab, store)?;
    }

    for e in record.events.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("event")?,
            vocab.entity_node("event", e.event)?,
        );
        let statement = RdfSubject::from(reify(&edge, &[], vocab, store)?);
        for m in e.mediums.iter().flatten() {
            add_named_simple_edge(&statement, "medium", "subject", m.subject, vocab, store)?;
        }
    }

    for s in record.serials.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("series")?,
            vocab.entity_node("series", s.series)?,
        );
        let statement = RdfSubject::from(reify(&edge, &[], vocab, store)?);
        for m in s.mediums.iter().flatten() {
            add_named_simple_edge(&statement, "medium", "subject", m.subject, vocab, store)?;
        }
    }

    for s in record.sources.iter().flatten() {
        add_simple_edge(&subject_ref, "source", s.source, vocab, store)?;
    }

    // gender categories point at label entities
    for g in record.genders.iter().flatten() {
        add_simple_edge(&subject_ref, "label", g.label, vocab, store)?;
    }

    for a in record.authorities.iter().flatten() {
        add_simple_edge(&subject_ref, "authority", a.authority, vocab, store)?;
    }

    for d in record.descriptions.iter().flatten() {
        let literal = tagged_literal(&d.description, d.language.as_deref())?;
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("description")?,
            literal.clone(),
        ));
        store.add(Triple::new(
            subject.clone(),
            terms.rdfs_comment.clone(),
            literal,
        ));
    }

    for l in record.locations.iter().flatten() {
        add_simple_edge(&subject_ref, "location", l.location, vocab, store)?;
    }

    for w in record.works.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("work")?,
            vocab.entity_node("work", w.work)?,
        );
        let statement = RdfSubject::from(reify(&edge, &[], vocab, store)?);
        for p in w.performances.iter().flatten() {
            add_named_simple_edge(&statement, "performance", "event", p.event, vocab, store)?;
        }
    }

    for p in record.performances.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("performance")?,
            vocab.entity_node("person", p.person)?,
        );
        let statement = RdfSubject::from(reify(&edge, &[], vocab, store)?);
        for w in p.works.iter().flatten() {
            add_simple_edge(&statement, "work", w.work, vocab, store)?;
        }
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}
