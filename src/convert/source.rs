//! Source (archival document) conversion

use super::records::SourceRecord;
use super::reify::add_named_simple_edge;
use super::{add_standard_names, write_entity_frame, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn source_to_rdf(
    record: &SourceRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("source", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    add_standard_names(&subject, &record.names, vocab, store)?;

    // event references can be empty stubs in the dump
    for e in record.events.iter().flatten() {
        if let Some(event) = e.event {
            add_named_simple_edge(&subject_ref, "event", "event", event, vocab, store)?;
        }
    }
    for d in record.dates.iter().flatten() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("date")?,
            Literal::new_typed(d.date.clone(), terms.xsd_date.clone()),
        ));
    }
    for l in record.locations.iter().flatten() {
        add_named_simple_edge(&subject_ref, "location", "location", l.location, vocab, store)?;
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}
