//! Series (concert series) conversion

use super::records::SeriesRecord;
use super::reify::{add_named_simple_edge, add_simple_edge};
use super::{add_standard_names, write_entity_frame, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

/// Series dates arrive in mixed precision (`1905`, `1905-03`,
/// `1905-03-14T00:00:00`); only the date part up to day precision is kept.
fn normalize_date(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

pub fn series_to_rdf(
    record: &SeriesRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("series", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    add_standard_names(&subject, &record.names, vocab, store)?;

    for e in record.events.iter().flatten() {
        add_named_simple_edge(&subject_ref, "event", "event", e.event, vocab, store)?;
    }
    for s in record.sources.iter().flatten() {
        add_simple_edge(&subject_ref, "source", s.source, vocab, store)?;
    }
    for d in record.dates.iter().flatten() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("date")?,
            Literal::new_typed(normalize_date(&d.date), terms.xsd_date.clone()),
        ));
    }
    for p in record.parents.iter().flatten() {
        add_named_simple_edge(&subject_ref, "parent", "series", p.series, vocab, store)?;
    }
    for l in record.locations.iter().flatten() {
        add_named_simple_edge(&subject_ref, "location", "location", l.location, vocab, store)?;
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}
