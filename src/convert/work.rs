//! Work conversion

use super::records::WorkRecord;
use super::reify::{add_named_simple_edge, add_simple_edge, reify};
use super::{add_standard_names, write_entity_frame, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn work_to_rdf(
    record: &WorkRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("work", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    add_standard_names(&subject, &record.names, vocab, store)?;

    for d in record.descriptions.iter().flatten() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("description")?,
            Literal::new_simple(d.description.clone()),
        ));
    }
    for g in record.genres.iter().flatten() {
        add_named_simple_edge(&subject_ref, "genre", "subject", g.subject, vocab, store)?;
    }
    for c in record.composers.iter().flatten() {
        add_named_simple_edge(&subject_ref, "composer", "person", c.person, vocab, store)?;
    }
    for p in record.persons.iter().flatten() {
        add_simple_edge(&subject_ref, "person", p.person, vocab, store)?;
    }

    for l in record.locations.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("location")?,
            vocab.entity_node("location", l.location)?,
        );
        reify(
            &edge,
            &[(
                "count",
                l.count.map(|c| {
                    Literal::new_typed(c.to_string(), terms.xsd_integer.clone()).into()
                }),
            )],
            vocab,
            store,
        )?;
    }

    for a in record.authorities.iter().flatten() {
        add_simple_edge(&subject_ref, "authority", a.authority, vocab, store)?;
    }

    for d in record.dates.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("date")?,
            Literal::new_typed(d.date.clone(), terms.xsd_date.clone()),
        );
        reify(
            &edge,
            &[(
                "label",
                d.label
                    .map(|l| Literal::new_simple(l.to_string()).into()),
            )],
            vocab,
            store,
        )?;
    }

    for l in record.libretists.iter().flatten() {
        add_named_simple_edge(&subject_ref, "libretist", "person", l.person, vocab, store)?;
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::reify::find_reifying_statements;

    fn convert(json: serde_json::Value) -> (Vocabulary, StatementSet, NamedNode) {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let record: WorkRecord = serde_json::from_value(json).unwrap();
        let subject = work_to_rdf(&record, &vocab, &mut store).unwrap();
        (vocab, store, subject)
    }

    #[test]
    fn test_genre_and_composer_edges_are_named() {
        let (vocab, store, subject) = convert(serde_json::json!({
            "uid": 30,
            "names": [{"name": "Symphony No. 3", "order": 1}],
            "genres": [{"subject": 8}],
            "composers": [{"person": 4}],
            "libretists": [{"person": 5}]
        }));
        assert!(store.has(&Triple::new(
            subject.clone(),
            vocab.property_predicate("genre").unwrap(),
            vocab.entity_node("subject", 8).unwrap(),
        )));
        assert!(store.has(&Triple::new(
            subject.clone(),
            vocab.property_predicate("composer").unwrap(),
            vocab.entity_node("person", 4).unwrap(),
        )));
        assert!(store.has(&Triple::new(
            subject,
            vocab.property_predicate("libretist").unwrap(),
            vocab.entity_node("person", 5).unwrap(),
        )));
    }

    #[test]
    fn test_location_count_is_reified() {
        let (vocab, store, subject) = convert(serde_json::json!({
            "uid": 30,
            "names": [],
            "locations": [{"location": 1332, "count": 4}]
        }));
        let edge = Triple::new(
            subject,
            vocab.property_predicate("location").unwrap(),
            vocab.entity_node("location", 1332).unwrap(),
        );
        let statements = find_reifying_statements(&edge, &vocab, &store);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            store.object_for(&statements[0], &vocab.property_predicate("count").unwrap()).cloned(),
            Some(Literal::new_typed("4", vocab.terms().xsd_integer.clone()).into())
        );
    }

    #[test]
    fn test_date_label_is_a_plain_literal() {
        let (vocab, store, subject) = convert(serde_json::json!({
            "uid": 30,
            "names": [],
            "dates": [{"date": "1883-01-01", "label": 2}]
        }));
        let terms = vocab.terms();
        let edge = Triple::new(
            subject,
            vocab.property_predicate("date").unwrap(),
            Literal::new_typed("1883-01-01", terms.xsd_date.clone()),
        );
        let statements = find_reifying_statements(&edge, &vocab, &store);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            store.object_for(&statements[0], &vocab.property_predicate("label").unwrap()).cloned(),
            Some(Literal::new_simple("2").into())
        );
    }
}
