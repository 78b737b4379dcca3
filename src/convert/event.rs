//! Event conversion
//!
//! The richest converter: participations and performances are reified with
//! order and subject qualifiers, and digitized sources carry gallery
//! sub-entities with their own frames.

use super::records::{EventRecord, Gallery};
use super::reify::{add_simple_edge, reify};
use super::value::ScalarValue;
use super::{tagged_literal, write_entity_frame, ConvertError, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfObject, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn event_to_rdf(
    record: &EventRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("event", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    for p in record.persons.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("person")?,
            vocab.entity_node("person", p.person)?,
        );
        let qualifier = match p.subject {
            Some(id) => Some(RdfObject::from(vocab.entity_node("subject", id)?)),
            None => None,
        };
        reify(
            &edge,
            &[
                (
                    "order",
                    Some(
                        Literal::new_typed(p.order.to_string(), terms.xsd_integer.clone()).into(),
                    ),
                ),
                ("subject", qualifier),
            ],
            vocab,
            store,
        )?;
    }

    for c in record.corporations.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("corporation")?,
            vocab.entity_node("corporation", c.corporation)?,
        );
        let qualifier = match c.subject {
            Some(id) => Some(RdfObject::from(vocab.entity_node("subject", id)?)),
            None => None,
        };
        reify(
            &edge,
            &[
                (
                    "order",
                    Some(
                        Literal::new_typed(c.order.to_string(), terms.xsd_integer.clone()).into(),
                    ),
                ),
                ("subject", qualifier),
            ],
            vocab,
            store,
        )?;
    }

    for l in record.locations.iter().flatten() {
        add_simple_edge(&subject_ref, "location", l.location, vocab, store)?;
    }

    for s in record.sources.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("source")?,
            vocab.entity_node("source", s.source)?,
        );
        let url = match &s.url {
            Some(url) => Some(RdfObject::from(NamedNode::new(url)?)),
            None => None,
        };
        let manifest = match &s.manifest {
            Some(manifest) => Some(RdfObject::from(NamedNode::new(manifest)?)),
            None => None,
        };
        let page = match &s.page {
            Some(value) => {
                let scalar = ScalarValue::from_json(value).map_err(|source| {
                    ConvertError::UnsupportedLiteral {
                        field: "page",
                        source,
                    }
                })?;
                Some(RdfObject::from(scalar.to_literal(terms)))
            }
            None => None,
        };
        let statement = reify(
            &edge,
            &[("url", url), ("manifest", manifest), ("page", page)],
            vocab,
            store,
        )?;

        for gallery in s.gallery.iter().flatten() {
            let gallery_node = gallery_to_rdf(gallery, vocab, store)?;
            store.add(Triple::new(
                statement.clone(),
                vocab.property_predicate("gallery")?,
                gallery_node,
            ));
        }
    }

    for entry in record.names.iter().flatten() {
        let Some(name) = &entry.name else { continue };
        let literal = tagged_literal(name, entry.language.as_deref())?;
        if entry.order == 1 {
            store.add(Triple::new(
                subject.clone(),
                terms.rdfs_label.clone(),
                literal.clone(),
            ));
        }
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("name")?,
            literal,
        );
        store.add(edge.clone());
        reify(
            &edge,
            &[
                (
                    "order",
                    Some(
                        Literal::new_typed(entry.order.to_string(), terms.xsd_integer.clone())
                            .into(),
                    ),
                ),
                (
                    "subtitle",
                    entry
                        .subtitle
                        .as_ref()
                        .map(|s| Literal::new_simple(s.clone()).into()),
                ),
                (
                    "label",
                    entry.label.map(|l| {
                        Literal::new_typed(l.to_string(), terms.xsd_integer.clone()).into()
                    }),
                ),
            ],
            vocab,
            store,
        )?;
    }

    for perf in record.performances.iter().flatten() {
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("performance")?,
            vocab.entity_node("work", perf.work)?,
        );
        let statement = reify(
            &edge,
            &[(
                "order",
                Some(Literal::new_typed(perf.order.to_string(), terms.xsd_integer.clone()).into()),
            )],
            vocab,
            store,
        )?;
        for c in perf.composers.iter().flatten() {
            store.add(Triple::new(
                statement.clone(),
                vocab.property_predicate("composer")?,
                vocab.entity_node("person", c.person)?,
            ));
        }
        for c in perf.corporations.iter().flatten() {
            store.add(Triple::new(
                statement.clone(),
                vocab.property_predicate("corporation")?,
                vocab.entity_node("corporation", c.corporation)?,
            ));
        }
        for d in perf.descriptions.iter().flatten() {
            store.add(Triple::new(
                statement.clone(),
                vocab.property_predicate("description")?,
                Literal::new_simple(d.description.clone()),
            ));
        }
    }

    for d in record.dates.iter().flatten() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("date")?,
            Literal::new_typed(d.date.clone(), terms.xsd_date.clone()),
        ));
    }
    for t in record.times.iter().flatten() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate("time")?,
            Literal::new_typed(t.time.clone(), terms.xsd_time.clone()),
        ));
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}

/// Write a gallery entity's frame (scalars plus thumbnail/image as
/// named-node URLs) and return its node.
pub fn gallery_to_rdf(
    gallery: &Gallery,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    Ok(write_entity_frame(gallery, vocab, store)?)
}
