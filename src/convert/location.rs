//! Location conversion
//!
//! Locations carry geometries: each coordinate pair becomes a
//! content-addressed geometry node with a WKT literal, a geo-pair literal,
//! and GeoSPARQL/Simple Features typing.

use super::records::LocationRecord;
use super::reify::{add_named_simple_edge, add_simple_edge};
use super::value::{to_geo_literal, to_wkt_literal};
use super::{add_standard_names, write_entity_frame, ConvertResult};
use crate::rdf::{Literal, NamedNode, RdfSubject, StatementSet, Triple};
use crate::vocab::Vocabulary;

pub fn location_to_rdf(
    record: &LocationRecord,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<NamedNode> {
    let subject = vocab.entity_node("location", record.uid)?;
    let subject_ref = RdfSubject::from(subject.clone());
    let terms = vocab.terms();

    add_standard_names(&subject, &record.names, vocab, store)?;

    for e in record.events.iter().flatten() {
        add_simple_edge(&subject_ref, "event", e.event, vocab, store)?;
    }
    for s in record.serials.iter().flatten() {
        add_simple_edge(&subject_ref, "series", s.series, vocab, store)?;
    }
    for s in record.sources.iter().flatten() {
        add_simple_edge(&subject_ref, "source", s.source, vocab, store)?;
    }

    for g in record.geometries.iter().flatten() {
        if g.geo.len() < 2 {
            continue;
        }
        let pair = [g.geo[0], g.geo[1]];
        let wkt = to_wkt_literal(pair, terms);
        let anchor = Triple::new(subject.clone(), terms.geo_has_geometry.clone(), wkt.clone());
        let geometry = vocab.entity_node("geometry", vocab.hash_triple(&anchor))?;

        store.add(Triple::new(
            subject.clone(),
            terms.geo_has_geometry.clone(),
            geometry.clone(),
        ));
        store.add(Triple::new(
            geometry.clone(),
            terms.rdf_type.clone(),
            terms.geo_geometry.clone(),
        ));
        store.add(Triple::new(
            geometry.clone(),
            terms.rdf_type.clone(),
            terms.sf_polygon.clone(),
        ));
        store.add(Triple::new(
            geometry.clone(),
            vocab.property_predicate("label")?,
            Literal::new_typed(g.label.to_string(), terms.xsd_integer.clone()),
        ));
        store.add(Triple::new(geometry.clone(), terms.geo_as_wkt.clone(), wkt));
        store.add(Triple::new(
            geometry,
            vocab.property_predicate("geoliteral")?,
            to_geo_literal(pair, terms),
        ));
    }

    for p in record.parents.iter().flatten() {
        add_named_simple_edge(&subject_ref, "parent", "location", p.location, vocab, store)?;
    }
    for c in record.childs.iter().flatten() {
        add_named_simple_edge(&subject_ref, "child", "location", c.location, vocab, store)?;
    }
    for p in record.persons.iter().flatten() {
        add_simple_edge(&subject_ref, "person", p.person, vocab, store)?;
    }

    write_entity_frame(record, vocab, store)?;
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::ns;

    fn convert(json: serde_json::Value) -> (Vocabulary, StatementSet, NamedNode) {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let record: LocationRecord = serde_json::from_value(json).unwrap();
        let subject = location_to_rdf(&record, &vocab, &mut store).unwrap();
        (vocab, store, subject)
    }

    #[test]
    fn test_geometry_node_is_content_addressed() {
        let geometries = serde_json::json!({
            "uid": 1332,
            "names": [],
            "geometries": [{"geo": [-2.5998353, 51.4545919], "label": 1}]
        });
        let (vocab, store, subject) = convert(geometries.clone());
        let terms = vocab.terms();

        let geometry = store
            .with_predicate(&terms.geo_has_geometry)
            .find_map(|t| t.object.as_named_node().cloned())
            .unwrap();
        assert!(geometry.as_str().contains("entity#geometry_"));

        assert!(store.has(&Triple::new(
            geometry.clone(),
            terms.rdf_type.clone(),
            terms.geo_geometry.clone(),
        )));
        assert!(store.has(&Triple::new(
            geometry.clone(),
            terms.geo_as_wkt.clone(),
            Literal::new_typed("POINT(-2.5998353 51.4545919)", terms.geo_wkt_literal.clone()),
        )));
        assert!(store.has(&Triple::new(
            geometry,
            vocab.property_predicate("geoliteral").unwrap(),
            Literal::new_typed(
                "-2.5998353#51.4545919",
                crate::rdf::NamedNode::new(ns::GEO_PAIR_DATATYPE).unwrap(),
            ),
        )));

        // same input yields the same geometry node and no growth
        let count = store.len();
        let record: LocationRecord = serde_json::from_value(geometries).unwrap();
        let mut store2 = store;
        location_to_rdf(&record, &vocab, &mut store2).unwrap();
        assert_eq!(store2.len(), count);
        let _ = subject;
    }

    #[test]
    fn test_short_geometry_is_skipped() {
        let (_, store, _) = convert(serde_json::json!({
            "uid": 1332,
            "names": [],
            "geometries": [{"geo": [7.5], "label": 1}]
        }));
        let vocab = Vocabulary::default();
        assert!(store
            .with_predicate(&vocab.terms().geo_has_geometry)
            .next()
            .is_none());
    }

    #[test]
    fn test_hierarchy_and_reference_edges() {
        let (vocab, store, subject) = convert(serde_json::json!({
            "uid": 1332,
            "names": [{"name": "Colston Hall", "order": 1}],
            "events": [{"event": 1}],
            "parents": [{"location": 1331}]
        }));
        assert!(store.has(&Triple::new(
            subject.clone(),
            vocab.property_predicate("event").unwrap(),
            vocab.entity_node("event", 1).unwrap(),
        )));
        assert!(store.has(&Triple::new(
            subject,
            vocab.property_predicate("parent").unwrap(),
            vocab.entity_node("location", 1331).unwrap(),
        )));
    }
}
