//! Vocabulary and identifier construction
//!
//! All identifiers in the graph are derived deterministically from one base
//! URI: entity nodes (`{base}entity#{type}_{uid}`), class nodes
//! (`{base}class#{Type}`), property nodes (`{base}props#{key}`), and
//! content-addressed statement nodes. The vocabulary is an explicitly
//! constructed immutable value passed into every component that mints or
//! resolves identifiers; there is no process-wide default.
//!
//! Consumers of the serialized triples depend on the exact string form of
//! these identifiers, so the construction here must not change.

use crate::rdf::{NamedNode, NamespaceManager, RdfPredicate, RdfResult, Triple};
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Well-known namespace IRIs
pub mod ns {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const GEO: &str = "http://www.opengis.net/ont/geosparql#";
    pub const SF: &str = "http://www.opengis.net/ont/sf#";

    /// Datatype of the `{lat}#{lon}` geo-pair literal. The `wwww` is a typo
    /// inherited from the data this vocabulary was minted for; existing
    /// triples carry it, so it stays.
    pub const GEO_PAIR_DATATYPE: &str =
        "http://wwww.bigdata.com/rdf/geospatial/literals/v1#lat-lon";
}

/// Base URI of the performance archive vocabulary
pub const DEFAULT_BASE_URI: &str = "http://ontologies.slub-dresden.de/musiconn.performance/";

/// Pre-validated fixed terms used throughout conversion and projection
#[derive(Debug, Clone)]
pub struct Terms {
    pub rdf_type: RdfPredicate,
    pub rdf_subject: RdfPredicate,
    pub rdf_predicate: RdfPredicate,
    pub rdf_object: RdfPredicate,
    /// `rdf:Statement`
    pub rdf_statement: NamedNode,
    pub rdfs_label: RdfPredicate,
    pub rdfs_comment: RdfPredicate,
    /// `rdfs:Class`
    pub rdfs_class: NamedNode,
    pub geo_has_geometry: RdfPredicate,
    pub geo_as_wkt: RdfPredicate,
    /// `geo:Geometry`
    pub geo_geometry: NamedNode,
    /// `sf:Polygon`
    pub sf_polygon: NamedNode,
    pub geo_wkt_literal: NamedNode,
    pub geo_pair: NamedNode,
    pub xsd_integer: NamedNode,
    pub xsd_float: NamedNode,
    pub xsd_boolean: NamedNode,
    pub xsd_date: NamedNode,
    pub xsd_time: NamedNode,
}

impl Terms {
    fn new() -> RdfResult<Self> {
        let p = |iri: String| RdfPredicate::new(&iri);
        let n = |iri: String| NamedNode::new(&iri);
        Ok(Self {
            rdf_type: p(format!("{}type", ns::RDF))?,
            rdf_subject: p(format!("{}subject", ns::RDF))?,
            rdf_predicate: p(format!("{}predicate", ns::RDF))?,
            rdf_object: p(format!("{}object", ns::RDF))?,
            rdf_statement: n(format!("{}Statement", ns::RDF))?,
            rdfs_label: p(format!("{}label", ns::RDFS))?,
            rdfs_comment: p(format!("{}comment", ns::RDFS))?,
            rdfs_class: n(format!("{}Class", ns::RDFS))?,
            geo_has_geometry: p(format!("{}hasGeometry", ns::GEO))?,
            geo_as_wkt: p(format!("{}asWKT", ns::GEO))?,
            geo_geometry: n(format!("{}Geometry", ns::GEO))?,
            sf_polygon: n(format!("{}Polygon", ns::SF))?,
            geo_wkt_literal: n(format!("{}wktLiteral", ns::GEO))?,
            geo_pair: n(ns::GEO_PAIR_DATATYPE.to_string())?,
            xsd_integer: n(format!("{}integer", ns::XSD))?,
            xsd_float: n(format!("{}float", ns::XSD))?,
            xsd_boolean: n(format!("{}boolean", ns::XSD))?,
            xsd_date: n(format!("{}date", ns::XSD))?,
            xsd_time: n(format!("{}time", ns::XSD))?,
        })
    }
}

/// Identifier builder over one base URI
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entity_ns: String,
    class_ns: String,
    props_ns: String,
    statement_props_ns: String,
    terms: Terms,
}

impl Vocabulary {
    /// Create a vocabulary from a base URI (expected to end in `/`).
    /// Validates every fixed term once; identifier construction afterwards
    /// only fails for keys that do not form a valid IRI.
    pub fn new(base_uri: &str) -> RdfResult<Self> {
        Ok(Self {
            entity_ns: format!("{}entity#", base_uri),
            class_ns: format!("{}class#", base_uri),
            props_ns: format!("{}props#", base_uri),
            statement_props_ns: format!("{}statement-props#", base_uri),
            terms: Terms::new()?,
        })
    }

    /// The fixed rdf/rdfs/geo/xsd terms
    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    /// Entity identifier: `{base}entity#{type}_{uid}`. The uid is numeric
    /// for source entities and a hex content hash for synthetic nodes
    /// (statements, geometries).
    pub fn entity_node(&self, entity_type: &str, uid: impl Display) -> RdfResult<NamedNode> {
        NamedNode::new(&format!("{}{}_{}", self.entity_ns, entity_type, uid))
    }

    /// Class identifier: `{base}class#{Capitalize(type)}`
    pub fn class_node(&self, entity_type: &str) -> RdfResult<NamedNode> {
        NamedNode::new(&format!("{}{}", self.class_ns, capitalize(entity_type)))
    }

    /// Property identifier: `{base}props#{key}`. The property namespace is
    /// flat and shared across all entity types; the same key always yields
    /// the identical identifier.
    pub fn property_node(&self, key: &str) -> RdfResult<NamedNode> {
        NamedNode::new(&format!("{}{}", self.props_ns, key))
    }

    /// Property identifier as a predicate
    pub fn property_predicate(&self, key: &str) -> RdfResult<RdfPredicate> {
        Ok(self.property_node(key)?.into())
    }

    /// Statement identifier for a content hash
    pub fn statement_node(&self, hash: &str) -> RdfResult<NamedNode> {
        self.entity_node("statement", hash)
    }

    /// Rewrite a `props#` predicate into the `statement-props#` namespace;
    /// predicates from other namespaces pass through unchanged.
    pub fn statement_predicate(&self, predicate: &RdfPredicate) -> RdfResult<RdfPredicate> {
        match predicate.as_str().strip_prefix(&self.props_ns) {
            Some(local) => {
                RdfPredicate::new(&format!("{}{}", self.statement_props_ns, local))
            }
            None => Ok(predicate.clone()),
        }
    }

    /// Content hash of a base triple's canonical serialized form. Extra
    /// reified properties never participate, so the same base relationship
    /// always hashes to the same statement identifier.
    pub fn hash_triple(&self, triple: &Triple) -> String {
        let mut hasher = Sha256::new();
        hasher.update(triple.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Prefix table used by projection and Turtle output. `statement-props#`
    /// is deliberately absent: reified-edge pointer triples must stay
    /// unresolvable so projections skip them.
    pub fn namespaces(&self) -> NamespaceManager {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("rdf", ns::RDF);
        mgr.add_prefix("rdfs", ns::RDFS);
        mgr.add_prefix("xsd", ns::XSD);
        mgr.add_prefix("geo", ns::GEO);
        mgr.add_prefix("sf", ns::SF);
        mgr.add_prefix("mpp", self.props_ns.clone());
        mgr.add_prefix("mpe", self.entity_ns.clone());
        mgr.add_prefix("mpc", self.class_ns.clone());
        mgr
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        // The default base URI and all fixed terms are statically valid IRIs
        Vocabulary::new(DEFAULT_BASE_URI).unwrap_or_else(|e| {
            unreachable!("default vocabulary IRIs are valid: {}", e)
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    #[test]
    fn test_entity_id_form_is_exact() {
        let vocab = Vocabulary::default();
        assert_eq!(
            vocab.entity_node("location", 1332).unwrap().as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/entity#location_1332"
        );
    }

    #[test]
    fn test_class_id_capitalizes() {
        let vocab = Vocabulary::default();
        assert_eq!(
            vocab.class_node("location").unwrap().as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/class#Location"
        );
        // already-capitalized type names pass through
        assert_eq!(
            vocab.class_node("Gallery").unwrap().as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/class#Gallery"
        );
    }

    #[test]
    fn test_property_namespace_is_shared() {
        let vocab = Vocabulary::default();
        // "name" used by two entity types resolves to the identical node
        assert_eq!(
            vocab.property_node("name").unwrap(),
            vocab.property_node("name").unwrap()
        );
        assert_eq!(
            vocab.property_node("name").unwrap().as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/props#name"
        );
    }

    #[test]
    fn test_statement_predicate_rewrite() {
        let vocab = Vocabulary::default();
        let pred = vocab.property_predicate("event").unwrap();
        let rewritten = vocab.statement_predicate(&pred).unwrap();
        assert_eq!(
            rewritten.as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/statement-props#event"
        );

        // predicates outside props# are untouched
        let label = vocab.terms().rdfs_label.clone();
        assert_eq!(vocab.statement_predicate(&label).unwrap(), label);
    }

    #[test]
    fn test_hash_ignores_extra_properties_by_construction() {
        let vocab = Vocabulary::default();
        let triple = Triple::new(
            vocab.entity_node("person", 1).unwrap(),
            vocab.property_predicate("event").unwrap(),
            vocab.entity_node("event", 2).unwrap(),
        );
        let h1 = vocab.hash_triple(&triple);
        let h2 = vocab.hash_triple(&triple.clone());
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);

        let other = Triple::new(
            vocab.entity_node("person", 1).unwrap(),
            vocab.property_predicate("event").unwrap(),
            Literal::new_simple("x"),
        );
        assert_ne!(h1, vocab.hash_triple(&other));
    }

    #[test]
    fn test_statement_props_has_no_prefix() {
        let vocab = Vocabulary::default();
        let mgr = vocab.namespaces();
        let pred = vocab.property_predicate("name").unwrap();
        let rewritten = vocab.statement_predicate(&pred).unwrap();
        assert!(mgr.shorten(rewritten.as_str()).is_none());
        assert_eq!(mgr.shorten(pred.as_str()), Some(("mpp", "name")));
    }
}
