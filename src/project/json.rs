//! Output B: property-graph JSON
//!
//! Shapes match the document form a graph database bulk importer consumes:
//! node documents with a label list and a flat property bag, relationship
//! documents with start/end references. Property keys are prefix-local
//! names; when two predicates share a local name the later triple wins,
//! which depends on the statement set's insertion-order iteration.

use super::type_label;
use crate::convert::reify::find_reifying_statements;
use crate::convert::{literal_to_value, PropertyValue};
use crate::rdf::{NamedNode, NamespaceManager, RdfSubject, StatementSet};
use crate::vocab::Vocabulary;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeJson {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub id: String,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelJson {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub id: String,
    pub start: EndpointRef,
    pub end: EndpointRef,
    pub properties: IndexMap<String, PropertyValue>,
    pub label: String,
}

/// One projected entity: its node document plus outgoing relationships
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedGraph {
    pub nodes: Vec<NodeJson>,
    pub rels: Vec<RelJson>,
}

impl ProjectedGraph {
    pub fn merge(&mut self, other: ProjectedGraph) {
        self.nodes.extend(other.nodes);
        self.rels.extend(other.rels);
    }
}

/// Literal properties of a node, keyed by prefix-local predicate name.
/// Unresolvable predicates are skipped; colliding keys keep the last value.
pub(crate) fn literal_properties(
    subject: &RdfSubject,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> IndexMap<String, PropertyValue> {
    let mut properties = IndexMap::new();
    for triple in store.with_subject(subject) {
        let Some(literal) = triple.object.as_literal() else {
            continue;
        };
        if let Some((_, local)) = prefixes.shorten(triple.predicate.as_str()) {
            properties.insert(local.to_string(), literal_to_value(literal));
        }
    }
    properties
}

/// Project one node into JSON documents.
///
/// The node document carries the given label and the node's literal
/// properties. Every named-node object with a resolvable predicate becomes
/// a relationship; its properties are the flattened literal properties of
/// all statements reifying that edge.
pub fn project_node(
    node: &NamedNode,
    label: &str,
    vocab: &Vocabulary,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> ProjectedGraph {
    let subject = RdfSubject::NamedNode(node.clone());

    let node_json = NodeJson {
        doc_type: "node".to_string(),
        id: node.as_str().to_string(),
        labels: vec![label.to_string()],
        properties: literal_properties(&subject, prefixes, store),
    };

    let mut rels = Vec::new();
    for triple in store.with_subject(&subject) {
        let Some(object) = triple.object.as_named_node() else {
            continue;
        };
        let Some((_, edge_type)) = prefixes.shorten(triple.predicate.as_str()) else {
            continue;
        };

        let mut properties = IndexMap::new();
        for statement in find_reifying_statements(triple, vocab, store) {
            properties.extend(literal_properties(&statement, prefixes, store));
        }

        rels.push(RelJson {
            doc_type: "relationship".to_string(),
            id: format!("{}_{}_{}", node.as_str(), edge_type, object.as_str()),
            start: EndpointRef {
                id: node.as_str().to_string(),
            },
            end: EndpointRef {
                id: object.as_str().to_string(),
            },
            properties,
            label: edge_type.to_string(),
        });
    }

    ProjectedGraph {
        nodes: vec![node_json],
        rels,
    }
}

/// Project a node using its `rdf:type` for the label; `None` when the node
/// has no type triple.
pub fn project_typed_node(
    node: &NamedNode,
    vocab: &Vocabulary,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> Option<ProjectedGraph> {
    let label = type_label(node, vocab, prefixes, store)?;
    Some(project_node(node, &label, vocab, prefixes, store))
}
