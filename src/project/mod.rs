//! Property-graph projection
//!
//! Reads a statement set back out as labeled property-graph shapes: JSON
//! node/relationship documents and Cypher write statements. Projection is
//! prefix-driven: only predicates resolvable through the vocabulary's
//! prefix table contribute, everything else (notably the reified-edge
//! pointers in `statement-props#`) is skipped silently.

pub mod cypher;
pub mod json;

pub use cypher::{node_to_cypher, subject_to_cypher};
pub use json::{project_node, project_typed_node, EndpointRef, NodeJson, ProjectedGraph, RelJson};

use crate::rdf::{NamedNode, NamespaceManager, RdfSubject, StatementSet};
use crate::vocab::Vocabulary;

/// Graph label for a node: the local name of its first `rdf:type` object,
/// or the full class IRI when no prefix matches. `None` when the node has
/// no type triple at all.
pub fn type_label(
    node: &NamedNode,
    vocab: &Vocabulary,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> Option<String> {
    let subject = RdfSubject::NamedNode(node.clone());
    let class = store.object_for(&subject, &vocab.terms().rdf_type)?;
    let iri = class.as_named_node()?.as_str();
    Some(match prefixes.shorten(iri) {
        Some((_, local)) => local.to_string(),
        None => iri.to_string(),
    })
}
