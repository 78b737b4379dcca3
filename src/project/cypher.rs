//! Output C: Cypher write statements
//!
//! One statement block per entity: `MERGE` the node by `{id}`, `SET` its
//! literal properties, then `MERGE` each relationship target and the typed
//! relationship itself. Everything is `MERGE` so re-importing the same
//! entity is idempotent on the graph side.

use super::type_label;
use crate::convert::reify::find_reifying_statements;
use crate::rdf::{Literal, NamedNode, NamespaceManager, RdfSubject, StatementSet};
use crate::vocab::{ns, Vocabulary};

/// Render a literal as a Cypher value expression. Temporal and spatial
/// datatypes map to the corresponding constructor calls, numerics stay
/// bare, everything else is quoted with `"` escaped.
pub fn literal_to_cypher(literal: &Literal) -> String {
    let value = literal.value();
    let xsd = |local: &str| format!("{}{}", ns::XSD, local);
    let dt = literal.datatype();

    if dt == xsd("date") {
        format!("date(\"{}\")", value)
    } else if dt == xsd("dateTime") {
        format!("datetime(\"{}\")", value)
    } else if dt == xsd("time") {
        format!("time(\"{}\")", value)
    } else if dt == xsd("boolean") {
        if value == "true" { "true" } else { "false" }.to_string()
    } else if dt == xsd("duration") {
        format!("duration(\"{}\")", value)
    } else if dt == format!("{}wktLiteral", ns::GEO) {
        format!("point(\"{}\")", value)
    } else if dt == xsd("integer")
        || dt == xsd("decimal")
        || dt == xsd("double")
        || dt == xsd("float")
    {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}

/// Quote a label for use in `(:Label)` position when it is not a plain
/// identifier (full-IRI fallback labels need this)
fn label_token(label: &str) -> String {
    if !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        label.to_string()
    } else {
        format!("`{}`", label.replace('`', ""))
    }
}

/// Build the Cypher statements writing one node and its relationships.
///
/// `var` names the node variable within the block; target and edge
/// variables are derived from it so blocks can be concatenated.
pub fn node_to_cypher(
    var: &str,
    label: &str,
    node: &NamedNode,
    vocab: &Vocabulary,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> Vec<String> {
    let subject = RdfSubject::NamedNode(node.clone());
    let mut statements = Vec::new();

    statements.push(format!(
        "MERGE ({}:{} {{id: \"{}\"}})",
        var,
        label_token(label),
        node.as_str()
    ));

    let assignments: Vec<String> = store
        .with_subject(&subject)
        .filter_map(|triple| {
            let literal = triple.object.as_literal()?;
            let (_, key) = prefixes.shorten(triple.predicate.as_str())?;
            Some(format!("{}.{} = {}", var, key, literal_to_cypher(literal)))
        })
        .collect();
    if !assignments.is_empty() {
        statements.push(format!("SET {}", assignments.join(", ")));
    }

    let mut edge_index = 0;
    for triple in store.with_subject(&subject) {
        let Some(object) = triple.object.as_named_node() else {
            continue;
        };
        let Some((_, edge_type)) = prefixes.shorten(triple.predicate.as_str()) else {
            continue;
        };

        let target_var = format!("target_{}_{}", var, edge_index);
        let edge_var = format!("edge_{}_{}", var, edge_index);
        edge_index += 1;

        statements.push(format!(
            "MERGE ({} {{id: \"{}\"}})",
            target_var,
            object.as_str()
        ));
        statements.push(format!(
            "MERGE ({})-[{}:{}]->({})",
            var,
            edge_var,
            label_token(edge_type),
            target_var
        ));

        let edge_assignments: Vec<String> = find_reifying_statements(triple, vocab, store)
            .iter()
            .flat_map(|statement| {
                store
                    .with_subject(statement)
                    .filter_map(|t| {
                        let literal = t.object.as_literal()?;
                        let (_, key) = prefixes.shorten(t.predicate.as_str())?;
                        Some(format!(
                            "{}.{} = {}",
                            edge_var,
                            key,
                            literal_to_cypher(literal)
                        ))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        if !edge_assignments.is_empty() {
            statements.push(format!("SET {}", edge_assignments.join(", ")));
        }
    }

    statements
}

/// Build the Cypher block for a subject, deriving its label from the first
/// `rdf:type` triple (prefix-local name, full IRI as fallback). `None` when
/// the subject has no type triple.
pub fn subject_to_cypher(
    var: &str,
    node: &NamedNode,
    vocab: &Vocabulary,
    prefixes: &NamespaceManager,
    store: &StatementSet,
) -> Option<Vec<String>> {
    let label = type_label(node, vocab, prefixes, store)?;
    Some(node_to_cypher(var, &label, node, vocab, prefixes, store))
}
