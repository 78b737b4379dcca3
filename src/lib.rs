//! Performance archive knowledge graph converter
//!
//! Turns entity records from a historical concert-performance archive
//! (persons, events, works, corporations, subjects, locations, series,
//! sources) into an RDF knowledge graph, and projects that graph into
//! labeled property-graph form for a graph database.
//!
//! # Architecture
//!
//! - [`vocab`]: deterministic identifier construction over one base URI
//! - [`rdf`]: triples, the statement-set container, prefixes, Turtle
//! - [`convert`]: per-entity-type converters and statement reification
//! - [`project`]: property-graph projection (JSON documents, Cypher)
//! - [`pipeline`]: the source-to-sink conversion loop
//!
//! Relationships that carry qualifying properties (participation order,
//! performed mediums, digitization URLs) are reified: the base triple is
//! content-addressed into a statement node holding the qualifiers, so
//! re-converting unchanged input never grows the graph.

pub mod convert;
pub mod pipeline;
pub mod project;
pub mod rdf;
pub mod vocab;

pub use convert::EntityKind;
pub use pipeline::{Pipeline, RunStats};
pub use vocab::Vocabulary;

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
