//! RDF support
//!
//! Triples, the statement-set container the converters accumulate into,
//! prefix/namespace resolution, and Turtle serialization.

mod namespace;
mod store;
pub mod turtle;
mod types;

pub use namespace::{NamespaceManager, PrefixError, PrefixResult};
pub use store::StatementSet;
pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};
