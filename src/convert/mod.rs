//! Entity-to-RDF conversion
//!
//! One converter per entity type turns a typed record into triples in a
//! [`StatementSet`]: a generic frame (declared scalar fields, `rdf:type`,
//! class declaration) plus per-type relationship edges, reified where the
//! relationship carries qualifying properties.

pub mod corporation;
pub mod event;
pub mod location;
pub mod person;
pub mod records;
pub mod reify;
pub mod series;
pub mod source;
pub mod subject;
pub mod value;
pub mod work;

pub use self::records::EntityRecord;
pub use self::value::{literal_to_value, PropertyValue, ScalarValue};

use self::records::NameEntry;
use self::value::ScalarTypeError;
use crate::rdf::{Literal, NamedNode, RdfError, RdfResult, StatementSet, Triple};
use crate::vocab::Vocabulary;
use thiserror::Error;

/// Conversion failure for one entity record
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The JSON document does not deserialize into the entity's record type
    #[error("invalid {entity_type} record: {source}")]
    InvalidRecord {
        entity_type: &'static str,
        source: serde_json::Error,
    },
    /// A field value outside the convertible scalar set
    #[error("unsupported value for field '{field}': {source}")]
    UnsupportedLiteral {
        field: &'static str,
        source: ScalarTypeError,
    },
    #[error(transparent)]
    Rdf(#[from] RdfError),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Write the generic entity frame: one literal triple per declared scalar
/// field, named-node triples for declared URL fields, `rdf:type` to the
/// entity's class, and the class's own `rdfs:Class` declaration.
///
/// Returns the entity's subject node.
pub fn write_entity_frame<R: EntityRecord>(
    record: &R,
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> RdfResult<NamedNode> {
    let subject = vocab.entity_node(R::ENTITY_TYPE, record.uid())?;
    let terms = vocab.terms();

    for (key, scalar) in record.scalar_fields() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate(key)?,
            scalar.to_literal(terms),
        ));
    }
    for (key, iri) in record.url_fields() {
        store.add(Triple::new(
            subject.clone(),
            vocab.property_predicate(key)?,
            NamedNode::new(&iri)?,
        ));
    }

    let class = vocab.class_node(R::ENTITY_TYPE)?;
    store.add(Triple::new(
        subject.clone(),
        terms.rdf_type.clone(),
        class.clone(),
    ));
    store.add(Triple::new(
        class,
        terms.rdf_type.clone(),
        terms.rdfs_class.clone(),
    ));
    Ok(subject)
}

/// The name pattern shared by person, corporation, location, series and
/// source: `rdfs:label` for the primary name (order 1), a plain `name`
/// literal for every name, and a reified `name` edge carrying the order.
pub(crate) fn add_standard_names(
    subject: &NamedNode,
    names: &[NameEntry],
    vocab: &Vocabulary,
    store: &mut StatementSet,
) -> ConvertResult<()> {
    let terms = vocab.terms();
    for entry in names {
        let Some(name) = &entry.name else { continue };
        if entry.order == 1 {
            store.add(Triple::new(
                subject.clone(),
                terms.rdfs_label.clone(),
                Literal::new_simple(name.clone()),
            ));
        }
        let edge = Triple::new(
            subject.clone(),
            vocab.property_predicate("name")?,
            Literal::new_simple(name.clone()),
        );
        store.add(edge.clone());
        reify::reify(
            &edge,
            &[(
                "order",
                Some(Literal::new_typed(entry.order.to_string(), terms.xsd_integer.clone()).into()),
            )],
            vocab,
            store,
        )?;
    }
    Ok(())
}

/// Literal for a name or description that may carry a language tag
pub(crate) fn tagged_literal(text: &str, language: Option<&str>) -> RdfResult<Literal> {
    match language {
        Some(lang) => Literal::new_language_tagged(text, lang),
        None => Ok(Literal::new_simple(text)),
    }
}

/// The entity types the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Event,
    Work,
    Corporation,
    Subject,
    Location,
    Series,
    Source,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Person,
        EntityKind::Event,
        EntityKind::Work,
        EntityKind::Corporation,
        EntityKind::Subject,
        EntityKind::Location,
        EntityKind::Series,
        EntityKind::Source,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Event => "event",
            EntityKind::Work => "work",
            EntityKind::Corporation => "corporation",
            EntityKind::Subject => "subject",
            EntityKind::Location => "location",
            EntityKind::Series => "series",
            EntityKind::Source => "source",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Deserialize and convert one JSON document of this entity type.
    /// Returns the entity's subject node.
    pub fn convert(
        &self,
        document: &serde_json::Value,
        vocab: &Vocabulary,
        store: &mut StatementSet,
    ) -> ConvertResult<NamedNode> {
        fn parse<R: serde::de::DeserializeOwned + EntityRecord>(
            document: &serde_json::Value,
        ) -> ConvertResult<R> {
            serde_json::from_value(document.clone()).map_err(|source| {
                ConvertError::InvalidRecord {
                    entity_type: R::ENTITY_TYPE,
                    source,
                }
            })
        }

        match self {
            EntityKind::Person => person::person_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Event => event::event_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Work => work::work_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Corporation => {
                corporation::corporation_to_rdf(&parse(document)?, vocab, store)
            }
            EntityKind::Subject => subject::subject_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Location => location::location_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Series => series::series_to_rdf(&parse(document)?, vocab, store),
            EntityKind::Source => source::source_to_rdf(&parse(document)?, vocab, store),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::records::LocationRecord;
    use super::*;

    #[test]
    fn test_entity_frame() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let record: LocationRecord = serde_json::from_value(serde_json::json!({
            "uid": 1332,
            "title": "Colston Hall (Bristol)",
            "slug": "colston-hall-bristol",
            "score": 7,
            "names": []
        }))
        .unwrap();

        let subject = write_entity_frame(&record, &vocab, &mut store).unwrap();
        assert_eq!(
            subject.as_str(),
            "http://ontologies.slub-dresden.de/musiconn.performance/entity#location_1332"
        );

        let terms = vocab.terms();
        assert!(store.has(&Triple::new(
            subject.clone(),
            vocab.property_predicate("uid").unwrap(),
            Literal::new_typed("1332", terms.xsd_integer.clone()),
        )));
        // score arrives as JSON number 7 and is swept as an integer literal
        assert!(store.has(&Triple::new(
            subject.clone(),
            vocab.property_predicate("score").unwrap(),
            Literal::new_typed("7", terms.xsd_integer.clone()),
        )));
        assert!(store.has(&Triple::new(
            subject.clone(),
            terms.rdf_type.clone(),
            vocab.class_node("location").unwrap(),
        )));
        assert!(store.has(&Triple::new(
            vocab.class_node("location").unwrap(),
            terms.rdf_type.clone(),
            terms.rdfs_class.clone(),
        )));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EntityKind::from_name("gallery"), None);
    }

    #[test]
    fn test_convert_rejects_malformed_document() {
        let vocab = Vocabulary::default();
        let mut store = StatementSet::new();
        let err = EntityKind::Person
            .convert(&serde_json::json!({"title": "no uid"}), &vocab, &mut store)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRecord { entity_type: "person", .. }));
    }
}
