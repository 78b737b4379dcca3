//! Turtle serialization
//!
//! Output A of the pipeline: a prefix-declaration header followed by the
//! accumulated triples. Parsing support exists mainly so fixtures and sink
//! output can be read back in tests.

use super::namespace::NamespaceManager;
use super::store::StatementSet;
use super::types::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};
use thiserror::Error;

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed Turtle
    #[error("Parse error: {0}")]
    Parse(String),

    /// RDF-star terms are not supported
    #[error("RDF-star term in input")]
    RdfStar,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatter failure
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// Serialize a statement set to Turtle with a prefix header
pub fn serialize_store(
    store: &StatementSet,
    namespaces: &NamespaceManager,
) -> SerializeResult<String> {
    let mut header = String::new();
    for (prefix, iri) in namespaces.prefixes() {
        header.push_str(&format!("@prefix {}: <{}> .\n", prefix, iri));
    }
    header.push('\n');

    let body = serialize_triples(store.iter())?;
    Ok(header + &body)
}

/// Serialize triples without a header
pub fn serialize_triples<'a>(
    triples: impl Iterator<Item = &'a Triple>,
) -> SerializeResult<String> {
    let mut output = Vec::new();
    let mut formatter = TurtleFormatter::new(&mut output);

    for triple in triples {
        let subject = match &triple.subject {
            RdfSubject::NamedNode(n) => {
                rio_api::model::Subject::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
            }
            RdfSubject::BlankNode(b) => {
                rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
            }
        };

        let predicate = rio_api::model::NamedNode {
            iri: triple.predicate.as_str(),
        };

        let object = match &triple.object {
            RdfObject::NamedNode(n) => {
                rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
            }
            RdfObject::BlankNode(b) => {
                rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
            }
            RdfObject::Literal(l) => rio_api::model::Term::Literal(rio_literal(l)),
        };

        formatter
            .format(&rio_api::model::Triple {
                subject,
                predicate,
                object,
            })
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }

    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))?;

    String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
}

fn rio_literal<'a>(l: &'a Literal) -> rio_api::model::Literal<'a> {
    if let Some(lang) = l.language() {
        rio_api::model::Literal::LanguageTaggedString {
            value: l.value(),
            language: lang,
        }
    } else if l.datatype() == "http://www.w3.org/2001/XMLSchema#string" {
        rio_api::model::Literal::Simple { value: l.value() }
    } else {
        rio_api::model::Literal::Typed {
            value: l.value(),
            datatype: rio_api::model::NamedNode { iri: l.datatype() },
        }
    }
}

/// Parse a Turtle document into triples
pub fn parse_turtle(input: &str) -> ParseResult<Vec<Triple>> {
    let cursor = Cursor::new(input);
    let reader = BufReader::new(cursor);
    let mut parser = TurtleParser::new(reader, None);

    let mut triples = Vec::new();
    let mut conversion_error: Option<ParseError> = None;

    let res: Result<(), rio_turtle::TurtleError> = parser.parse_all(&mut |t| {
        match convert_triple(&t) {
            Ok(triple) => triples.push(triple),
            Err(e) => {
                if conversion_error.is_none() {
                    conversion_error = Some(e);
                }
            }
        }
        Ok(())
    });

    if let Some(e) = conversion_error {
        return Err(e);
    }
    match res {
        Ok(_) => Ok(triples),
        Err(e) => Err(ParseError::Parse(e.to_string())),
    }
}

fn convert_triple(t: &rio_api::model::Triple) -> ParseResult<Triple> {
    let subject = convert_subject(t.subject)?;
    let predicate = convert_predicate(t.predicate)?;
    let object = convert_object(t.object)?;
    Ok(Triple {
        subject,
        predicate,
        object,
    })
}

fn convert_subject(s: rio_api::model::Subject) -> ParseResult<RdfSubject> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::from_identifier(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::Triple(_) => Err(ParseError::RdfStar),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term) -> ParseResult<RdfObject> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::from_identifier(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::Literal(l) => Ok(RdfObject::Literal(convert_literal(l)?)),
        rio_api::model::Term::Triple(_) => Err(ParseError::RdfStar),
    }
}

fn convert_literal(l: rio_api::model::Literal) -> ParseResult<Literal> {
    match l {
        rio_api::model::Literal::Simple { value } => Ok(Literal::new_simple(value)),
        rio_api::model::Literal::LanguageTaggedString { value, language } => {
            Literal::new_language_tagged(value, language)
                .map_err(|e| ParseError::Parse(e.to_string()))
        }
        rio_api::model::Literal::Typed { value, datatype } => {
            let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(Literal::new_typed(value, dt))
        }
    }
}
