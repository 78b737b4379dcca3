//! Literal/value codec
//!
//! Native scalar values become typed RDF literals on the way in, and RDF
//! literals become native property-graph values on the way out. The
//! convertible-scalar set is a closed variant decided once at the input
//! boundary, so the encoder is total; anything else (object, array, null)
//! is rejected there and never reaches a triple.

use crate::rdf::Literal;
use crate::vocab::{ns, Terms};
use serde::Serialize;
use thiserror::Error;

/// A JSON value that is not a convertible scalar
#[derive(Error, Debug)]
#[error("cannot convert {kind} to an RDF literal")]
pub struct ScalarTypeError {
    /// JSON kind name: null, array, or object
    pub kind: &'static str,
}

/// The closed set of scalar values that can become literals
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ScalarValue {
    /// Classify a JSON value at the input boundary
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ScalarTypeError> {
        use serde_json::Value;
        match value {
            Value::String(s) => Ok(ScalarValue::String(s.clone())),
            Value::Bool(b) => Ok(ScalarValue::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(ScalarValue::Integer(i)),
                None => Ok(ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::Null => Err(ScalarTypeError { kind: "null" }),
            Value::Array(_) => Err(ScalarTypeError { kind: "array" }),
            Value::Object(_) => Err(ScalarTypeError { kind: "object" }),
        }
    }

    /// Encode as a typed literal. Numbers with no fractional part are
    /// tagged integer, others float; booleans stringify as `true`/`false`.
    pub fn to_literal(&self, terms: &Terms) -> Literal {
        match self {
            ScalarValue::String(s) => Literal::new_simple(s.clone()),
            ScalarValue::Integer(i) => {
                Literal::new_typed(i.to_string(), terms.xsd_integer.clone())
            }
            ScalarValue::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    Literal::new_typed(format!("{}", *f as i64), terms.xsd_integer.clone())
                } else {
                    Literal::new_typed(f.to_string(), terms.xsd_float.clone())
                }
            }
            ScalarValue::Boolean(b) => {
                Literal::new_typed(b.to_string(), terms.xsd_boolean.clone())
            }
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Float(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

/// Geo-pair literal: `{lat}#{lon}` under the fixed geo-pair datatype
pub fn to_geo_literal(pair: [f64; 2], terms: &Terms) -> Literal {
    Literal::new_typed(format!("{}#{}", pair[0], pair[1]), terms.geo_pair.clone())
}

/// WKT point literal: the pair is `[longitude, latitude]` and feeds
/// positionally into `POINT(x y)`. The ordering here is load-bearing;
/// see the regression test below.
pub fn to_wkt_literal(pair: [f64; 2], terms: &Terms) -> Literal {
    Literal::new_typed(
        format!("POINT({} {})", pair[0], pair[1]),
        terms.geo_wkt_literal.clone(),
    )
}

/// Parse `(longitude, latitude)` back out of a WKT point literal
pub fn from_wkt_literal(literal: &Literal) -> Option<(f64, f64)> {
    let inner = literal
        .value()
        .trim()
        .strip_prefix("POINT(")?
        .strip_suffix(')')?;
    let mut parts = inner.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// Native value of a projected property, shaped for the property-graph
/// JSON output (untagged: numbers are numbers, strings are strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// WGS-84 point recovered from a WKT literal
    Point {
        crs: String,
        latitude: f64,
        longitude: f64,
    },
    String(String),
}

/// Decode a literal to its native value, dispatching on the datatype tag.
/// Unrecognized datatypes fall through to the string branch; that catch-all
/// is deliberate, not an error.
pub fn literal_to_value(literal: &Literal) -> PropertyValue {
    let value = literal.value();
    match literal.datatype() {
        dt if dt == const_iri(ns::XSD, "boolean") => PropertyValue::Boolean(value == "true"),
        dt if dt == const_iri(ns::XSD, "integer") => value
            .parse()
            .map(PropertyValue::Integer)
            .unwrap_or_else(|_| PropertyValue::String(value.to_string())),
        dt if dt == const_iri(ns::XSD, "decimal")
            || dt == const_iri(ns::XSD, "float")
            || dt == const_iri(ns::XSD, "double") =>
        {
            value
                .parse()
                .map(PropertyValue::Float)
                .unwrap_or_else(|_| PropertyValue::String(value.to_string()))
        }
        dt if dt == const_iri(ns::GEO, "wktLiteral") => match from_wkt_literal(literal) {
            Some((longitude, latitude)) => PropertyValue::Point {
                crs: "wgs-84".to_string(),
                latitude,
                longitude,
            },
            None => PropertyValue::String(value.to_string()),
        },
        _ => PropertyValue::String(value.to_string()),
    }
}

fn const_iri(namespace: &str, local: &str) -> String {
    format!("{}{}", namespace, local)
}
