//! Entity record types
//!
//! Typed views of the document-store JSON, reduced to the fields the
//! converters touch. Validation happens at deserialization; absent list
//! fields are absent, never errors.
//!
//! Every record declares its scalar-field table explicitly
//! (`EntityRecord::scalar_fields`); the generic literal sweep walks that
//! table instead of reflecting over the record at runtime, so a field can
//! only be swept if it is declared here.

use super::value::ScalarValue;
use serde::Deserialize;

/// Scalar fields common to every entity record, declared once
pub trait EntityRecord {
    /// Entity type name as used in identifiers (lowercase)
    const ENTITY_TYPE: &'static str;

    /// Numeric identifier, stable across re-runs
    fn uid(&self) -> i64;

    /// Declared `(field name, scalar value)` pairs for the catch-all
    /// literal sweep, in output order
    fn scalar_fields(&self) -> Vec<(&'static str, ScalarValue)>;

    /// Declared fields whose string values are IRIs and become named-node
    /// objects instead of literals
    fn url_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn base_scalars(
    uid: i64,
    title: &Option<String>,
    slug: &Option<String>,
    score: &Option<f64>,
) -> Vec<(&'static str, ScalarValue)> {
    let mut fields = vec![("uid", ScalarValue::Integer(uid))];
    if let Some(title) = title {
        fields.push(("title", ScalarValue::String(title.clone())));
    }
    if let Some(slug) = slug {
        fields.push(("slug", ScalarValue::String(slug.clone())));
    }
    if let Some(score) = score {
        fields.push(("score", ScalarValue::Float(*score)));
    }
    fields
}

// Shared sub-records

#[derive(Debug, Clone, Deserialize)]
pub struct NameEntry {
    pub name: Option<String>,
    pub language: Option<String>,
    pub order: i64,
    pub label: Option<i64>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionEntry {
    pub description: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateEntry {
    pub date: String,
    pub label: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntry {
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryEntry {
    pub geo: Vec<f64>,
    pub label: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRef {
    pub event: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionalEventRef {
    pub event: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    pub person: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorporationRef {
    pub corporation: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRef {
    pub location: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRef {
    pub series: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRef {
    pub source: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityRef {
    pub authority: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub project: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRef {
    pub subject: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkRef {
    pub work: i64,
}

/// `categories` / `genders` entries: a numeric label
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    pub label: i64,
}

/// Medium qualifier on an event/series relationship: a subject reference
#[derive(Debug, Clone, Deserialize)]
pub struct MediumRef {
    pub subject: i64,
}

/// Event/series reference qualified by mediums (persons, corporations)
#[derive(Debug, Clone, Deserialize)]
pub struct QualifiedEventRef {
    pub event: i64,
    pub mediums: Option<Vec<MediumRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualifiedSeriesRef {
    pub series: i64,
    pub mediums: Option<Vec<MediumRef>>,
}

/// Person/corporation participation in an event, with order and an
/// optional subject qualifier
#[derive(Debug, Clone, Deserialize)]
pub struct OrderedPersonRef {
    pub person: i64,
    pub order: i64,
    pub subject: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderedCorporationRef {
    pub corporation: i64,
    pub order: i64,
    pub subject: Option<i64>,
}

/// Source reference on an event, with digitization qualifiers
#[derive(Debug, Clone, Deserialize)]
pub struct EventSourceRef {
    pub source: i64,
    pub url: Option<String>,
    pub manifest: Option<String>,
    /// page number or label; scalar kind varies in the data
    pub page: Option<serde_json::Value>,
    pub gallery: Option<Vec<Gallery>>,
}

/// Digitized page image attached to an event source
#[derive(Debug, Clone, Deserialize)]
pub struct Gallery {
    pub id: i64,
    pub source: Option<i64>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub order: Option<i64>,
}

impl EntityRecord for Gallery {
    const ENTITY_TYPE: &'static str = "Gallery";

    fn uid(&self) -> i64 {
        self.id
    }

    fn scalar_fields(&self) -> Vec<(&'static str, ScalarValue)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", ScalarValue::String(title.clone())));
        }
        if let Some(order) = self.order {
            fields.push(("order", ScalarValue::Integer(order)));
        }
        fields
    }

    fn url_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(thumbnail) = &self.thumbnail {
            fields.push(("thumbnail", thumbnail.clone()));
        }
        if let Some(image) = &self.image {
            fields.push(("image", image.clone()));
        }
        fields
    }
}

/// A performed work in a person's record, with performance events
#[derive(Debug, Clone, Deserialize)]
pub struct WorkWithPerformances {
    pub work: i64,
    pub performances: Option<Vec<EventRef>>,
}

/// Performance relationship on a person/corporation, with performed works
#[derive(Debug, Clone, Deserialize)]
pub struct PersonPerformanceRef {
    pub person: i64,
    pub works: Option<Vec<WorkRef>>,
}

/// Performance of a work within an event program
#[derive(Debug, Clone, Deserialize)]
pub struct EventPerformance {
    pub work: i64,
    pub order: i64,
    pub composers: Option<Vec<PersonRef>>,
    pub corporations: Option<Vec<CorporationRef>>,
    pub descriptions: Option<Vec<PerformanceDescription>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceDescription {
    pub description: String,
}

/// Work location with an occurrence count qualifier
#[derive(Debug, Clone, Deserialize)]
pub struct CountedLocationRef {
    pub location: i64,
    pub count: Option<i64>,
}

// Entity records

macro_rules! impl_entity_record {
    ($record:ty, $entity_type:literal) => {
        impl EntityRecord for $record {
            const ENTITY_TYPE: &'static str = $entity_type;

            fn uid(&self) -> i64 {
                self.uid
            }

            fn scalar_fields(&self) -> Vec<(&'static str, ScalarValue)> {
                base_scalars(self.uid, &self.title, &self.slug, &self.score)
            }
        }
    };
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub corporations: Option<Vec<CorporationRef>>,
    pub events: Option<Vec<QualifiedEventRef>>,
    pub serials: Option<Vec<QualifiedSeriesRef>>,
    pub sources: Option<Vec<SourceRef>>,
    pub genders: Option<Vec<CategoryRef>>,
    pub authorities: Option<Vec<AuthorityRef>>,
    pub descriptions: Option<Vec<DescriptionEntry>>,
    pub locations: Option<Vec<LocationRef>>,
    pub works: Option<Vec<WorkWithPerformances>>,
    pub performances: Option<Vec<PersonPerformanceRef>>,
}

impl_entity_record!(PersonRecord, "person");

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Option<Vec<NameEntry>>,
    pub persons: Option<Vec<OrderedPersonRef>>,
    pub corporations: Option<Vec<OrderedCorporationRef>>,
    pub locations: Option<Vec<LocationRef>>,
    pub sources: Option<Vec<EventSourceRef>>,
    pub performances: Option<Vec<EventPerformance>>,
    pub dates: Option<Vec<DateEntry>>,
    pub times: Option<Vec<TimeEntry>>,
}

impl_entity_record!(EventRecord, "event");

#[derive(Debug, Clone, Deserialize)]
pub struct WorkRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub descriptions: Option<Vec<DescriptionEntry>>,
    pub genres: Option<Vec<SubjectRef>>,
    pub composers: Option<Vec<PersonRef>>,
    pub persons: Option<Vec<PersonRef>>,
    pub locations: Option<Vec<CountedLocationRef>>,
    pub authorities: Option<Vec<AuthorityRef>>,
    pub dates: Option<Vec<DateEntry>>,
    pub libretists: Option<Vec<PersonRef>>,
}

impl_entity_record!(WorkRecord, "work");

#[derive(Debug, Clone, Deserialize)]
pub struct CorporationRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub events: Option<Vec<QualifiedEventRef>>,
    pub serials: Option<Vec<QualifiedSeriesRef>>,
    pub sources: Option<Vec<SourceRef>>,
    pub persons: Option<Vec<PersonRef>>,
    pub performances: Option<Vec<PersonPerformanceRef>>,
    pub authorities: Option<Vec<AuthorityRef>>,
    pub descriptions: Option<Vec<DescriptionEntry>>,
}

impl_entity_record!(CorporationRecord, "corporation");

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub authorities: Option<Vec<AuthorityRef>>,
    pub projects: Option<Vec<ProjectRef>>,
    pub persons: Option<Vec<PersonRef>>,
    pub parents: Option<Vec<SubjectRef>>,
    pub childs: Option<Vec<SubjectRef>>,
    pub events: Option<Vec<EventRef>>,
    pub corporations: Option<Vec<CorporationRef>>,
    pub serials: Option<Vec<SeriesRef>>,
    pub performances: Option<Vec<PersonRef>>,
}

impl_entity_record!(SubjectRecord, "subject");

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub events: Option<Vec<EventRef>>,
    pub serials: Option<Vec<SeriesRef>>,
    pub sources: Option<Vec<SourceRef>>,
    pub geometries: Option<Vec<GeometryEntry>>,
    pub parents: Option<Vec<LocationRef>>,
    pub childs: Option<Vec<LocationRef>>,
    pub persons: Option<Vec<PersonRef>>,
}

impl_entity_record!(LocationRecord, "location");

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub events: Option<Vec<EventRef>>,
    pub sources: Option<Vec<SourceRef>>,
    pub dates: Option<Vec<DateEntry>>,
    pub parents: Option<Vec<SeriesRef>>,
    pub locations: Option<Vec<LocationRef>>,
}

impl_entity_record!(SeriesRecord, "series");

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub uid: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
    pub names: Vec<NameEntry>,
    pub events: Option<Vec<OptionalEventRef>>,
    pub dates: Option<Vec<DateEntry>>,
    pub locations: Option<Vec<LocationRef>>,
}

impl_entity_record!(SourceRecord, "source");
