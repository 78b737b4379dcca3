//! RDF namespace and prefix management
//!
//! Maps full IRIs to short prefixed names and back. `shorten` is the
//! workhorse for projection: a first-match linear scan over the registered
//! namespaces, returning `None` when no namespace covers the IRI. Callers
//! decide what a miss means: the JSON projector skips the triple, the
//! Cypher builder falls back to the full IRI for node labels.

use indexmap::IndexMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Compact IRI without a colon
    #[error("Not a compact IRI: {0}")]
    NotCompact(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace manager (prefix → namespace IRI)
///
/// Registration order is preserved; `shorten` resolves against the first
/// matching namespace.
#[derive(Debug, Clone, Default)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty namespace manager
    pub fn new() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Register a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get the namespace IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (`prefix:local`) to a full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let pos = compact_iri
            .find(':')
            .ok_or_else(|| PrefixError::NotCompact(compact_iri.to_string()))?;
        let prefix = &compact_iri[..pos];
        let local = &compact_iri[pos + 1..];
        let iri = self.get_iri(prefix)?;
        Ok(format!("{}{}", iri, local))
    }

    /// Shorten a full IRI to `(prefix, local name)` under the first
    /// matching namespace. `None` when no registered namespace covers it.
    pub fn shorten<'a>(&self, iri: &'a str) -> Option<(&str, &'a str)> {
        for (prefix, namespace) in &self.prefixes {
            if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                return Some((prefix.as_str(), local));
            }
        }
        None
    }

    /// Short local name of an IRI, ignoring the prefix
    pub fn local_name<'a>(&self, iri: &'a str) -> Option<&'a str> {
        self.shorten(iri).map(|(_, local)| local)
    }

    /// All registered `(prefix, namespace IRI)` pairs, in registration order
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> NamespaceManager {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("mpp", "http://example.org/base/props#");
        mgr
    }

    #[test]
    fn test_expand() {
        let mgr = manager();
        assert_eq!(
            mgr.expand("mpp:name").unwrap(),
            "http://example.org/base/props#name"
        );
        assert!(mgr.expand("unknown:name").is_err());
        assert!(mgr.expand("nocolon").is_err());
    }

    #[test]
    fn test_shorten() {
        let mgr = manager();
        assert_eq!(
            mgr.shorten("http://example.org/base/props#name"),
            Some(("mpp", "name"))
        );
        assert_eq!(
            mgr.shorten("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            Some(("rdf", "type"))
        );
    }

    #[test]
    fn test_shorten_unknown_namespace_is_none() {
        let mgr = manager();
        assert_eq!(mgr.shorten("http://other.example.org/props#name"), None);
        // statement-props is deliberately unregistered; the props namespace
        // must not swallow it by accident
        assert_eq!(
            mgr.shorten("http://example.org/base/statement-props#name"),
            None
        );
    }

    #[test]
    fn test_local_name() {
        let mgr = manager();
        assert_eq!(
            mgr.local_name("http://example.org/base/props#event"),
            Some("event")
        );
        assert_eq!(mgr.local_name("http://elsewhere.org/x"), None);
    }
}
