//! Prefix mappings and CURIE resolution.
//!
//! # Abbreviation policy
//!
//! [`Prefixes::abbreviate`] uses *first match in a stable order*, not
//! longest match:
//!
//! 1. `rdf:type` always becomes the token `a`.
//! 2. The reserved `sub` prefix (a nanopub's own internal identifiers) is
//!    tried before anything else. A nanopub's `sub` and `this` namespaces
//!    usually share a stem, and trying `this` first would claim every
//!    internal identifier.
//! 3. Every other prefix is tried in insertion order.
//! 4. A URI that matches nothing is returned verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vocab;

/// Label of the reserved prefix for a nanopub's internal identifiers.
pub const SUB: &str = "sub";

/// Label conventionally bound to the nanopub URI itself.
pub const THIS: &str = "this";

/// An insertion-ordered mapping from prefix label to namespace IRI.
///
/// Affects presentation only: abbreviation in the display projection and
/// prefix declarations in serialized output. Never the quads themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefixes {
    map: IndexMap<String, String>,
}

impl Prefixes {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The vocabularies every nanopublication uses.
    pub fn defaults() -> Self {
        let mut p = Self::new();
        p.insert("rdf", vocab::RDF);
        p.insert("rdfs", vocab::RDFS);
        p.insert("xsd", vocab::XSD);
        p.insert("dc", vocab::DC);
        p.insert("dct", vocab::DCT);
        p.insert("prov", vocab::PROV);
        p.insert("np", vocab::NP);
        p.insert("npx", vocab::NPX);
        p.insert("orcid", vocab::ORCID);
        p
    }

    /// Bind `prefix` to `namespace`. Rebinding an existing label keeps its
    /// position and returns the previous namespace.
    pub fn insert(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Option<String> {
        self.map.insert(prefix.into(), namespace.into())
    }

    /// Add every binding of `other` whose label is not bound here yet.
    pub fn extend_missing(&mut self, other: &Prefixes) {
        for (prefix, namespace) in other.iter() {
            if !self.map.contains_key(prefix) {
                self.map.insert(prefix.to_string(), namespace.to_string());
            }
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.map.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Abbreviate a full URI to a CURIE (see the module docs for the policy).
    pub fn abbreviate(&self, uri: &str) -> String {
        if uri == vocab::RDF_TYPE {
            return "a".to_string();
        }
        if let Some(local) = self.get(SUB).and_then(|ns| strip_namespace(uri, ns)) {
            return format!("{SUB}:{local}");
        }
        for (prefix, namespace) in self.iter() {
            if prefix == SUB {
                continue;
            }
            if let Some(local) = strip_namespace(uri, namespace) {
                return format!("{prefix}:{local}");
            }
        }
        uri.to_string()
    }

    /// Expand a CURIE to a full URI. `a` expands to `rdf:type`.
    ///
    /// Returns `None` when the prefix is not bound.
    pub fn expand(&self, curie: &str) -> Option<String> {
        if curie == "a" {
            return Some(vocab::RDF_TYPE.to_string());
        }
        let (prefix, local) = curie.split_once(':')?;
        self.get(prefix).map(|namespace| format!("{namespace}{local}"))
    }
}

fn strip_namespace<'a>(uri: &'a str, namespace: &str) -> Option<&'a str> {
    if namespace.is_empty() {
        return None;
    }
    uri.strip_prefix(namespace)
}

// --- tests -------------------------------------------------------------------
