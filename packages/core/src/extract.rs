//! Recovering the four-graph structure of a nanopublication from a quad set.
//!
//! A generic RDF store happily holds any pile of statements. A
//! nanopublication additionally requires:
//!
//! - exactly one `(?np, rdf:type, np:Nanopublication)` statement, whose
//!   graph is the *head* graph and whose subject is the nanopub URI;
//! - exactly one `np:hasAssertion`, `np:hasProvenance` and
//!   `np:hasPublicationInfo` link from that URI, naming the other three
//!   graphs.
//!
//! [`extract_metadata`] checks both and reads the optional creation date and
//! author from the publication-info graph.

use indexmap::IndexSet;
use oxrdf::Quad;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rdf::{graph_iri, object_iri, object_value, subject_iri};
use crate::vocab;

/// One of the four graphs of a nanopublication.
///
/// Serialises as a lowercase string (e.g. `"pubinfo"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphRole {
    /// Declares the nanopub and points at the other three graphs.
    Head,
    /// The claim being published.
    Assertion,
    /// Where the assertion came from.
    Provenance,
    /// Metadata about the nanopub itself: creation time, author, signature.
    Pubinfo,
}

impl GraphRole {
    /// All roles in presentation order.
    pub const ALL: [GraphRole; 4] = [
        GraphRole::Head,
        GraphRole::Assertion,
        GraphRole::Provenance,
        GraphRole::Pubinfo,
    ];

    /// The head-graph predicate linking the nanopub URI to this graph.
    /// `None` for the head graph itself.
    pub fn link_predicate(self) -> Option<&'static str> {
        match self {
            GraphRole::Head => None,
            GraphRole::Assertion => Some(vocab::NP_HAS_ASSERTION),
            GraphRole::Provenance => Some(vocab::NP_HAS_PROVENANCE),
            GraphRole::Pubinfo => Some(vocab::NP_HAS_PUBLICATION_INFO),
        }
    }
}

impl std::fmt::Display for GraphRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphRole::Head => write!(f, "head"),
            GraphRole::Assertion => write!(f, "assertion"),
            GraphRole::Provenance => write!(f, "provenance"),
            GraphRole::Pubinfo => write!(f, "pubinfo"),
        }
    }
}

/// The named-graph IRIs of a nanopublication, one per [`GraphRole`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanopubGraphs {
    pub head: String,
    pub assertion: String,
    pub provenance: String,
    pub pubinfo: String,
}

impl NanopubGraphs {
    pub fn get(&self, role: GraphRole) -> &str {
        match role {
            GraphRole::Head => &self.head,
            GraphRole::Assertion => &self.assertion,
            GraphRole::Provenance => &self.provenance,
            GraphRole::Pubinfo => &self.pubinfo,
        }
    }

    /// The role a graph IRI plays, if it is one of the four.
    pub fn role_of(&self, graph: &str) -> Option<GraphRole> {
        GraphRole::ALL.into_iter().find(|r| self.get(*r) == graph)
    }

    /// `(role, iri)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (GraphRole, &str)> {
        GraphRole::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// What [`extract_metadata`] recovers from a quad set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanopubInfo {
    /// The nanopublication's own URI.
    pub uri: String,
    pub graphs: NanopubGraphs,
    /// Creation timestamp from the pubinfo graph, if stated.
    pub date_created: Option<String>,
    /// Attributed agent from the pubinfo graph, if stated.
    pub author: Option<String>,
}

/// Structural violations that make a quad set unusable as a nanopublication.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedNanopub {
    #[error("no np:Nanopublication statement found; cannot locate the head graph")]
    MissingHead,

    #[error("found {0} np:Nanopublication statements; exactly one is required")]
    MultipleHeads(usize),

    #[error("the np:Nanopublication statement must have an IRI subject and sit in a named graph")]
    UnnamedHead,

    #[error("the {0} graph is missing: the nanopub URI has no link to it")]
    MissingGraph(GraphRole),

    #[error("the {0} graph is declared more than once with different identifiers")]
    DuplicateGraph(GraphRole),
}

/// Locate the four graphs of a nanopublication and read its metadata.
///
/// # Errors
///
/// - [`MalformedNanopub::MissingHead`] / [`MalformedNanopub::MultipleHeads`]
///   unless exactly one `np:Nanopublication` statement exists.
/// - [`MalformedNanopub::UnnamedHead`] if that statement has a blank-node
///   subject or lives in the default graph.
/// - [`MalformedNanopub::MissingGraph`] naming the first of assertion,
///   provenance, pubinfo that has no link.
/// - [`MalformedNanopub::DuplicateGraph`] if a link appears with two
///   different targets.
pub fn extract_metadata(quads: &[Quad]) -> Result<NanopubInfo, MalformedNanopub> {
    // a quad set: the same statement twice is still one head
    let markers: IndexSet<&Quad> = quads
        .iter()
        .filter(|q| {
            q.predicate.as_str() == vocab::RDF_TYPE
                && object_iri(&q.object) == Some(vocab::NP_NANOPUBLICATION)
        })
        .collect();

    let marker = match (markers.first(), markers.len()) {
        (None, _) => return Err(MalformedNanopub::MissingHead),
        (Some(one), 1) => *one,
        (_, many) => return Err(MalformedNanopub::MultipleHeads(many)),
    };

    let (Some(uri), Some(head)) = (subject_iri(&marker.subject), graph_iri(&marker.graph_name))
    else {
        return Err(MalformedNanopub::UnnamedHead);
    };

    let link = |role: GraphRole| -> Result<String, MalformedNanopub> {
        let predicate = role.link_predicate().unwrap_or_default();
        let mut targets = quads
            .iter()
            .filter(|q| subject_iri(&q.subject) == Some(uri) && q.predicate.as_str() == predicate)
            .filter_map(|q| object_iri(&q.object));
        let first = targets.next().ok_or(MalformedNanopub::MissingGraph(role))?;
        if targets.any(|other| other != first) {
            return Err(MalformedNanopub::DuplicateGraph(role));
        }
        Ok(first.to_string())
    };

    let graphs = NanopubGraphs {
        head: head.to_string(),
        assertion: link(GraphRole::Assertion)?,
        provenance: link(GraphRole::Provenance)?,
        pubinfo: link(GraphRole::Pubinfo)?,
    };

    let pubinfo_value = |predicates: &[&str]| -> Option<String> {
        predicates.iter().find_map(|predicate| {
            quads
                .iter()
                .filter(|q| graph_iri(&q.graph_name) == Some(graphs.pubinfo.as_str()))
                .find(|q| subject_iri(&q.subject) == Some(uri) && q.predicate.as_str() == *predicate)
                .map(|q| object_value(&q.object))
        })
    };

    let date_created = pubinfo_value(&[vocab::PROV_GENERATED_AT_TIME, vocab::DCT_CREATED]);
    let author = pubinfo_value(&[vocab::PROV_WAS_ATTRIBUTED_TO, vocab::DCT_CREATOR]);

    Ok(NanopubInfo {
        uri: uri.to_string(),
        graphs,
        date_created,
        author,
    })
}

// --- tests -------------------------------------------------------------------
