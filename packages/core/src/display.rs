//! The display projection: a nanopublication reshaped for presentation.
//!
//! For each of the four graphs the projection maps
//! `subject → predicate → [values]`, every term abbreviated to a CURIE
//! where a prefix is known. It is built in two phases: statements are first
//! collected, then sorted into an immutable value. Nothing here touches the
//! underlying quads.
//!
//! # Ordering
//!
//! - Subjects in the nanopub's own `sub:` namespace come first, then all
//!   others; within each group, abbreviated strings compare
//!   lexicographically.
//! - Predicates on the priority list (`a`, `rdfs:label`, `rdfs:comment`,
//!   `rdf:subject`, `rdf:predicate`, `rdf:object`) come first, in list
//!   order; everything else follows lexicographically.
//! - Values keep the order their statements appear in.

use std::cmp::Ordering;

use indexmap::IndexMap;
use oxrdf::{Quad, Subject, Term};
use serde::{Deserialize, Serialize};

use crate::extract::{GraphRole, NanopubGraphs};
use crate::prefixes::{Prefixes, SUB};
use crate::rdf::{graph_iri, object_value};
use crate::vocab;

/// Predicates shown before all others, in this order.
const PREDICATE_PRIORITY: [&str; 6] = [
    vocab::RDF_TYPE,
    vocab::RDFS_LABEL,
    vocab::RDFS_COMMENT,
    vocab::RDF_SUBJECT,
    vocab::RDF_PREDICATE,
    vocab::RDF_OBJECT,
];

/// The kind of RDF term behind a [`DisplayValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermKind {
    NamedNode,
    BlankNode,
    Literal,
}

/// One object value as shown to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayValue {
    /// CURIE or full IRI for named nodes, `_:label` for blank nodes, the
    /// lexical form for literals.
    pub value: String,
    pub kind: TermKind,
}

/// `subject → predicate → values`, in display order.
pub type DisplayGraph = IndexMap<String, IndexMap<String, Vec<DisplayValue>>>;

/// The ordered, abbreviated view of all four graphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayProjection {
    graphs: IndexMap<GraphRole, DisplayGraph>,
}

impl DisplayProjection {
    /// The projection of one graph. `None` only for a nanopub whose
    /// structure could not be recovered.
    pub fn graph(&self, role: GraphRole) -> Option<&DisplayGraph> {
        self.graphs.get(&role)
    }

    /// Graphs in presentation order (head, assertion, provenance, pubinfo).
    pub fn iter(&self) -> impl Iterator<Item = (GraphRole, &DisplayGraph)> {
        self.graphs.iter().map(|(role, graph)| (*role, graph))
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

/// Build the display projection of `quads` for the given graphs.
pub fn build_display_projection(
    quads: &[Quad],
    graphs: &NanopubGraphs,
    prefixes: &Prefixes,
) -> DisplayProjection {
    let mut projection = DisplayProjection::default();
    for (role, graph) in graphs.iter() {
        let collected = collect_graph(quads, graph, prefixes);
        projection.graphs.insert(role, order_graph(collected));
    }
    projection
}

// --- phase 1: collect --------------------------------------------------------

/// A predicate's values plus its rank on the priority list.
struct CollectedPredicate {
    rank: Option<usize>,
    values: Vec<DisplayValue>,
}

type CollectedGraph = IndexMap<String, IndexMap<String, CollectedPredicate>>;

fn collect_graph(quads: &[Quad], graph: &str, prefixes: &Prefixes) -> CollectedGraph {
    let mut collected = CollectedGraph::new();
    for quad in quads.iter().filter(|q| graph_iri(&q.graph_name) == Some(graph)) {
        let subject = display_subject(&quad.subject, prefixes);
        let predicate_iri = quad.predicate.as_str();
        let entry = collected
            .entry(subject)
            .or_default()
            .entry(prefixes.abbreviate(predicate_iri))
            .or_insert_with(|| CollectedPredicate {
                rank: PREDICATE_PRIORITY.iter().position(|p| *p == predicate_iri),
                values: Vec::new(),
            });
        entry.values.push(display_value(&quad.object, prefixes));
    }
    collected
}

#[allow(unreachable_patterns)]
fn display_subject(subject: &Subject, prefixes: &Prefixes) -> String {
    match subject {
        Subject::NamedNode(n) => prefixes.abbreviate(n.as_str()),
        Subject::BlankNode(b) => format!("_:{}", b.as_str()),
        other => other.to_string(),
    }
}

fn display_value(object: &Term, prefixes: &Prefixes) -> DisplayValue {
    match object {
        Term::NamedNode(n) => DisplayValue {
            value: prefixes.abbreviate(n.as_str()),
            kind: TermKind::NamedNode,
        },
        Term::BlankNode(b) => DisplayValue {
            value: format!("_:{}", b.as_str()),
            kind: TermKind::BlankNode,
        },
        other => DisplayValue {
            value: object_value(other),
            kind: TermKind::Literal,
        },
    }
}

// --- phase 2: order ----------------------------------------------------------

fn order_graph(mut collected: CollectedGraph) -> DisplayGraph {
    collected.sort_by(|a, _, b, _| compare_subjects(a, b));
    collected
        .into_iter()
        .map(|(subject, mut predicates)| {
            predicates.sort_by(|a_name, a, b_name, b| compare_predicates(a_name, a.rank, b_name, b.rank));
            let predicates = predicates
                .into_iter()
                .map(|(name, p)| (name, p.values))
                .collect();
            (subject, predicates)
        })
        .collect()
}

fn compare_subjects(a: &str, b: &str) -> Ordering {
    let internal = |s: &str| s.starts_with(SUB) && s[SUB.len()..].starts_with(':');
    internal(b).cmp(&internal(a)).then_with(|| a.cmp(b))
}

fn compare_predicates(a: &str, a_rank: Option<usize>, b: &str, b_rank: Option<usize>) -> Ordering {
    match (a_rank, b_rank) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// --- tests -------------------------------------------------------------------
