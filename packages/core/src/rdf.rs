//! RDF transcoding: text ⇄ quads.
//!
//! A thin layer over [`oxttl`] that parses the textual formats a
//! nanopublication travels in and serializes quad sets back out with a
//! caller-chosen prefix mapping. Prefix declarations met while parsing are
//! returned alongside the quads so they can drive CURIE abbreviation later.
//!
//! Triple-only formats (Turtle, N-Triples) land in the default graph when
//! parsed and drop graph names when serialized; they are meant for
//! single-graph excerpts. JSON-LD is recognised as a format name but not
//! transcoded.

use indexmap::IndexSet;
use oxrdf::{GraphName, Quad, Subject, Term, TripleRef};
use oxttl::{
    NQuadsParser, NQuadsSerializer, NTriplesParser, NTriplesSerializer, TriGParser,
    TriGSerializer, TurtleParser, TurtleSerializer,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prefixes::Prefixes;

/// A textual RDF syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// TriG. Quad-capable; the native format of a nanopublication.
    TriG,
    /// Turtle, triples only.
    Turtle,
    /// N-Quads: quad-capable, no prefixes.
    NQuads,
    /// N-Triples: triples only, no prefixes.
    NTriples,
    /// JSON-LD. Fetchable from servers, not transcoded locally.
    JsonLd,
}

impl RdfFormat {
    /// The media type used in `Accept` and `Content-Type` headers.
    pub fn media_type(self) -> &'static str {
        match self {
            RdfFormat::TriG => "application/trig",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NQuads => "application/n-quads",
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::JsonLd => "application/ld+json",
        }
    }

    /// Whether the syntax can carry named graphs, and therefore a whole
    /// nanopublication.
    pub fn supports_graphs(self) -> bool {
        matches!(self, RdfFormat::TriG | RdfFormat::NQuads | RdfFormat::JsonLd)
    }
}

impl std::fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RdfFormat::TriG => write!(f, "trig"),
            RdfFormat::Turtle => write!(f, "turtle"),
            RdfFormat::NQuads => write!(f, "nquads"),
            RdfFormat::NTriples => write!(f, "ntriples"),
            RdfFormat::JsonLd => write!(f, "jsonld"),
        }
    }
}

/// Parses a format from its short name or common file extension.
impl std::str::FromStr for RdfFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trig" => Ok(RdfFormat::TriG),
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "nquads" | "n-quads" | "nq" => Ok(RdfFormat::NQuads),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "jsonld" | "json-ld" => Ok(RdfFormat::JsonLd),
            _ => Err(format!(
                "unknown RDF format {:?}; expected one of: trig, turtle, nquads, ntriples, jsonld",
                s
            )),
        }
    }
}

/// Errors returned by [`parse`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0} cannot be parsed locally")]
    UnsupportedFormat(RdfFormat),

    #[error("invalid {format}: {message}")]
    Syntax { format: RdfFormat, message: String },
}

/// Errors returned by [`serialize`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("{0} cannot be serialized locally")]
    UnsupportedFormat(RdfFormat),

    #[error("{0} cannot hold named graphs; serialize a single graph instead")]
    GraphsUnsupported(RdfFormat),

    #[error("prefix {prefix:?} has an invalid namespace: {message}")]
    InvalidPrefix { prefix: String, message: String },

    #[error("write failed: {0}")]
    Write(String),
}

/// The result of [`parse`]: the statements plus every prefix declared in
/// the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRdf {
    pub quads: Vec<Quad>,
    pub prefixes: Prefixes,
}

/// Parse RDF text into quads.
///
/// Prefix declarations are collected from the parser as it streams through
/// the document. The parser hands them back unordered, so they are recorded
/// sorted by label to keep CURIE resolution stable between runs. A statement
/// written more than once is kept once.
pub fn parse(text: &str, format: RdfFormat) -> Result<ParsedRdf, ParseError> {
    match parse_partial(text, format) {
        (parsed, None) => Ok(parsed),
        (_, Some(e)) => Err(e),
    }
}

/// Parse up to the first syntax error.
///
/// Returns every statement and prefix read before the error together with
/// the error itself, if any.
pub fn parse_partial(text: &str, format: RdfFormat) -> (ParsedRdf, Option<ParseError>) {
    let syntax = |e: &dyn std::fmt::Display| ParseError::Syntax {
        format,
        message: e.to_string(),
    };

    let mut quads = Vec::new();
    let mut declared: Vec<(String, String)> = Vec::new();
    let mut error = None;

    match format {
        RdfFormat::TriG => {
            let mut reader = TriGParser::new().for_reader(text.as_bytes());
            while let Some(result) = reader.next() {
                match result {
                    Ok(quad) => quads.push(quad),
                    Err(e) => {
                        error = Some(syntax(&e));
                        break;
                    }
                }
            }
            declared.extend(
                reader
                    .prefixes()
                    .map(|(name, iri)| (name.to_string(), iri.to_string())),
            );
        }
        RdfFormat::Turtle => {
            let mut reader = TurtleParser::new().for_reader(text.as_bytes());
            while let Some(result) = reader.next() {
                match result {
                    Ok(triple) => quads.push(triple.in_graph(GraphName::DefaultGraph)),
                    Err(e) => {
                        error = Some(syntax(&e));
                        break;
                    }
                }
            }
            declared.extend(
                reader
                    .prefixes()
                    .map(|(name, iri)| (name.to_string(), iri.to_string())),
            );
        }
        RdfFormat::NQuads => {
            for result in NQuadsParser::new().for_reader(text.as_bytes()) {
                match result {
                    Ok(quad) => quads.push(quad),
                    Err(e) => {
                        error = Some(syntax(&e));
                        break;
                    }
                }
            }
        }
        RdfFormat::NTriples => {
            for result in NTriplesParser::new().for_reader(text.as_bytes()) {
                match result {
                    Ok(triple) => quads.push(triple.in_graph(GraphName::DefaultGraph)),
                    Err(e) => {
                        error = Some(syntax(&e));
                        break;
                    }
                }
            }
        }
        RdfFormat::JsonLd => {
            return (
                ParsedRdf::default(),
                Some(ParseError::UnsupportedFormat(format)),
            )
        }
    }

    declared.sort();
    let mut prefixes = Prefixes::new();
    for (name, iri) in declared {
        prefixes.insert(name, iri);
    }

    let parsed = ParsedRdf {
        quads: distinct_quads(quads),
        prefixes,
    };
    (parsed, error)
}

/// Drop repeated statements, keeping first occurrences in order.
pub(crate) fn distinct_quads(quads: Vec<Quad>) -> Vec<Quad> {
    let set: IndexSet<Quad> = quads.into_iter().collect();
    set.into_iter().collect()
}

/// Serialize quads as RDF text.
///
/// `prefixes` are declared in the output for the formats that support them
/// (TriG, Turtle) and ignored otherwise.
pub fn serialize(
    quads: &[Quad],
    format: RdfFormat,
    prefixes: &Prefixes,
) -> Result<String, SerializeError> {
    let write = |e: std::io::Error| SerializeError::Write(e.to_string());

    let bytes = match format {
        RdfFormat::TriG => {
            let mut serializer = TriGSerializer::new();
            for (name, namespace) in prefixes.iter() {
                serializer = serializer.with_prefix(name, namespace).map_err(|e| {
                    SerializeError::InvalidPrefix {
                        prefix: name.to_string(),
                        message: e.to_string(),
                    }
                })?;
            }
            let mut writer = serializer.for_writer(Vec::new());
            for quad in quads {
                writer.serialize_quad(quad).map_err(write)?;
            }
            writer.finish().map_err(write)?
        }
        RdfFormat::Turtle => {
            let mut serializer = TurtleSerializer::new();
            for (name, namespace) in prefixes.iter() {
                serializer = serializer.with_prefix(name, namespace).map_err(|e| {
                    SerializeError::InvalidPrefix {
                        prefix: name.to_string(),
                        message: e.to_string(),
                    }
                })?;
            }
            let mut writer = serializer.for_writer(Vec::new());
            for quad in quads {
                writer
                    .serialize_triple(TripleRef::new(&quad.subject, &quad.predicate, &quad.object))
                    .map_err(write)?;
            }
            writer.finish().map_err(write)?
        }
        RdfFormat::NQuads => {
            let mut writer = NQuadsSerializer::new().for_writer(Vec::new());
            for quad in quads {
                writer.serialize_quad(quad).map_err(write)?;
            }
            writer.finish()
        }
        RdfFormat::NTriples => {
            let mut writer = NTriplesSerializer::new().for_writer(Vec::new());
            for quad in quads {
                writer
                    .serialize_triple(TripleRef::new(&quad.subject, &quad.predicate, &quad.object))
                    .map_err(write)?;
            }
            writer.finish()
        }
        RdfFormat::JsonLd => return Err(SerializeError::UnsupportedFormat(format)),
    };

    String::from_utf8(bytes).map_err(|e| SerializeError::Write(e.to_string()))
}

// --- term helpers ------------------------------------------------------------

/// The IRI of a named graph, `None` for the default graph or a blank-node graph.
pub(crate) fn graph_iri(graph: &GraphName) -> Option<&str> {
    match graph {
        GraphName::NamedNode(n) => Some(n.as_str()),
        _ => None,
    }
}

/// The IRI of a subject, `None` for blank nodes (and quoted triples).
#[allow(unreachable_patterns)]
pub(crate) fn subject_iri(subject: &Subject) -> Option<&str> {
    match subject {
        Subject::NamedNode(n) => Some(n.as_str()),
        _ => None,
    }
}

/// The IRI of an object, `None` for literals and blank nodes.
pub(crate) fn object_iri(term: &Term) -> Option<&str> {
    match term {
        Term::NamedNode(n) => Some(n.as_str()),
        _ => None,
    }
}

/// The lexical value of an object: the IRI, the literal's value or the
/// blank node label.
#[allow(unreachable_patterns)]
pub(crate) fn object_value(term: &Term) -> String {
    match term {
        Term::NamedNode(n) => n.as_str().to_string(),
        Term::BlankNode(b) => b.as_str().to_string(),
        Term::Literal(l) => l.value().to_string(),
        other => other.to_string(),
    }
}

// --- tests -------------------------------------------------------------------
