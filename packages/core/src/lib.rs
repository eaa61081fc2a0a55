//! Graph model for nanopublications.
//!
//! A nanopublication is a small RDF dataset of four named graphs: a *head*
//! that declares the nanopub and links the other three, the *assertion*, its
//! *provenance*, and *publication info*. This crate recovers that structure
//! from arbitrary quads, builds new nanopubs from their parts, projects them
//! into an ordered and abbreviated view for display, and replaces them
//! wholesale after an external engine has signed them.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rdf`] | Parsing and serializing TriG, Turtle, N-Quads, N-Triples |
//! | [`prefixes`] | Prefix mappings and CURIE abbreviation |
//! | [`extract`] | Locating the four graphs via [`extract_metadata`] |
//! | [`display`] | The ordered display projection |
//! | [`nanopub`] | The [`Nanopub`] value: construct, load, sign, rehydrate, serialize |
//! | [`signing`] | The [`Signer`] contract for external signing engines |
//! | [`validation`] | Structural checks via [`validate_nanopub`] |
//! | [`render`] | Plain-text rendering |
//! | [`trusty`] | Trusty URI helpers |
//! | [`vocab`] | Vocabulary IRIs |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use nanopub::{Nanopub, RdfFormat, GraphRole, DEFAULT_TEMP_BASE_URI};
//!
//! let np = Nanopub::from_parts(assertion, vec![], vec![], DEFAULT_TEMP_BASE_URI)?;
//! for (subject, predicates) in np.display().graph(GraphRole::Assertion).unwrap() {
//!     println!("{subject}: {predicates:?}");
//! }
//!
//! let signed = np.sign(&signer, &profile)?;
//! println!("{}", signed.to_rdf(RdfFormat::TriG)?);
//! ```

pub mod display;
pub mod error;
pub mod extract;
pub mod nanopub;
pub mod prefixes;
pub mod rdf;
pub mod render;
pub mod signing;
pub mod trusty;
pub mod validation;
pub mod vocab;

pub use display::{build_display_projection, DisplayGraph, DisplayProjection, DisplayValue, TermKind};
pub use error::NanopubError;
pub use extract::{extract_metadata, GraphRole, MalformedNanopub, NanopubGraphs, NanopubInfo};
pub use nanopub::{temp_base_uri, Nanopub};
pub use prefixes::Prefixes;
pub use rdf::{parse, parse_partial, serialize, ParseError, ParsedRdf, RdfFormat, SerializeError};
pub use render::render_nanopub;
pub use signing::{KeyPair, Profile, SignedNanopub, Signer, SigningError};
pub use trusty::{artifact_code, is_trusty_uri, short_code};
pub use validation::{validate_nanopub, validate_with_signer, ValidationError, ValidationReport};
pub use vocab::DEFAULT_TEMP_BASE_URI;

/// The `oxrdf` term types nanopub quads are built from.
pub use oxrdf;
