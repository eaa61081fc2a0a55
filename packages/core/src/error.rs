use thiserror::Error;

use crate::extract::MalformedNanopub;
use crate::rdf::{ParseError, SerializeError};
use crate::signing::SigningError;

/// Everything that can go wrong building, loading, signing or serializing a
/// [`Nanopub`](crate::Nanopub).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NanopubError {
    #[error("malformed nanopublication: {0}")]
    Malformed(#[from] MalformedNanopub),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error("invalid IRI {iri:?}: {message}")]
    InvalidIri { iri: String, message: String },

    #[error("nanopub structure could not be recovered")]
    Unstructured,
}
