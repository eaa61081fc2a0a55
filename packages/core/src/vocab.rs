//! IRIs of the vocabularies a nanopublication is built from.
//!
//! Only the terms this crate actually reads or writes are listed. Namespace
//! constants end with their separator so a local name can be appended
//! directly.

/// `rdf:` namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// `xsd:` namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// Nanopublication schema namespace (`np:`).
pub const NP: &str = "http://www.nanopub.org/nschema#";
/// Nanopublication extensions namespace (`npx:`).
pub const NPX: &str = "http://purl.org/nanopub/x/";
/// W3C PROV-O namespace (`prov:`).
pub const PROV: &str = "http://www.w3.org/ns/prov#";
/// Dublin Core elements (`dc:`).
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
/// Dublin Core terms (`dct:`).
pub const DCT: &str = "http://purl.org/dc/terms/";
/// ORCID identifiers (`orcid:`).
pub const ORCID: &str = "https://orcid.org/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

pub const NP_NANOPUBLICATION: &str = "http://www.nanopub.org/nschema#Nanopublication";
pub const NP_HAS_ASSERTION: &str = "http://www.nanopub.org/nschema#hasAssertion";
pub const NP_HAS_PROVENANCE: &str = "http://www.nanopub.org/nschema#hasProvenance";
pub const NP_HAS_PUBLICATION_INFO: &str = "http://www.nanopub.org/nschema#hasPublicationInfo";

/// `npx:retracts`: links a retraction nanopub to the nanopub it retracts.
pub const NPX_RETRACTS: &str = "http://purl.org/nanopub/x/retracts";

/// Local name of the property carrying an embedded signature
/// (`npx:hasSignature`). Matched as a suffix so that older signature
/// vocabularies are recognised too.
pub const SIGNATURE_PROPERTY: &str = "hasSignature";

pub const PROV_GENERATED_AT_TIME: &str = "http://www.w3.org/ns/prov#generatedAtTime";
pub const PROV_WAS_ATTRIBUTED_TO: &str = "http://www.w3.org/ns/prov#wasAttributedTo";
pub const DCT_CREATED: &str = "http://purl.org/dc/terms/created";
pub const DCT_CREATOR: &str = "http://purl.org/dc/terms/creator";

pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// Conventional temporary base for nanopubs that have not been signed yet.
/// Signing replaces it with a permanent trusty URI.
pub const DEFAULT_TEMP_BASE_URI: &str = "http://purl.org/nanopub/temp/np/";
