use thiserror::Error;
use tracing::debug;

use crate::extract::GraphRole;
use crate::nanopub::Nanopub;
use crate::rdf::graph_iri;
use crate::signing::Signer;

/// Errors returned when a [`Nanopub`] fails structural validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("nanopub structure could not be recovered; no graphs to validate")]
    Unstructured,

    #[error("the {0} and {1} graphs must have distinct identifiers")]
    SharedGraph(GraphRole, GraphRole),

    #[error("the {0} graph must contain at least one statement")]
    EmptyGraph(GraphRole),

    #[error("statement outside the four nanopub graphs, in graph {0:?}")]
    StrayStatement(String),

    #[error("creation date must be an ISO 8601 date-time, got: {0:?}")]
    InvalidTimestamp(String),
}

/// Validate the four-graph structure of a [`Nanopub`].
///
/// Returns `Ok(())` if the nanopub is well formed, or the first
/// [`ValidationError`] found. Checks run in this order: structure present,
/// distinct graph identifiers, non-empty content graphs, no stray
/// statements, parseable creation date.
pub fn validate_nanopub(np: &Nanopub) -> Result<(), ValidationError> {
    let graphs = np.graphs().ok_or(ValidationError::Unstructured)?;

    for (i, a) in GraphRole::ALL.iter().enumerate() {
        for b in &GraphRole::ALL[i + 1..] {
            if graphs.get(*a) == graphs.get(*b) {
                return Err(ValidationError::SharedGraph(*a, *b));
            }
        }
    }

    for role in [GraphRole::Assertion, GraphRole::Provenance, GraphRole::Pubinfo] {
        if np.graph_quads(role).next().is_none() {
            return Err(ValidationError::EmptyGraph(role));
        }
    }

    for quad in np.quads() {
        match graph_iri(&quad.graph_name) {
            Some(g) if graphs.role_of(g).is_some() => {}
            other => {
                return Err(ValidationError::StrayStatement(
                    other.unwrap_or("default").to_string(),
                ))
            }
        }
    }

    if let Some(created) = np.date_created() {
        validate_timestamp(created)
            .map_err(|_| ValidationError::InvalidTimestamp(created.to_string()))?;
    }

    Ok(())
}

/// Combined structural and signature verdict for one nanopub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub structure_valid: bool,
    pub signature_valid: bool,
    /// Human-readable reasons for every failed check.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.structure_valid && self.signature_valid
    }
}

/// Validate structure, then ask `signer` whether the embedded signature
/// holds.
pub fn validate_with_signer(np: &Nanopub, signer: &dyn Signer) -> ValidationReport {
    let mut errors = Vec::new();

    let structure_valid = match validate_nanopub(np) {
        Ok(()) => true,
        Err(e) => {
            errors.push(e.to_string());
            false
        }
    };

    let signature_valid = if np.is_signed() {
        let valid = np.has_valid_signature(signer);
        if !valid {
            errors.push("embedded signature does not verify".to_string());
        }
        valid
    } else {
        errors.push("nanopub is not signed".to_string());
        false
    };

    debug!(
        "validation: {} structure={structure_valid} signature={signature_valid}",
        np.uri().unwrap_or("<unstructured>")
    );

    ValidationReport {
        structure_valid,
        signature_valid,
        errors,
    }
}

// --- helpers -----------------------------------------------------------------

fn validate_timestamp(s: &str) -> Result<(), ()> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|_| ())
        .map_err(|_| ())
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::RdfFormat;
    use crate::signing::tests::{profile, FakeSigner};
    use crate::vocab::DEFAULT_TEMP_BASE_URI;
    use oxrdf::{GraphName, NamedNode, Quad};

    const HEADER: &str = r#"
        @prefix np: <http://www.nanopub.org/nschema#> .
        @prefix prov: <http://www.w3.org/ns/prov#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix ex: <http://example.org/> .
        @prefix this: <http://example.org/np1> .
        @prefix sub: <http://example.org/np1/> .
    "#;

    fn load(body: &str) -> Nanopub {
        Nanopub::from_rdf(&format!("{HEADER}{body}"), RdfFormat::TriG)
            .expect("test nanopub should load")
    }

    fn assembled() -> Nanopub {
        let claim = Quad::new(
            NamedNode::new_unchecked("http://example.org/s"),
            NamedNode::new_unchecked("http://example.org/p"),
            NamedNode::new_unchecked("http://example.org/o"),
            GraphName::DefaultGraph,
        );
        Nanopub::from_parts(vec![claim], vec![], vec![], DEFAULT_TEMP_BASE_URI).unwrap()
    }

    #[test]
    fn assembled_nanopub_is_valid() {
        assert_eq!(validate_nanopub(&assembled()), Ok(()));
    }

    #[test]
    fn unstructured_load_fails() {
        let np = Nanopub::load("<http://a> <http://b> <http://c> .", RdfFormat::TriG);
        assert_eq!(validate_nanopub(&np), Err(ValidationError::Unstructured));
    }

    #[test]
    fn shared_graph_identifier_fails() {
        let np = load(
            r#"
            sub:Head {
                this: a np:Nanopublication ;
                    np:hasAssertion sub:content ;
                    np:hasProvenance sub:content ;
                    np:hasPublicationInfo sub:pubinfo .
            }
            sub:content { ex:a ex:b ex:c . }
            sub:pubinfo { this: ex:d ex:e . }
            "#,
        );
        assert_eq!(
            validate_nanopub(&np),
            Err(ValidationError::SharedGraph(GraphRole::Assertion, GraphRole::Provenance))
        );
    }

    #[test]
    fn empty_assertion_fails() {
        let np = load(
            r#"
            sub:Head {
                this: a np:Nanopublication ;
                    np:hasAssertion sub:assertion ;
                    np:hasProvenance sub:provenance ;
                    np:hasPublicationInfo sub:pubinfo .
            }
            sub:provenance { sub:assertion ex:b ex:c . }
            sub:pubinfo { this: ex:d ex:e . }
            "#,
        );
        assert_eq!(
            validate_nanopub(&np),
            Err(ValidationError::EmptyGraph(GraphRole::Assertion))
        );
    }

    #[test]
    fn stray_statement_fails() {
        let np = load(
            r#"
            sub:Head {
                this: a np:Nanopublication ;
                    np:hasAssertion sub:assertion ;
                    np:hasProvenance sub:provenance ;
                    np:hasPublicationInfo sub:pubinfo .
            }
            sub:assertion { ex:a ex:b ex:c . }
            sub:provenance { sub:assertion ex:b ex:c . }
            sub:pubinfo { this: ex:d ex:e . }
            ex:x ex:y ex:z .
            "#,
        );
        assert_eq!(
            validate_nanopub(&np),
            Err(ValidationError::StrayStatement("default".into()))
        );
    }

    #[test]
    fn unparseable_creation_date_fails() {
        let np = load(
            r#"
            sub:Head {
                this: a np:Nanopublication ;
                    np:hasAssertion sub:assertion ;
                    np:hasProvenance sub:provenance ;
                    np:hasPublicationInfo sub:pubinfo .
            }
            sub:assertion { ex:a ex:b ex:c . }
            sub:provenance { sub:assertion ex:b ex:c . }
            sub:pubinfo { this: prov:generatedAtTime "last tuesday" . }
            "#,
        );
        assert_eq!(
            validate_nanopub(&np),
            Err(ValidationError::InvalidTimestamp("last tuesday".into()))
        );
    }

    #[test]
    fn report_for_unsigned_nanopub() {
        let report = validate_with_signer(&assembled(), &FakeSigner::default());
        assert!(report.structure_valid);
        assert!(!report.signature_valid);
        assert!(!report.is_valid());
        assert_eq!(report.errors, vec!["nanopub is not signed".to_string()]);
    }

    #[test]
    fn report_for_signed_nanopub() {
        let signer = FakeSigner::default();
        let signed = assembled().sign(&signer, &profile()).unwrap();
        let report = validate_with_signer(&signed, &signer);
        assert!(report.is_valid(), "{:?}", report.errors);
    }
}
