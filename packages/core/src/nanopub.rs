//! The [`Nanopub`] value and its lifecycle.
//!
//! A nanopub comes into existence in one of three ways:
//!
//! - [`Nanopub::from_parts`]: caller-supplied assertion, provenance and
//!   pubinfo statements under a temporary base URI;
//! - [`Nanopub::from_rdf`] (strict) or [`Nanopub::load`] (lenient): parsed
//!   from complete RDF text;
//! - fetched by the client, which goes through [`Nanopub::load`].
//!
//! Signing and rehydration consume the value and hand back a new one. Nothing
//! mutates the quads of an existing nanopub.

use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use oxrdf::{GraphName, Literal, NamedNode, Quad};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::display::{build_display_projection, DisplayProjection};
use crate::error::NanopubError;
use crate::extract::{extract_metadata, GraphRole, NanopubGraphs, NanopubInfo};
use crate::prefixes::{Prefixes, SUB, THIS};
use crate::rdf::{
    distinct_quads, graph_iri, object_value, parse, parse_partial, serialize, RdfFormat,
    SerializeError,
};
use crate::signing::{Profile, Signer, SigningError};
use crate::vocab;

/// A fresh temporary base URI, unique per call.
///
/// Use it instead of [`vocab::DEFAULT_TEMP_BASE_URI`] when several unsigned
/// nanopubs must coexist in one store.
pub fn temp_base_uri() -> String {
    format!("http://purl.org/nanopub/temp/{}/", Uuid::now_v7())
}

/// A nanopublication: four named graphs plus the statements in them.
#[derive(Debug, Clone)]
pub struct Nanopub {
    uri: Option<String>,
    graphs: Option<NanopubGraphs>,
    quads: Vec<Quad>,
    prefixes: Prefixes,
    date_created: Option<String>,
    author: Option<String>,
    signature: Option<String>,
    source_url: Option<String>,
    issue: Option<NanopubError>,
    display: OnceLock<DisplayProjection>,
}

impl Nanopub {
    /// Assemble a nanopub from the statements of its three content graphs.
    ///
    /// Every caller quad is moved into the graph synthesized for its part
    /// (subject, predicate and object untouched), the head graph is written,
    /// and an empty provenance or pubinfo graph receives a
    /// `prov:generatedAtTime` statement so that no graph is empty. The
    /// identifiers are `base`, `base + "assertion"`, `base + "provenance"`,
    /// `base + "pubinfo"` and `base + "Head"`.
    ///
    /// # Errors
    ///
    /// - [`NanopubError::InvalidIri`] if `base` does not form valid IRIs.
    /// - [`NanopubError::Malformed`] if the result is not a well-formed
    ///   nanopub, e.g. when caller statements declare a second
    ///   `np:Nanopublication`.
    pub fn from_parts(
        assertion: Vec<Quad>,
        provenance: Vec<Quad>,
        pubinfo: Vec<Quad>,
        base: &str,
    ) -> Result<Self, NanopubError> {
        let iri = |suffix: &str| {
            let iri = format!("{base}{suffix}");
            NamedNode::new(iri.as_str()).map_err(|e| NanopubError::InvalidIri {
                iri,
                message: e.to_string(),
            })
        };
        let np = iri("")?;
        let head_graph = iri("Head")?;
        let assertion_graph = iri("assertion")?;
        let provenance_graph = iri("provenance")?;
        let pubinfo_graph = iri("pubinfo")?;

        let now = Literal::new_typed_literal(
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            NamedNode::new_unchecked(vocab::XSD_DATE_TIME),
        );
        let generated_at = NamedNode::new_unchecked(vocab::PROV_GENERATED_AT_TIME);

        let marker = NamedNode::new_unchecked(vocab::NP_NANOPUBLICATION);
        let mut quads = Vec::with_capacity(4 + assertion.len() + provenance.len() + pubinfo.len());
        let head = [
            (vocab::RDF_TYPE, &marker),
            (vocab::NP_HAS_ASSERTION, &assertion_graph),
            (vocab::NP_HAS_PROVENANCE, &provenance_graph),
            (vocab::NP_HAS_PUBLICATION_INFO, &pubinfo_graph),
        ];
        for (predicate, object) in head {
            quads.push(Quad::new(
                np.clone(),
                NamedNode::new_unchecked(predicate),
                object.clone(),
                head_graph.clone(),
            ));
        }

        quads.extend(move_into(assertion, &assertion_graph));
        if provenance.is_empty() {
            quads.push(Quad::new(
                assertion_graph.clone(),
                generated_at.clone(),
                now.clone(),
                provenance_graph.clone(),
            ));
        } else {
            quads.extend(move_into(provenance, &provenance_graph));
        }
        if pubinfo.is_empty() {
            quads.push(Quad::new(np.clone(), generated_at, now, pubinfo_graph.clone()));
        } else {
            quads.extend(move_into(pubinfo, &pubinfo_graph));
        }

        let mut prefixes = Prefixes::new();
        prefixes.insert(THIS, np.as_str());
        prefixes.insert(SUB, base);
        prefixes.extend_missing(&Prefixes::defaults());

        let nanopub = Self::from_quads(quads, prefixes)?;
        debug!(
            "nanopub: assembled {} with {} statements",
            np.as_str(),
            nanopub.quads.len()
        );
        Ok(nanopub)
    }

    /// Wrap an already complete quad set.
    ///
    /// # Errors
    ///
    /// [`NanopubError::Malformed`] if the four-graph structure is violated.
    /// Repeated statements are kept once.
    pub fn from_quads(quads: Vec<Quad>, prefixes: Prefixes) -> Result<Self, NanopubError> {
        let quads = distinct_quads(quads);
        let info = extract_metadata(&quads)?;
        Ok(Self::structured(quads, prefixes, info))
    }

    /// Parse complete RDF text. Parse and structure errors are returned.
    pub fn from_rdf(text: &str, format: RdfFormat) -> Result<Self, NanopubError> {
        let parsed = parse(text, format)?;
        Self::from_quads(parsed.quads, parsed.prefixes)
    }

    /// Parse complete RDF text, tolerating failure.
    ///
    /// Never fails. When the text does not parse, or parses into something
    /// that is not a nanopub, the result has no URI and no graphs, keeps
    /// whatever statements were read, and reports the failure via
    /// [`Nanopub::issue`]. On a syntax error, those are the statements that
    /// preceded it.
    pub fn load(text: &str, format: RdfFormat) -> Self {
        let parsed = match parse_partial(text, format) {
            (parsed, None) => parsed,
            (partial, Some(e)) => {
                warn!(
                    "nanopub: could not parse {format} document, keeping {} statements: {e}",
                    partial.quads.len()
                );
                return Self::unstructured(partial.quads, partial.prefixes, e.into());
            }
        };
        match extract_metadata(&parsed.quads) {
            Ok(info) => Self::structured(parsed.quads, parsed.prefixes, info),
            Err(e) => {
                warn!("nanopub: document is not a well-formed nanopublication: {e}");
                Self::unstructured(parsed.quads, parsed.prefixes, e.into())
            }
        }
    }

    fn structured(quads: Vec<Quad>, prefixes: Prefixes, info: NanopubInfo) -> Self {
        let signature = find_signature(&quads);
        Self {
            uri: Some(info.uri),
            graphs: Some(info.graphs),
            quads,
            prefixes,
            date_created: info.date_created,
            author: info.author,
            signature,
            source_url: None,
            issue: None,
            display: OnceLock::new(),
        }
    }

    fn unstructured(quads: Vec<Quad>, prefixes: Prefixes, issue: NanopubError) -> Self {
        let signature = find_signature(&quads);
        Self {
            uri: None,
            graphs: None,
            quads,
            prefixes,
            date_created: None,
            author: None,
            signature,
            source_url: None,
            issue: Some(issue),
            display: OnceLock::new(),
        }
    }

    /// Replace this nanopub with the one described by `signed_trig`.
    ///
    /// Signing rewrites every temporary identifier, so the old quads,
    /// prefixes and projection are discarded wholesale. Only the source URL
    /// carries over.
    pub fn rehydrate(self, signed_trig: &str) -> Result<Self, NanopubError> {
        let parsed = parse(signed_trig, RdfFormat::TriG)?;
        let mut prefixes = parsed.prefixes;
        prefixes.extend_missing(&Prefixes::defaults());
        let mut nanopub = Self::from_quads(parsed.quads, prefixes)?;
        nanopub.source_url = self.source_url;
        Ok(nanopub)
    }

    /// Sign through an external engine and rehydrate from its output.
    ///
    /// # Errors
    ///
    /// - [`SigningError::AlreadySigned`] (wrapped) if a signature is present.
    /// - [`NanopubError::Unstructured`] for a nanopub that failed to load.
    /// - whatever the signer or rehydration reports.
    pub fn sign(self, signer: &dyn Signer, profile: &Profile) -> Result<Self, NanopubError> {
        if self.is_signed() {
            return Err(SigningError::AlreadySigned.into());
        }
        self.require_uri()?;
        let unsigned = self.to_rdf(RdfFormat::TriG)?;
        let signed = signer.sign(&unsigned, profile)?;
        let mut nanopub = self.rehydrate(&signed.rdf)?;
        nanopub.signature = Some(signed.signature);
        info!("nanopub: signed as {}", signed.uri);
        Ok(nanopub)
    }

    /// Whether the embedded signature checks out. Unsigned nanopubs and
    /// signer failures both count as invalid.
    pub fn has_valid_signature(&self, signer: &dyn Signer) -> bool {
        if !self.is_signed() {
            return false;
        }
        let rdf = match self.to_rdf(RdfFormat::TriG) {
            Ok(rdf) => rdf,
            Err(e) => {
                warn!("nanopub: cannot serialize for verification: {e}");
                return false;
            }
        };
        match signer.verify(&rdf) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("nanopub: signature verification failed: {e}");
                false
            }
        }
    }

    /// Serialize every statement. Only graph-capable formats qualify.
    pub fn to_rdf(&self, format: RdfFormat) -> Result<String, NanopubError> {
        if !format.supports_graphs() {
            return Err(SerializeError::GraphsUnsupported(format).into());
        }
        Ok(serialize(&self.quads, format, &self.prefixes)?)
    }

    /// Serialize the statements of one graph, e.g. the assertion as Turtle.
    pub fn graph_to_rdf(&self, role: GraphRole, format: RdfFormat) -> Result<String, NanopubError> {
        if self.graphs.is_none() {
            return Err(NanopubError::Unstructured);
        }
        let quads: Vec<Quad> = self.graph_quads(role).cloned().collect();
        Ok(serialize(&quads, format, &self.prefixes)?)
    }

    /// The statements of one graph, in document order. Empty when the
    /// structure is unknown.
    pub fn graph_quads(&self, role: GraphRole) -> impl Iterator<Item = &Quad> + '_ {
        let graph = self.graphs.as_ref().map(|g| g.get(role));
        self.quads
            .iter()
            .filter(move |q| graph.is_some_and(|g| graph_iri(&q.graph_name) == Some(g)))
    }

    /// The display projection, built on first use and cached afterwards.
    pub fn display(&self) -> &DisplayProjection {
        self.display.get_or_init(|| match &self.graphs {
            Some(graphs) => build_display_projection(&self.quads, graphs, &self.prefixes),
            None => DisplayProjection::default(),
        })
    }

    /// The URI, or an error for a nanopub whose structure is unknown.
    pub fn require_uri(&self) -> Result<&str, NanopubError> {
        self.uri.as_deref().ok_or(NanopubError::Unstructured)
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn graphs(&self) -> Option<&NanopubGraphs> {
        self.graphs.as_ref()
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn date_created(&self) -> Option<&str> {
        self.date_created.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Where the document was fetched from, if it was fetched.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Why a lenient [`Nanopub::load`] could not recover the structure.
    pub fn issue(&self) -> Option<&NanopubError> {
        self.issue.as_ref()
    }
}

fn move_into(quads: Vec<Quad>, graph: &NamedNode) -> impl Iterator<Item = Quad> + '_ {
    quads.into_iter().map(move |mut quad| {
        quad.graph_name = GraphName::NamedNode(graph.clone());
        quad
    })
}

fn find_signature(quads: &[Quad]) -> Option<String> {
    quads
        .iter()
        .find(|q| q.predicate.as_str().ends_with(vocab::SIGNATURE_PROPERTY))
        .map(|q| object_value(&q.object))
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MalformedNanopub;
    use crate::signing::tests::{profile, FakeSigner, FAKE_SIGNATURE, SIGNED_BASE};
    use crate::vocab::DEFAULT_TEMP_BASE_URI;

    fn triple(s: &str, p: &str, o: &str) -> Quad {
        Quad::new(
            NamedNode::new_unchecked(s),
            NamedNode::new_unchecked(p),
            NamedNode::new_unchecked(o),
            GraphName::DefaultGraph,
        )
    }

    fn claim() -> Vec<Quad> {
        vec![triple(
            "http://example.org/mosquito",
            "http://example.org/transmits",
            "http://example.org/malaria",
        )]
    }

    fn assembled() -> Nanopub {
        Nanopub::from_parts(claim(), vec![], vec![], DEFAULT_TEMP_BASE_URI).unwrap()
    }

    const SIGNED_TRIG: &str = r#"
        @prefix np: <http://www.nanopub.org/nschema#> .
        @prefix npx: <http://purl.org/nanopub/x/> .
        @prefix prov: <http://www.w3.org/ns/prov#> .
        @prefix ex: <http://example.org/> .
        @prefix this: <https://w3id.org/np/RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk> .
        @prefix sub: <https://w3id.org/np/RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk/> .

        sub:Head {
            this: a np:Nanopublication ;
                np:hasAssertion sub:assertion ;
                np:hasProvenance sub:provenance ;
                np:hasPublicationInfo sub:pubinfo .
        }
        sub:assertion { ex:a ex:b ex:c . }
        sub:provenance { sub:assertion prov:wasDerivedFrom ex:paper . }
        sub:pubinfo {
            this: prov:wasAttributedTo ex:alice .
            sub:sig npx:hasSignature "c2lnbmF0dXJl" .
        }
    "#;

    #[test]
    fn from_parts_synthesizes_identifiers_and_head() {
        let np = assembled();
        assert_eq!(np.uri(), Some(DEFAULT_TEMP_BASE_URI));
        let graphs = np.graphs().unwrap();
        assert_eq!(graphs.head, format!("{DEFAULT_TEMP_BASE_URI}Head"));
        assert_eq!(graphs.assertion, format!("{DEFAULT_TEMP_BASE_URI}assertion"));
        assert_eq!(graphs.provenance, format!("{DEFAULT_TEMP_BASE_URI}provenance"));
        assert_eq!(graphs.pubinfo, format!("{DEFAULT_TEMP_BASE_URI}pubinfo"));
        assert_eq!(np.graph_quads(GraphRole::Head).count(), 4);
        assert!(np.issue().is_none());
        assert!(!np.is_signed());
    }

    #[test]
    fn from_parts_moves_caller_statements_into_their_graph() {
        let mut stray = claim();
        stray[0].graph_name = GraphName::NamedNode(NamedNode::new_unchecked("http://example.org/g"));
        let np = Nanopub::from_parts(stray, vec![], vec![], DEFAULT_TEMP_BASE_URI).unwrap();
        let assertion: Vec<&Quad> = np.graph_quads(GraphRole::Assertion).collect();
        assert_eq!(assertion.len(), 1);
        assert_eq!(assertion[0].subject.to_string(), "<http://example.org/mosquito>");
        assert!(np
            .quads()
            .iter()
            .all(|q| graph_iri(&q.graph_name) != Some("http://example.org/g")));
    }

    #[test]
    fn from_parts_fills_empty_provenance_and_pubinfo() {
        let np = assembled();
        let provenance: Vec<&Quad> = np.graph_quads(GraphRole::Provenance).collect();
        assert_eq!(provenance.len(), 1);
        assert_eq!(provenance[0].predicate.as_str(), vocab::PROV_GENERATED_AT_TIME);
        assert_eq!(
            provenance[0].subject.to_string(),
            format!("<{DEFAULT_TEMP_BASE_URI}assertion>")
        );

        let pubinfo: Vec<&Quad> = np.graph_quads(GraphRole::Pubinfo).collect();
        assert_eq!(pubinfo.len(), 1);
        assert_eq!(pubinfo[0].predicate.as_str(), vocab::PROV_GENERATED_AT_TIME);
        assert!(np.date_created().is_some());
        assert_eq!(np.quads().len(), 7);
    }

    #[test]
    fn from_parts_keeps_supplied_provenance() {
        let provenance = vec![triple(
            &format!("{DEFAULT_TEMP_BASE_URI}assertion"),
            "http://www.w3.org/ns/prov#wasDerivedFrom",
            "http://example.org/paper",
        )];
        let np = Nanopub::from_parts(claim(), provenance, vec![], DEFAULT_TEMP_BASE_URI).unwrap();
        let quads: Vec<&Quad> = np.graph_quads(GraphRole::Provenance).collect();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].predicate.as_str(), "http://www.w3.org/ns/prov#wasDerivedFrom");
    }

    #[test]
    fn from_parts_registers_this_and_sub() {
        let np = assembled();
        assert_eq!(np.prefixes().get(THIS), Some(DEFAULT_TEMP_BASE_URI));
        assert_eq!(np.prefixes().get(SUB), Some(DEFAULT_TEMP_BASE_URI));
        assert_eq!(np.prefixes().get("np"), Some(vocab::NP));
    }

    #[test]
    fn from_parts_rejects_second_nanopublication_marker() {
        let smuggled = vec![triple(
            "http://example.org/other",
            vocab::RDF_TYPE,
            vocab::NP_NANOPUBLICATION,
        )];
        let err = Nanopub::from_parts(smuggled, vec![], vec![], DEFAULT_TEMP_BASE_URI).unwrap_err();
        assert_eq!(err, NanopubError::Malformed(MalformedNanopub::MultipleHeads(2)));
    }

    #[test]
    fn from_parts_rejects_invalid_base() {
        let err = Nanopub::from_parts(claim(), vec![], vec![], "not an iri").unwrap_err();
        assert!(matches!(err, NanopubError::InvalidIri { .. }));
    }

    #[test]
    fn temp_base_uris_are_unique() {
        let a = temp_base_uri();
        let b = temp_base_uri();
        assert_ne!(a, b);
        assert!(a.starts_with("http://purl.org/nanopub/temp/"));
        assert!(a.ends_with('/'));
        assert!(Nanopub::from_parts(claim(), vec![], vec![], &a).is_ok());
    }

    #[test]
    fn trig_round_trip_preserves_structure() {
        let np = assembled();
        let text = np.to_rdf(RdfFormat::TriG).unwrap();
        let back = Nanopub::from_rdf(&text, RdfFormat::TriG).unwrap();
        assert_eq!(back.uri(), np.uri());
        assert_eq!(back.graphs(), np.graphs());
        assert_eq!(back.quads().len(), np.quads().len());
        for role in GraphRole::ALL {
            assert_eq!(back.graph_quads(role).count(), np.graph_quads(role).count());
        }
    }

    #[test]
    fn nquads_round_trip_preserves_structure() {
        let np = assembled();
        let text = np.to_rdf(RdfFormat::NQuads).unwrap();
        let back = Nanopub::from_rdf(&text, RdfFormat::NQuads).unwrap();
        assert_eq!(back.graphs(), np.graphs());
        assert_eq!(back.quads().len(), 7);
    }

    #[test]
    fn whole_nanopub_needs_graph_capable_format() {
        let err = assembled().to_rdf(RdfFormat::Turtle).unwrap_err();
        assert_eq!(
            err,
            NanopubError::Serialize(SerializeError::GraphsUnsupported(RdfFormat::Turtle))
        );
    }

    #[test]
    fn single_graph_excerpt_as_turtle() {
        let np = assembled();
        let ttl = np.graph_to_rdf(GraphRole::Assertion, RdfFormat::Turtle).unwrap();
        let parsed = parse(&ttl, RdfFormat::Turtle).unwrap();
        assert_eq!(parsed.quads.len(), 1);
        assert!(ttl.contains("http://example.org/"));
    }

    #[test]
    fn strict_load_reports_errors() {
        assert!(matches!(
            Nanopub::from_rdf("this is not trig {", RdfFormat::TriG),
            Err(NanopubError::Parse(_))
        ));
        assert!(matches!(
            Nanopub::from_rdf("<http://a> <http://b> <http://c> .", RdfFormat::TriG),
            Err(NanopubError::Malformed(MalformedNanopub::MissingHead))
        ));
    }

    #[test]
    fn lenient_load_never_fails() {
        let garbage = Nanopub::load("this is not trig {", RdfFormat::TriG);
        assert!(matches!(garbage.issue(), Some(NanopubError::Parse(_))));
        assert!(garbage.uri().is_none());
        assert!(garbage.graphs().is_none());
        assert!(garbage.display().is_empty());
        assert_eq!(garbage.require_uri(), Err(NanopubError::Unstructured));

        let headless = Nanopub::load("<http://a> <http://b> <http://c> .", RdfFormat::TriG);
        assert_eq!(
            headless.issue(),
            Some(&NanopubError::Malformed(MalformedNanopub::MissingHead))
        );
        assert_eq!(headless.quads().len(), 1);
        assert_eq!(headless.graph_quads(GraphRole::Assertion).count(), 0);
        assert_eq!(
            headless.graph_to_rdf(GraphRole::Assertion, RdfFormat::Turtle),
            Err(NanopubError::Unstructured)
        );
    }

    #[test]
    fn lenient_load_keeps_statements_before_a_syntax_error() {
        let text = "<http://example.org/s> <http://example.org/p> <http://example.org/o> <http://example.org/g> .\n\
                    <http://example.org/truncated> <http://example.org/p\n";
        let partial = Nanopub::load(text, RdfFormat::NQuads);
        assert!(matches!(partial.issue(), Some(NanopubError::Parse(_))));
        assert_eq!(partial.quads().len(), 1);
        assert!(partial.uri().is_none());
    }

    #[test]
    fn repeated_head_statement_loads_as_one_nanopub() {
        let doubled = SIGNED_TRIG.replace(
            "sub:assertion { ex:a ex:b ex:c . }",
            "sub:assertion { ex:a ex:b ex:c . ex:a ex:b ex:c . }\n\
             sub:Head { this: a np:Nanopublication . }",
        );
        let np = Nanopub::from_rdf(&doubled, RdfFormat::TriG).unwrap();
        assert_eq!(np.uri(), Some(SIGNED_BASE));
        assert_eq!(np.graph_quads(GraphRole::Head).count(), 4);

        let assertion = np.display().graph(GraphRole::Assertion).unwrap();
        assert_eq!(assertion["ex:a"]["ex:b"].len(), 1);
    }

    #[test]
    fn from_quads_drops_repeated_statements() {
        let np = Nanopub::from_rdf(SIGNED_TRIG, RdfFormat::TriG).unwrap();
        let mut quads = np.quads().to_vec();
        quads.extend(np.graph_quads(GraphRole::Head).cloned().collect::<Vec<_>>());
        let again = Nanopub::from_quads(quads, np.prefixes().clone()).unwrap();
        assert_eq!(again.quads().len(), np.quads().len());
    }

    #[test]
    fn embedded_signature_is_detected() {
        let np = Nanopub::load(SIGNED_TRIG, RdfFormat::TriG);
        assert!(np.issue().is_none());
        assert!(np.is_signed());
        assert_eq!(np.signature(), Some("c2lnbmF0dXJl"));
        assert_eq!(np.author(), Some("http://example.org/alice"));
        assert_eq!(np.uri(), Some(SIGNED_BASE));
    }

    #[test]
    fn display_is_computed_once() {
        let np = Nanopub::from_rdf(SIGNED_TRIG, RdfFormat::TriG).unwrap();
        let first = np.display();
        let second = np.display();
        assert!(std::ptr::eq(first, second));
        assert!(first.graph(GraphRole::Assertion).unwrap().contains_key("ex:a"));
    }

    #[test]
    fn sign_rehydrates_with_permanent_identifiers() {
        let signer = FakeSigner::default();
        let signed = assembled().sign(&signer, &profile()).unwrap();
        let uri = signed.uri().unwrap();
        assert!(uri.starts_with(SIGNED_BASE));
        assert!(signed.quads().iter().all(|q| !q.to_string().contains(DEFAULT_TEMP_BASE_URI)));
        assert_eq!(
            signed.graphs().unwrap().assertion,
            format!("{SIGNED_BASE}/assertion")
        );
        assert_eq!(signed.signature(), Some(FAKE_SIGNATURE));
        assert_eq!(signed.graph_quads(GraphRole::Assertion).count(), 1);
        assert!(signed.has_valid_signature(&signer));
    }

    #[test]
    fn signing_twice_is_refused() {
        let signer = FakeSigner::default();
        let signed = assembled().sign(&signer, &profile()).unwrap();
        let err = signed.sign(&signer, &profile()).unwrap_err();
        assert_eq!(err, NanopubError::Signing(SigningError::AlreadySigned));
    }

    #[test]
    fn signer_failure_is_propagated() {
        let signer = FakeSigner { fail: true };
        let err = assembled().sign(&signer, &profile()).unwrap_err();
        assert!(matches!(err, NanopubError::Signing(SigningError::Engine(_))));
    }

    #[test]
    fn verification_treats_unsigned_and_errors_as_invalid() {
        assert!(!assembled().has_valid_signature(&FakeSigner::default()));
        let signed = Nanopub::from_rdf(SIGNED_TRIG, RdfFormat::TriG).unwrap();
        assert!(!signed.has_valid_signature(&FakeSigner { fail: true }));
    }

    #[test]
    fn rehydrate_rejects_malformed_text() {
        let err = assembled()
            .rehydrate("<http://a> <http://b> <http://c> .")
            .unwrap_err();
        assert_eq!(err, NanopubError::Malformed(MalformedNanopub::MissingHead));
    }

    #[test]
    fn rehydrate_keeps_source_url() {
        let np = assembled().with_source_url("http://example.org/fetched");
        let back = np.rehydrate(SIGNED_TRIG).unwrap();
        assert_eq!(back.source_url(), Some("http://example.org/fetched"));
        assert_eq!(back.uri(), Some(SIGNED_BASE));
    }
}
