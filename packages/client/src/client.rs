//! Querying, fetching and publishing against nanopub services.
//!
//! [`NanopubClient`] owns a `reqwest::Client` and a [`ClientConfig`]. The
//! services it talks to are interchangeable and individually unreliable, so
//! every multi-endpoint operation treats a per-endpoint failure as "try the
//! next one": the failure is logged with `warn!` and only exhaustion of the
//! whole candidate list reaches the caller.
//!
//! All network calls are awaited one after another; nothing fans out.
//! Dropping a future or a search stream abandons the work in flight.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use futures::Stream;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use nanopub::{vocab, Nanopub, Profile, RdfFormat, Signer};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::sparql::{ResultFormat, Row, SparqlOutput, SparqlResults, SPARQL_RESULTS_JSON};
use crate::templates::{
    pattern_params, text_params, things_params, Params, Search, SearchOptions, TriplePattern,
};

/// A lazily evaluated stream of result rows.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Row> + Send + 'a>>;

/// Format to request from [`NanopubClient::fetch_nanopub`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchFormat {
    #[default]
    TriG,
    JsonLd,
}

impl FetchFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            FetchFormat::TriG => RdfFormat::TriG.media_type(),
            FetchFormat::JsonLd => RdfFormat::JsonLd.media_type(),
        }
    }
}

/// A nanopub document as served, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedNanopub {
    TriG(String),
    JsonLd(serde_json::Value),
}

/// What a successful [`NanopubClient::publish`] reports.
#[derive(Debug)]
pub struct PublishOutcome {
    /// The canonical URI of the published nanopub.
    pub uri: String,
    /// The registry that accepted it.
    pub server: String,
    pub status: u16,
    /// The registry's response body, verbatim.
    pub body: String,
    /// The nanopub as sent, signed.
    pub nanopub: Nanopub,
}

/// Client for the nanopub query, status and registry services.
pub struct NanopubClient {
    http: Client,
    config: ClientConfig,
    signer: Option<(Arc<dyn Signer>, Profile)>,
}

impl NanopubClient {
    /// Create a new `NanopubClient`.
    ///
    /// # Arguments
    ///
    /// * `http` - pre-configured `reqwest::Client` (e.g. with a timeout).
    /// * `config` - the services to talk to.
    pub fn new(http: Client, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            signer: None,
        }
    }

    /// Sign unsigned nanopubs with `signer` as `profile` before publishing.
    pub fn with_signer(mut self, signer: Arc<dyn Signer>, profile: Profile) -> Self {
        self.signer = Some((signer, profile));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    // -----------------------------------------------------------------------
    // SPARQL
    // -----------------------------------------------------------------------

    /// Run a raw SPARQL query.
    ///
    /// A 2xx answer is decoded; a 4xx answer means "no results" and yields
    /// an empty output. A 5xx answer, a transport failure or a body that
    /// does not decode moves on to the next candidate.
    ///
    /// # Errors
    ///
    /// [`ClientError::QueryFailure`] once every candidate has failed.
    pub async fn query_sparql(
        &self,
        query: &str,
        format: ResultFormat,
    ) -> Result<SparqlOutput, ClientError> {
        let candidates = std::slice::from_ref(&self.config.sparql_endpoint);
        let mut attempts = Vec::new();

        for endpoint in candidates {
            let response = match self
                .http
                .get(endpoint)
                .query(&[("query", query)])
                .header(ACCEPT, format.media_type())
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!("query: SPARQL endpoint {endpoint} unreachable: {e}");
                    attempts.push(format!("{endpoint}: {e}"));
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                match decode_sparql(response, format).await {
                    Ok(output) => return Ok(output),
                    Err(e) => {
                        warn!("query: undecodable answer from SPARQL endpoint {endpoint}: {e}");
                        attempts.push(format!("{endpoint}: {e}"));
                        continue;
                    }
                }
            }
            if status.is_client_error() {
                debug!("query: {endpoint} answered {status}; treating as no results");
                return Ok(SparqlOutput::empty(format));
            }
            warn!("query: SPARQL endpoint {endpoint} returned {status}");
            attempts.push(format!("{endpoint}: status {}", status.as_u16()));
        }

        Err(ClientError::QueryFailure { attempts })
    }

    // -----------------------------------------------------------------------
    // Templated search
    // -----------------------------------------------------------------------

    /// Run a query template on every configured endpoint in turn and stream
    /// the rows.
    ///
    /// An endpoint that fails is logged and contributes nothing; the stream
    /// then continues with the next one. Endpoints serve overlapping data, so
    /// the same row may appear more than once.
    pub fn run_template<'a>(&'a self, template_id: &'a str, params: Params) -> RowStream<'a> {
        Box::pin(stream! {
            for endpoint in &self.config.endpoints {
                match self.template_rows(endpoint, template_id, &params).await {
                    Ok(rows) => {
                        debug!("query: {} rows for {template_id} from {endpoint}", rows.len());
                        for row in rows {
                            yield row;
                        }
                    }
                    Err(e) => warn!("query: template {template_id} failed on {endpoint}: {e}"),
                }
            }
        })
    }

    async fn template_rows(
        &self,
        endpoint: &str,
        template_id: &str,
        params: &Params,
    ) -> Result<Vec<Row>, ClientError> {
        let url = format!("{}/api/{}", endpoint.trim_end_matches('/'), template_id);
        let response = self
            .http
            .get(&url)
            .query(params)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }
        let results: SparqlResults = response.json().await?;
        Ok(results.into_rows())
    }

    /// Full-text search over nanopub labels. An empty `text` yields nothing.
    pub fn find_nanopubs_with_text(&self, text: &str, options: &SearchOptions) -> RowStream<'_> {
        if text.is_empty() {
            return Box::pin(futures::stream::empty());
        }
        let template = Search::Text.template_id(options.validated_only);
        self.run_template(template, text_params(text, options))
    }

    /// Nanopubs whose assertion matches a triple pattern.
    pub fn find_nanopubs_with_pattern(
        &self,
        pattern: &TriplePattern,
        options: &SearchOptions,
    ) -> RowStream<'_> {
        let template = Search::Pattern.template_id(options.validated_only);
        self.run_template(template, pattern_params(pattern, options))
    }

    /// Things of `thing_type` whose labels match `term` (everything when
    /// `None`).
    pub fn find_things(
        &self,
        thing_type: &str,
        term: Option<&str>,
        options: &SearchOptions,
    ) -> RowStream<'_> {
        let template = Search::Things.template_id(options.validated_only);
        self.run_template(template, things_params(thing_type, term, options))
    }

    /// URIs of nanopubs that retract `uri`. Empty when nothing was found or
    /// no endpoint answered.
    pub async fn find_retractions_of(&self, uri: &str) -> Vec<String> {
        self.lookup_retractions(uri).await.unwrap_or_default()
    }

    /// Like [`find_retractions_of`](Self::find_retractions_of), but fails
    /// with [`ClientError::QueryFailure`] when every endpoint failed, so that
    /// "no retraction" is only reported when some endpoint said so.
    pub(crate) async fn lookup_retractions(&self, uri: &str) -> Result<Vec<String>, ClientError> {
        let pattern = TriplePattern::new()
            .predicate(vocab::NPX_RETRACTS)
            .object(uri);
        let options = SearchOptions::default();
        let template = Search::Pattern.template_id(options.validated_only);
        let params = pattern_params(&pattern, &options);

        let mut attempts = Vec::new();
        let mut answered = false;
        let mut retractions = Vec::new();
        for endpoint in &self.config.endpoints {
            match self.template_rows(endpoint, template, &params).await {
                Ok(rows) => {
                    answered = true;
                    retractions.extend(rows.into_iter().filter_map(|mut row| row.remove("np")));
                }
                Err(e) => {
                    warn!("query: retraction lookup failed on {endpoint}: {e}");
                    attempts.push(format!("{endpoint}: {e}"));
                }
            }
        }

        if answered {
            Ok(retractions)
        } else {
            Err(ClientError::QueryFailure { attempts })
        }
    }

    // -----------------------------------------------------------------------
    // Fetch
    // -----------------------------------------------------------------------

    /// Download a nanopub in the requested format.
    ///
    /// # Errors
    ///
    /// - [`ClientError::FetchFailure`] on a non-2xx response.
    /// - [`ClientError::Http`] on transport or JSON decoding failure.
    pub async fn fetch_nanopub(
        &self,
        uri: &str,
        format: FetchFormat,
    ) -> Result<FetchedNanopub, ClientError> {
        let response = self
            .http
            .get(uri)
            .header(ACCEPT, format.media_type())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!("fetch: {uri} returned {status}");
            return Err(ClientError::FetchFailure {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(match format {
            FetchFormat::TriG => FetchedNanopub::TriG(response.text().await?),
            FetchFormat::JsonLd => FetchedNanopub::JsonLd(response.json().await?),
        })
    }

    /// Download a nanopub as TriG and load it leniently.
    ///
    /// The returned nanopub remembers where it came from. A document that is
    /// not a well-formed nanopub is still returned; see
    /// [`Nanopub::issue`].
    pub async fn fetch(&self, uri: &str) -> Result<Nanopub, ClientError> {
        let url = normalize_purl(uri);
        let text = match self.fetch_nanopub(&url, FetchFormat::TriG).await? {
            FetchedNanopub::TriG(text) => text,
            FetchedNanopub::JsonLd(value) => value.to_string(),
        };
        Ok(Nanopub::load(&text, RdfFormat::TriG).with_source_url(url))
    }

    // -----------------------------------------------------------------------
    // Publish
    // -----------------------------------------------------------------------

    /// Publish a nanopub to `server`, or to the configured registry.
    ///
    /// An unsigned nanopub is signed first with the client's signer; an
    /// unsigned artifact is never sent.
    ///
    /// # Errors
    ///
    /// - [`ClientError::SigningRequired`] if signing is needed but no signer
    ///   is configured.
    /// - [`ClientError::Nanopub`] if signing or serialization fails.
    /// - [`ClientError::PublishFailure`] on a non-2xx response, carrying
    ///   status and body.
    pub async fn publish(
        &self,
        nanopub: Nanopub,
        server: Option<&str>,
    ) -> Result<PublishOutcome, ClientError> {
        let nanopub = if nanopub.is_signed() {
            nanopub
        } else {
            let (signer, profile) = self.signer.as_ref().ok_or(ClientError::SigningRequired)?;
            nanopub.sign(signer.as_ref(), profile)?
        };

        let uri = nanopub.require_uri()?.to_string();
        let body = nanopub.to_rdf(RdfFormat::TriG)?;
        let server = server.unwrap_or(self.config.registry_url.as_str()).to_string();

        let response = self
            .http
            .post(&server)
            .header(CONTENT_TYPE, RdfFormat::TriG.media_type())
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("publish: {server} rejected {uri} with {status}");
            return Err(ClientError::PublishFailure {
                server,
                status: status.as_u16(),
                body,
            });
        }

        info!("publish: {uri} accepted by {server}");
        Ok(PublishOutcome {
            uri,
            server,
            status: status.as_u16(),
            body,
            nanopub,
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

async fn decode_sparql(response: Response, format: ResultFormat) -> Result<SparqlOutput, ClientError> {
    Ok(match format {
        ResultFormat::Json => {
            let results: SparqlResults = response.json().await?;
            SparqlOutput::Rows(results.into_rows())
        }
        ResultFormat::Csv => SparqlOutput::Text(response.text().await?),
    })
}

/// purl.org serves nanopubs over plain http only.
fn normalize_purl(uri: &str) -> String {
    match uri.strip_prefix("https://purl.org/np/") {
        Some(rest) => format!("http://purl.org/np/{rest}"),
        None => uri.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
