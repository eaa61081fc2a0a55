//! Update status: is this nanopub still the latest version?
//!
//! The grlc status APIs are interchangeable mirrors. Each check shuffles
//! them, then works through the shrinking list until one answers. Failure
//! of every mirror degrades to [`StatusKind::Error`]; status display must
//! never block on an unreachable service, so nothing here returns `Err`.

use rand::seq::SliceRandom;
use reqwest::header::ACCEPT;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::NanopubClient;
use crate::error::ClientError;
use crate::sparql::SparqlResults;

/// How a nanopub stands relative to later publications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    /// No newer version and not retracted.
    Latest,
    /// Superseded by one or more newer versions.
    NewerVersion,
    /// Retracted, with no live newer version.
    Retracted,
    /// Unknown to the status service, typically not indexed yet.
    Unpublished,
    /// Every status service failed.
    Error,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Latest => write!(f, "latest"),
            StatusKind::NewerVersion => write!(f, "newer-version"),
            StatusKind::Retracted => write!(f, "retracted"),
            StatusKind::Unpublished => write!(f, "unpublished"),
            StatusKind::Error => write!(f, "error"),
        }
    }
}

/// The classified status of one nanopub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatus {
    pub kind: StatusKind,
    /// A short explanation for display.
    pub message: String,
    /// The nanopub itself when latest, the newer versions, or the
    /// retracting nanopubs.
    pub uris: Vec<String>,
}

impl UpdateStatus {
    fn new(kind: StatusKind, message: impl Into<String>, uris: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            uris,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message, Vec::new())
    }
}

impl NanopubClient {
    /// Check whether `uri` is the latest version of its nanopub.
    ///
    /// `https://` URIs are looked up as `http://`, the scheme the stores
    /// index under. When the status service knows nothing about the URI,
    /// retractions are searched to tell a retracted nanopub from one that is
    /// merely unpublished.
    pub async fn get_update_status(&self, uri: &str) -> UpdateStatus {
        if uri.is_empty() {
            return UpdateStatus::error("No URI provided, cannot retrieve the nanopub status.");
        }
        let uri = normalize_scheme(uri);

        let mut candidates = self.config().status_endpoints.clone();
        candidates.shuffle(&mut rand::thread_rng());

        while let Some(api) = candidates.pop() {
            match self.latest_versions(&api, &uri).await {
                Ok(latest) => {
                    debug!("status: {api} answered for {uri}");
                    return self.classify(&uri, latest).await;
                }
                Err(e) => warn!("status: {api} failed for {uri}: {e}"),
            }
        }

        UpdateStatus::error("An error has occurred while checking for updates.")
    }

    async fn latest_versions(&self, api: &str, uri: &str) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/get_latest_version", api.trim_end_matches('/'));
        let response = self
            .http()
            .get(&url)
            .query(&[("np", uri)])
            .header(ACCEPT, "application/json")
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
        Ok(results
            .into_rows()
            .into_iter()
            .filter_map(|mut row| row.remove("latest"))
            .collect())
    }

    async fn classify(&self, uri: &str, latest: Vec<String>) -> UpdateStatus {
        if latest.len() == 1 && latest[0] == uri {
            return UpdateStatus::new(
                StatusKind::Latest,
                "This is the latest version.",
                vec![uri.to_string()],
            );
        }

        if latest.is_empty() {
            let retractions = match self.lookup_retractions(uri).await {
                Ok(retractions) => retractions,
                Err(e) => {
                    warn!("status: could not look up retractions of {uri}: {e}");
                    return UpdateStatus::error("An error has occurred while checking for updates.");
                }
            };
            return match retractions.first() {
                Some(first) => UpdateStatus::new(
                    StatusKind::Retracted,
                    format!("This nanopublication has been retracted by {first}."),
                    retractions.clone(),
                ),
                None => UpdateStatus::new(
                    StatusKind::Unpublished,
                    "This nanopublication has not been published yet, or is not indexed.",
                    Vec::new(),
                ),
            };
        }

        let newer: Vec<String> = latest.into_iter().filter(|l| l != uri).collect();
        let message = match newer.as_slice() {
            [only] => format!("This nanopublication has a newer version: {only}"),
            [first, ..] => {
                format!("This nanopublication has several newer versions: {first} (and others)")
            }
            [] => "This nanopublication has a newer version.".to_string(),
        };
        UpdateStatus::new(StatusKind::NewerVersion, message, newer)
    }
}

/// Stored nanopub URIs use `http`; users often paste `https`.
fn normalize_scheme(uri: &str) -> String {
    match uri.strip_prefix("https://") {
        Some(rest) => format!("http://{rest}"),
        None => uri.to_string(),
    }
}

// --- tests -------------------------------------------------------------------
