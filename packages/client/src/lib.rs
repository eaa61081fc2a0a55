//! Resilient query and publish client for nanopublication services.
//!
//! Query services are mirrors of one another, so every read operation
//! tolerates individual endpoints being down: SPARQL queries fail only when
//! no candidate answers, templated searches stream whatever the healthy
//! endpoints return, and update-status checks try shuffled mirrors until one
//! responds.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`NanopubClient`]: SPARQL, templated search, fetch, publish |
//! | [`status`] | [`UpdateStatus`] checks against the grlc status APIs |
//! | [`templates`] | Query template identifiers and search parameters |
//! | [`sparql`] | SPARQL JSON results |
//! | [`config`] | [`ClientConfig`] and the default service lists |
//! | [`error`] | [`ClientError`] |

pub mod client;
pub mod config;
pub mod error;
pub mod sparql;
pub mod status;
pub mod templates;

pub use client::{FetchFormat, FetchedNanopub, NanopubClient, PublishOutcome, RowStream};
pub use config::ClientConfig;
pub use error::ClientError;
pub use sparql::{ResultFormat, Row, SparqlOutput};
pub use status::{StatusKind, UpdateStatus};
pub use templates::{Search, SearchOptions, TriplePattern};
