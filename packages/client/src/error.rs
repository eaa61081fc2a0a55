use nanopub::NanopubError;

/// Errors returned by [`NanopubClient`](crate::NanopubClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Every candidate endpoint failed. One entry per attempt.
    #[error("query failed on every endpoint: {}", attempts.join("; "))]
    QueryFailure { attempts: Vec<String> },

    /// A single endpoint answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    BadStatus { url: String, status: u16 },

    /// The registry rejected a nanopub.
    #[error("publishing to {server} failed with status {status}: {body}")]
    PublishFailure {
        server: String,
        status: u16,
        body: String,
    },

    #[error("fetching {uri} failed with status {status}")]
    FetchFailure { uri: String, status: u16 },

    #[error("nanopub is unsigned and the client has no signer configured")]
    SigningRequired,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Nanopub(#[from] NanopubError),
}
