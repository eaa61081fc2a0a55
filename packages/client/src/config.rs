//! Client configuration, populated from environment variables.

/// Query service used when no endpoints are configured.
pub const DEFAULT_QUERY_ENDPOINT: &str = "https://query.knowledgepixels.com/";

/// Full SPARQL repository behind the default query service.
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.knowledgepixels.com/repo/full";

/// grlc APIs answering `get_latest_version`. See https://monitor.np.trustyuri.net.
pub const DEFAULT_STATUS_ENDPOINTS: [&str; 2] = [
    "https://grlc.nps.knowledgepixels.com/api/local/local/",
    "https://grlc.services.np.trustyuri.net/api/local/local/",
];

/// Production nanopub registries.
pub const REGISTRY_SERVERS: [&str; 3] = [
    "https://registry.petapico.org/np/",
    "https://registry.knowledgepixels.com/np/",
    "https://registry.np.trustyuri.net/np/",
];

/// Registry that accepts throwaway nanopubs. Publishing defaults here.
pub const TEST_REGISTRY_SERVER: &str = "https://test.registry.knowledgepixels.com/np/";

/// Runtime configuration for a [`NanopubClient`](crate::NanopubClient).
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `NANOPUB_QUERY_ENDPOINTS` | [`DEFAULT_QUERY_ENDPOINT`] | Comma-separated query services for templated search |
/// | `NANOPUB_SPARQL_ENDPOINT` | [`DEFAULT_SPARQL_ENDPOINT`] | Endpoint for raw SPARQL |
/// | `NANOPUB_STATUS_ENDPOINTS` | [`DEFAULT_STATUS_ENDPOINTS`] | Comma-separated grlc APIs for update status |
/// | `NANOPUB_REGISTRY_URL` | [`TEST_REGISTRY_SERVER`] | Where [`publish`](crate::NanopubClient::publish) posts by default |
///
/// Timeouts are not configured here; they belong to the `reqwest::Client`
/// handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Interchangeable query services, tried in order by templated search.
    pub endpoints: Vec<String>,

    pub sparql_endpoint: String,

    /// grlc APIs, shuffled on every status check.
    pub status_endpoints: Vec<String>,

    /// Default publish target.
    pub registry_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_QUERY_ENDPOINT.to_string()],
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            status_endpoints: DEFAULT_STATUS_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            registry_url: TEST_REGISTRY_SERVER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            endpoints: var("NANOPUB_QUERY_ENDPOINTS")
                .map(|v| split_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.endpoints),
            sparql_endpoint: var("NANOPUB_SPARQL_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.sparql_endpoint),
            status_endpoints: var("NANOPUB_STATUS_ENDPOINTS")
                .map(|v| split_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.status_endpoints),
            registry_url: var("NANOPUB_REGISTRY_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.registry_url),
        }
    }

    /// Replace the query endpoints. An empty list falls back to
    /// [`DEFAULT_QUERY_ENDPOINT`].
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints: Vec<String> = endpoints.into_iter().map(Into::into).collect();
        self.endpoints = if endpoints.is_empty() {
            vec![DEFAULT_QUERY_ENDPOINT.to_string()]
        } else {
            endpoints
        };
        self
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// --- tests -------------------------------------------------------------------
