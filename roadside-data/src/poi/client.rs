//! Overpass client with redundant endpoints.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use roadside_core::{Poi, PoiFetchError, PoiQuery, PoiSource};

use crate::http::{BlockingBridge, ProviderBuildError, USER_AGENT, build_client};

use super::overpass::{OverpassResponse, build_query};

/// Public Overpass instances tried in order; the first to answer wins.
const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.openstreetmap.fr/api/interpreter",
];

const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Configuration for [`OverpassClient`].
#[derive(Debug, Clone)]
pub struct OverpassClientConfig {
    /// Endpoint URLs tried in order.
    pub endpoints: Vec<String>,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassClientConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.map(str::to_owned).to_vec(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl OverpassClientConfig {
    /// Create a configuration with a single endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoints: vec![endpoint.into()],
            ..Default::default()
        }
    }

    /// Set the full endpoint list.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// POI fetcher against a list of redundant Overpass endpoints.
///
/// A reachable service that finds nothing yields `Ok` with an empty list;
/// [`PoiFetchError::AllEndpointsFailed`] means the result is unknown, not
/// empty. Each attempt carries its own timeout, and a decode failure of a
/// successful response is surfaced as [`PoiFetchError::Parse`] rather than
/// rotating, since the service did answer.
#[derive(Debug)]
pub struct OverpassClient {
    client: Client,
    bridge: BlockingBridge,
    config: OverpassClientConfig,
}

impl OverpassClient {
    /// Create a client with the default public endpoints.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassClientConfig::default())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn with_config(config: OverpassClientConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(config.timeout, &config.user_agent)?;
        let bridge = BlockingBridge::new()?;
        Ok(Self {
            client,
            bridge,
            config,
        })
    }

    async fn fetch_async(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiFetchError> {
        let ql = build_query(query, self.config.timeout.as_secs())?;

        let mut last_error = String::from("no endpoints configured");
        for endpoint in &self.config.endpoints {
            match self.try_endpoint(endpoint, &ql).await {
                Ok(pois) => {
                    debug!("{endpoint} answered with {} raw POIs", pois.len());
                    return Ok(pois);
                }
                Err(AttemptError::Transport(message)) => {
                    warn!("Overpass endpoint {endpoint} failed: {message}");
                    last_error = message;
                }
                Err(AttemptError::Decode(err)) => return Err(err),
            }
        }

        Err(PoiFetchError::AllEndpointsFailed {
            attempts: self.config.endpoints.len(),
            last_error,
        })
    }

    async fn try_endpoint(&self, endpoint: &str, ql: &str) -> Result<Vec<Poi>, AttemptError> {
        let response = self
            .client
            .post(endpoint)
            .form(&[("data", ql)])
            .send()
            .await
            .map_err(|err| AttemptError::Transport(err.to_string()))?
            .error_for_status()
            .map_err(|err| AttemptError::Transport(err.to_string()))?;

        let decoded: OverpassResponse = response.json().await.map_err(|err| {
            AttemptError::Decode(PoiFetchError::Parse {
                message: err.to_string(),
            })
        })?;

        Ok(decoded
            .elements
            .into_iter()
            .filter_map(super::overpass::Element::into_poi)
            .collect())
    }
}

/// Internal distinction between "rotate to the next endpoint" and "stop".
enum AttemptError {
    Transport(String),
    Decode(PoiFetchError),
}

impl PoiSource for OverpassClient {
    fn fetch(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiFetchError> {
        self.bridge.block_on(self.fetch_async(query))
    }
}
