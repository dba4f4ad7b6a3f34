//! Primary geocoder against a Nominatim-style structured search endpoint.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use roadside_core::{GeocodeBackend, GeocodeError, position};

use crate::http::{BlockingBridge, ProviderBuildError, USER_AGENT, build_client};

use super::convert_reqwest_error;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One candidate match from the search endpoint.
///
/// Nominatim serialises coordinates as strings in its JSON output.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub(crate) lat: String,
    pub(crate) lon: String,
}

impl SearchHit {
    /// Decode and validate the hit's coordinate.
    pub(crate) fn coordinate(&self) -> Result<Coord<f64>, GeocodeError> {
        let lat: f64 = self.lat.parse().map_err(|_| GeocodeError::Parse {
            message: format!("invalid latitude '{}'", self.lat),
        })?;
        let lon: f64 = self.lon.parse().map_err(|_| GeocodeError::Parse {
            message: format!("invalid longitude '{}'", self.lon),
        })?;
        position(lat, lon).map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })
    }
}

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoderConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl NominatimGeocoderConfig {
    /// Create a configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Structured-search geocoder requesting a single best match.
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: Client,
    bridge: BlockingBridge,
    config: NominatimGeocoderConfig,
}

impl NominatimGeocoder {
    /// Create a geocoder with default configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(NominatimGeocoderConfig::default())
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(config.timeout, &config.user_agent)?;
        let bridge = BlockingBridge::new()?;
        Ok(Self {
            client,
            bridge,
            config,
        })
    }

    /// Build the search URL for a query, requesting one structured match.
    fn search_url(&self, place: &str) -> Result<Url, GeocodeError> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(
            &format!("{base}/search"),
            &[("format", "jsonv2"), ("limit", "1"), ("q", place)],
        )
        .map_err(|err| GeocodeError::Parse {
            message: format!("invalid search URL: {err}"),
        })
    }

    async fn resolve_async(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        let url = self.search_url(place)?;
        let url_text = url.to_string();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url_text, self.config.timeout))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, &url_text, self.config.timeout))?;

        let hits: Vec<SearchHit> = response.json().await.map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })?;

        match hits.first() {
            Some(hit) => hit.coordinate(),
            None => Err(GeocodeError::NoMatch {
                query: place.to_owned(),
            }),
        }
    }
}

impl GeocodeBackend for NominatimGeocoder {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        if place.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        self.bridge.block_on(self.resolve_async(place))
    }
}
