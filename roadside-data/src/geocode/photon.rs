//! Fallback geocoder against a Photon-style GeoJSON search endpoint.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use roadside_core::{GeocodeBackend, GeocodeError, position};

use crate::http::{BlockingBridge, ProviderBuildError, USER_AGENT, build_client};

use super::convert_reqwest_error;

const DEFAULT_BASE_URL: &str = "https://photon.komoot.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// GeoJSON feature collection returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    pub(crate) features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub(crate) geometry: PointGeometry,
}

/// GeoJSON point geometry; coordinates are `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
pub(crate) struct PointGeometry {
    pub(crate) coordinates: [f64; 2],
}

impl Feature {
    pub(crate) fn coordinate(&self) -> Result<Coord<f64>, GeocodeError> {
        let [lon, lat] = self.geometry.coordinates;
        position(lat, lon).map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })
    }
}

/// Configuration for [`PhotonGeocoder`].
#[derive(Debug, Clone)]
pub struct PhotonGeocoderConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for PhotonGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl PhotonGeocoderConfig {
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

/// Alternate resolver consulted when the primary geocoder fails.
#[derive(Debug)]
pub struct PhotonGeocoder {
    client: Client,
    bridge: BlockingBridge,
    config: PhotonGeocoderConfig,
}

impl PhotonGeocoder {
    /// Create a geocoder with default configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(PhotonGeocoderConfig::default())
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn with_config(config: PhotonGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(config.timeout, &config.user_agent)?;
        let bridge = BlockingBridge::new()?;
        Ok(Self {
            client,
            bridge,
            config,
        })
    }

    fn search_url(&self, place: &str) -> Result<Url, GeocodeError> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(&format!("{base}/api"), &[("limit", "1"), ("q", place)]).map_err(
            |err| GeocodeError::Parse {
                message: format!("invalid search URL: {err}"),
            },
        )
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

        let collection: FeatureCollection =
            response.json().await.map_err(|err| GeocodeError::Parse {
                message: err.to_string(),
            })?;

        match collection.features.first() {
            Some(feature) => feature.coordinate(),
            None => Err(GeocodeError::NoMatch {
                query: place.to_owned(),
            }),
        }
    }
}

impl GeocodeBackend for PhotonGeocoder {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        if place.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        self.bridge.block_on(self.resolve_async(place))
    }
}
