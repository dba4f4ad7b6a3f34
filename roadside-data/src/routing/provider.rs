//! HTTP-based `RouteProvider` using OSRM's Route service.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;

use roadside_core::{Polyline, RouteCandidate, RouteProvider, RoutingError};

use crate::http::{BlockingBridge, ProviderBuildError, USER_AGENT, build_client};

use super::osrm::RouteResponse;

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`OsrmRouter`].
#[derive(Debug, Clone)]
pub struct OsrmRouterConfig {
    /// Base URL of the OSRM service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl OsrmRouterConfig {
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

/// Driving-directions provider against the OSRM Route API.
///
/// A single failed attempt is surfaced as an error; no internal retries.
/// Callers degrade to [`RouteCandidate::direct`] when this provider fails.
#[derive(Debug)]
pub struct OsrmRouter {
    client: Client,
    bridge: BlockingBridge,
    config: OsrmRouterConfig,
}

impl OsrmRouter {
    /// Create a router with default configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmRouterConfig::default())
    }

    /// Create a router with explicit configuration.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] if the HTTP client or runtime fails to
    /// build.
    pub fn with_config(config: OsrmRouterConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(config.timeout, &config.user_agent)?;
        let bridge = BlockingBridge::new()?;
        Ok(Self {
            client,
            bridge,
            config,
        })
    }

    /// Build the Route API URL for an origin/destination pair.
    ///
    /// OSRM expects `lon,lat` coordinate order in the path.
    fn route_url(&self, origin: Coord<f64>, destination: Coord<f64>, max_alternatives: u32) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?alternatives={}&overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            origin.x,
            origin.y,
            destination.x,
            destination.y,
            max_alternatives,
        )
    }

    async fn routes_async(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        max_alternatives: u32,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        let url = self.route_url(origin, destination, max_alternatives);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let route_response: RouteResponse =
            response.json().await.map_err(|err| RoutingError::Parse {
                message: err.to_string(),
            })?;

        Self::convert_response(route_response)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RoutingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        RoutingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Decode an OSRM response into sorted route candidates.
    ///
    /// Geometry arrives as GeoJSON `[lon, lat]` pairs and is swapped into the
    /// engine's `x = lon, y = lat` coordinates; candidates keep an id from
    /// their response position and are then sorted fastest-first.
    fn convert_response(response: RouteResponse) -> Result<Vec<RouteCandidate>, RoutingError> {
        if !response.is_ok() {
            return Err(RoutingError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
        if response.routes.is_empty() {
            return Err(RoutingError::NoRoute);
        }

        let mut candidates = Vec::with_capacity(response.routes.len());
        for (index, route) in response.routes.into_iter().enumerate() {
            if !route.duration.is_finite() || route.duration < 0.0 {
                return Err(RoutingError::Parse {
                    message: format!("invalid route duration {}", route.duration),
                });
            }
            let points = route
                .geometry
                .coordinates
                .iter()
                .map(|&[lon, lat]| Coord { x: lon, y: lat })
                .collect();
            let geometry = Polyline::new(points).map_err(|err| RoutingError::Parse {
                message: format!("invalid route geometry: {err}"),
            })?;
            candidates.push(RouteCandidate::new(
                format!("route-{index}"),
                geometry,
                Duration::from_secs_f64(route.duration),
            ));
        }

        candidates.sort_by(|a, b| a.duration.cmp(&b.duration));
        Ok(candidates)
    }
}

impl RouteProvider for OsrmRouter {
    fn routes(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        max_alternatives: u32,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        self.bridge
            .block_on(self.routes_async(origin, destination, max_alternatives))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::{LineStringGeometry, OsrmRoute};
    use rstest::rstest;

    fn router() -> OsrmRouter {
        OsrmRouter::with_config(OsrmRouterConfig::new("http://osrm.example.com/"))
            .expect("router should build")
    }

    fn route(duration: f64) -> OsrmRoute {
        OsrmRoute {
            geometry: LineStringGeometry {
                coordinates: vec![[76.95, 11.01], [77.34, 11.11], [77.71, 11.34]],
            },
            duration,
        }
    }

    #[rstest]
    fn route_url_uses_lon_lat_order() {
        let url = router().route_url(
            Coord { x: 76.9558, y: 11.0168 },
            Coord { x: 77.7172, y: 11.3410 },
            2,
        );
        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/76.9558,11.0168;77.7172,11.341\
             ?alternatives=2&overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn convert_sorts_candidates_by_duration() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![route(600.0), route(300.0), route(900.0)],
        };

        let candidates = OsrmRouter::convert_response(response).expect("should convert");

        let durations: Vec<u64> = candidates.iter().map(|c| c.duration.as_secs()).collect();
        assert_eq!(durations, vec![300, 600, 900]);
        // Ids keep their response position so alternatives stay addressable.
        assert_eq!(candidates[0].id, "route-1");
    }

    #[rstest]
    fn convert_swaps_geojson_coordinate_order() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![route(300.0)],
        };

        let candidates = OsrmRouter::convert_response(response).expect("should convert");

        let start = candidates[0].geometry.start();
        assert_eq!(start.x, 76.95);
        assert_eq!(start.y, 11.01);
    }

    #[rstest]
    fn convert_surfaces_service_errors() {
        let response = RouteResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Coordinates are invalid".to_owned()),
            routes: Vec::new(),
        };

        let err = OsrmRouter::convert_response(response).expect_err("should fail");

        assert_eq!(
            err,
            RoutingError::Service {
                code: "InvalidQuery".to_owned(),
                message: "Coordinates are invalid".to_owned(),
            }
        );
    }

    #[rstest]
    fn convert_distinguishes_empty_route_list() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: Vec::new(),
        };

        let err = OsrmRouter::convert_response(response).expect_err("should fail");
        assert_eq!(err, RoutingError::NoRoute);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(-5.0)]
    #[case(f64::INFINITY)]
    fn convert_rejects_invalid_durations(#[case] duration: f64) {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![route(duration)],
        };

        let err = OsrmRouter::convert_response(response).expect_err("should fail");
        assert!(matches!(err, RoutingError::Parse { .. }));
    }
}
