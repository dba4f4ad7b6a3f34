//! OSRM Route API response types.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// On success `code` is `"Ok"` and `routes` holds the primary route first,
/// followed by any alternatives the service chose to return.
#[derive(Debug, Deserialize)]
pub(crate) struct RouteResponse {
    /// Status code from OSRM; `"Ok"`, `"NoRoute"`, `"InvalidQuery"`, etc.
    pub(crate) code: String,
    /// Optional error message when `code` is not `"Ok"`.
    pub(crate) message: Option<String>,
    /// Returned routes; absent on error responses.
    #[serde(default)]
    pub(crate) routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub(crate) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route in the response.
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    /// GeoJSON `LineString` geometry.
    pub(crate) geometry: LineStringGeometry,
    /// Travel time in seconds.
    pub(crate) duration: f64,
}

/// GeoJSON geometry; coordinates are `[longitude, latitude]` pairs.
#[derive(Debug, Deserialize)]
pub(crate) struct LineStringGeometry {
    pub(crate) coordinates: Vec<[f64; 2]>,
}
