//! Provider traits at the engine's service seams.
//!
//! The HTTP adapters in `roadside-data` implement these traits; tests swap in
//! the deterministic doubles from [`crate::test_support`]. The trait surface
//! is synchronous to keep the core embeddable in synchronous contexts;
//! async adapters bridge internally, the way the data crate's providers do.

mod error;

pub use error::{GeocodeError, PoiFetchError, RoutingError};

use geo::{Coord, Rect};

use crate::poi::{Poi, PoiCategory};
use crate::route::RouteCandidate;

/// Addressing modes for a POI fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum PoiQuery {
    /// Radius search around a single coordinate, used for the initial
    /// around-here display.
    Around {
        /// Centre of the search.
        center: Coord<f64>,
        /// Search radius in metres.
        radius_meters: f64,
        /// Categories to request.
        categories: Vec<PoiCategory>,
    },
    /// Bounding-box search, normally derived from a route's padded bounds.
    Within {
        /// The box to search.
        bounds: Rect<f64>,
        /// Categories to request.
        categories: Vec<PoiCategory>,
    },
}

impl PoiQuery {
    /// The categories this query requests.
    #[must_use]
    pub fn categories(&self) -> &[PoiCategory] {
        match self {
            Self::Around { categories, .. } | Self::Within { categories, .. } => categories,
        }
    }
}

/// Resolve a free-text place name to a coordinate.
///
/// One backend is one resolver; chaining and fallback policy live above the
/// trait (see `FallbackGeocoder` in the data crate).
pub trait GeocodeBackend {
    /// Resolve `place` to a coordinate.
    ///
    /// # Errors
    /// Returns [`GeocodeError`] on transport failure, unparseable payloads,
    /// empty input, or when the service has no match for the query.
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError>;
}

/// Fetch driving routes between two coordinates.
pub trait RouteProvider {
    /// Fetch the primary route plus up to `max_alternatives` alternatives,
    /// sorted ascending by duration so index 0 is the fastest.
    ///
    /// # Errors
    /// Returns [`RoutingError`] on transport failure or when the service
    /// finds no route; callers own the degrade (e.g.
    /// [`RouteCandidate::direct`]).
    fn routes(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        max_alternatives: u32,
    ) -> Result<Vec<RouteCandidate>, RoutingError>;
}

/// Fetch raw, unfiltered POIs for a query.
///
/// An `Ok` with an empty list means the service answered and found nothing;
/// unreachable services are an `Err`. Callers that want the legacy
/// "treat both as empty" behaviour can flatten, but the distinction is
/// preserved here so they do not have to.
pub trait PoiSource {
    /// Fetch raw POIs matching `query`.
    ///
    /// # Errors
    /// Returns [`PoiFetchError`] when every endpoint fails or the payload
    /// cannot be decoded.
    fn fetch(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiFetchError>;
}

impl<T: GeocodeBackend + ?Sized> GeocodeBackend for &T {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).resolve(place)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn routes(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        max_alternatives: u32,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        (**self).routes(origin, destination, max_alternatives)
    }
}

impl<T: PoiSource + ?Sized> PoiSource for &T {
    fn fetch(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiFetchError> {
        (**self).fetch(query)
    }
}
