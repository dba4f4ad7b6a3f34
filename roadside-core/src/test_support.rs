//! Deterministic test doubles for the provider seams.
//!
//! These stubs return pre-configured responses without touching the network,
//! so behavioural tests can exercise fallback and degrade paths exactly.

use std::collections::HashMap;
use std::sync::Mutex;

use geo::Coord;

use crate::poi::{Poi, PoiCategory};
use crate::provider::{
    GeocodeBackend, GeocodeError, PoiFetchError, PoiQuery, PoiSource, RouteProvider, RoutingError,
};
use crate::route::RouteCandidate;

/// Build a POI at `(lat, lon)` with a placeholder name and no tags.
///
/// # Panics
/// Panics when `(lat, lon)` is outside WGS84 ranges; test data is expected
/// to be valid.
#[must_use]
pub fn sample_poi(id: &str, category: PoiCategory, lat: f64, lon: f64) -> Poi {
    Poi::new(
        id.to_owned(),
        category,
        category.placeholder_name(),
        Coord { x: lon, y: lat },
        HashMap::new(),
    )
    .expect("sample POI position should be valid")
}

/// Stub [`GeocodeBackend`] returning canned positions or errors.
#[derive(Debug)]
pub struct StubGeocoder {
    response: GeocoderResponse,
}

#[derive(Debug)]
enum GeocoderResponse {
    Fixed(Coord<f64>),
    Table(HashMap<String, Coord<f64>>),
    Error(GeocodeError),
}

impl StubGeocoder {
    /// Resolve every query to the same position.
    #[must_use]
    pub fn with_position(position: Coord<f64>) -> Self {
        Self {
            response: GeocoderResponse::Fixed(position),
        }
    }

    /// Resolve queries via an exact-match (case-insensitive) table; misses
    /// return [`GeocodeError::NoMatch`].
    #[must_use]
    pub fn with_table(table: HashMap<String, Coord<f64>>) -> Self {
        let table = table
            .into_iter()
            .map(|(name, coord)| (name.to_lowercase(), coord))
            .collect();
        Self {
            response: GeocoderResponse::Table(table),
        }
    }

    /// Fail every query with a clone of `error`.
    #[must_use]
    pub fn with_error(error: GeocodeError) -> Self {
        Self {
            response: GeocoderResponse::Error(error),
        }
    }
}

impl GeocodeBackend for StubGeocoder {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        if place.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        match &self.response {
            GeocoderResponse::Fixed(position) => Ok(*position),
            GeocoderResponse::Table(table) => table
                .get(&place.to_lowercase())
                .copied()
                .ok_or_else(|| GeocodeError::NoMatch {
                    query: place.to_owned(),
                }),
            GeocoderResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// Stub [`RouteProvider`] returning canned candidates or errors.
#[derive(Debug)]
pub struct StubRouter {
    response: Result<Vec<RouteCandidate>, RoutingError>,
}

impl StubRouter {
    /// Return the given candidates for every query, as supplied (no
    /// re-sorting).
    #[must_use]
    pub fn with_candidates(candidates: Vec<RouteCandidate>) -> Self {
        Self {
            response: Ok(candidates),
        }
    }

    /// Fail every query with a clone of `error`.
    #[must_use]
    pub fn with_error(error: RoutingError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl RouteProvider for StubRouter {
    fn routes(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
        _max_alternatives: u32,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        self.response.clone()
    }
}

/// Stub [`PoiSource`] returning canned POIs or errors and recording queries.
#[derive(Debug)]
pub struct StubPoiSource {
    response: Result<Vec<Poi>, PoiFetchError>,
    queries: Mutex<Vec<PoiQuery>>,
}

impl StubPoiSource {
    /// Return the given POIs for every query.
    #[must_use]
    pub fn with_pois(pois: Vec<Poi>) -> Self {
        Self {
            response: Ok(pois),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fail every query with a clone of `error`.
    #[must_use]
    pub fn with_error(error: PoiFetchError) -> Self {
        Self {
            response: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries observed so far, in arrival order.
    ///
    /// # Panics
    /// Panics if the internal lock was poisoned by a panicking test.
    #[must_use]
    pub fn queries(&self) -> Vec<PoiQuery> {
        self.queries.lock().expect("query log lock").clone()
    }
}

impl PoiSource for StubPoiSource {
    fn fetch(&self, query: &PoiQuery) -> Result<Vec<Poi>, PoiFetchError> {
        self.queries
            .lock()
            .expect("query log lock")
            .push(query.clone());
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_geocoder_is_case_insensitive() {
        let geocoder = StubGeocoder::with_table(HashMap::from([(
            "Chennai".to_owned(),
            Coord { x: 80.2707, y: 13.0827 },
        )]));
        let coord = geocoder.resolve("chennai").expect("table hit");
        assert_eq!(coord.y, 13.0827);
        assert!(matches!(
            geocoder.resolve("madrid"),
            Err(GeocodeError::NoMatch { .. })
        ));
    }

    #[test]
    fn stubs_reject_empty_queries() {
        let geocoder = StubGeocoder::with_position(Coord { x: 0.0, y: 0.0 });
        assert_eq!(geocoder.resolve("  "), Err(GeocodeError::EmptyQuery));
    }

    #[test]
    fn poi_source_records_queries() {
        let source = StubPoiSource::with_pois(Vec::new());
        let query = PoiQuery::Around {
            center: Coord { x: 77.0, y: 11.0 },
            radius_meters: 5000.0,
            categories: vec![PoiCategory::Fuel],
        };
        source.fetch(&query).expect("canned response");
        assert_eq!(source.queries(), vec![query]);
    }
}
