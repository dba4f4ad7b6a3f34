//! Core domain types and geometry for the Roadside engine.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude` throughout,
//! matching the `geo` crate convention. Constructors validate their inputs and
//! return `Result` to surface invalid data early; the geometry and selection
//! routines are pure functions so callers can rely on deterministic output.

#![forbid(unsafe_code)]

mod geometry;
mod poi;
mod polyline;
mod position;
mod provider;
mod route;
mod select;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use geometry::{distance_to_polyline, haversine_meters, point_to_segment_meters};
pub use poi::{Poi, PoiCategory, TagFilter};
pub use polyline::{Polyline, PolylineError};
pub use position::{PositionError, position, validate_position};
pub use provider::{
    GeocodeBackend, GeocodeError, PoiFetchError, PoiQuery, PoiSource, RouteProvider, RoutingError,
};
pub use route::{RouteCandidate, RouteSet, RouteSetError};
pub use select::{SelectedPoi, SelectionConfig, quality_score, select_pois};
