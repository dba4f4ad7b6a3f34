//! HTTP adapters and trip orchestration for the Roadside engine.
//!
//! Responsibilities:
//! - Implement the core provider traits against public OSM-ecosystem
//!   services: Nominatim and Photon for geocoding, OSRM for driving routes,
//!   Overpass for POI search.
//! - Compose the providers into the sequential trip-planning pipeline and
//!   own its degrade policy.
//!
//! Boundaries:
//! - Domain rules (geometry, selection) live in `roadside-core`.
//! - Providers expose the synchronous core traits and bridge async HTTP
//!   internally; none of them retries beyond its documented fallback list.

#![forbid(unsafe_code)]

mod http;
mod planner;
mod session;

pub mod geocode;
pub mod poi;
pub mod routing;

pub use geocode::{
    FallbackGeocoder, Gazetteer, NominatimGeocoder, NominatimGeocoderConfig, PhotonGeocoder,
    PhotonGeocoderConfig, Resolved, ResolutionSource,
};
pub use http::ProviderBuildError;
pub use planner::{Leg, PlanError, TripPlan, TripPlanner};
pub use poi::{OverpassClient, OverpassClientConfig};
pub use routing::{OsrmRouter, OsrmRouterConfig};
pub use session::{PlanTicket, PlannerSession};
