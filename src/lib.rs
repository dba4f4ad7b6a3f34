//! Facade crate for the Roadside route-corridor POI engine.
//!
//! This crate re-exports the core domain types and the HTTP provider stack so
//! applications can depend on a single crate.

#![forbid(unsafe_code)]

pub use roadside_core::{
    GeocodeBackend, GeocodeError, Poi, PoiCategory, PoiFetchError, PoiQuery, PoiSource, Polyline,
    PolylineError, PositionError, RouteCandidate, RouteProvider, RouteSet, RouteSetError,
    RoutingError, SelectedPoi, SelectionConfig, distance_to_polyline, haversine_meters, position,
    select_pois,
};

pub use roadside_data::{
    FallbackGeocoder, Gazetteer, Leg, NominatimGeocoder, NominatimGeocoderConfig, OsrmRouter,
    OsrmRouterConfig, OverpassClient, OverpassClientConfig, PhotonGeocoder, PhotonGeocoderConfig,
    PlanError, PlanTicket, PlannerSession, ProviderBuildError, Resolved, ResolutionSource,
    TripPlan, TripPlanner,
};
