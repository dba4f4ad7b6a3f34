//! Driving-route retrieval from an OSRM Route API.
//!
//! [`OsrmRouter`] implements [`roadside_core::RouteProvider`] by querying the
//! OSRM `route` service for the primary route plus alternatives, decoding the
//! GeoJSON geometry (swapping the service's lon,lat order into the engine's
//! coordinate convention) and sorting candidates fastest-first.

mod osrm;
mod provider;

pub use provider::{OsrmRouter, OsrmRouterConfig};
