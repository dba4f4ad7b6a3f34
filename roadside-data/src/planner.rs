//! The sequential trip-planning pipeline.
//!
//! One plan request runs geocode → route → corridor fetch → selection, each
//! stage feeding the next. Provider failures degrade rather than propagate:
//! a failed routing call falls back to a straight two-point line, and a
//! failed POI fetch yields an empty POI map, in both cases with a flag on
//! the plan so callers can tell a degraded answer from a confirmed one.

use std::collections::BTreeMap;

use log::{debug, warn};
use thiserror::Error;

use roadside_core::{
    GeocodeBackend, GeocodeError, Poi, PoiCategory, PoiQuery, PoiSource, Polyline, PolylineError,
    RouteCandidate, RouteProvider, RouteSet, RouteSetError, SelectedPoi, SelectionConfig,
    select_pois,
};

use crate::geocode::{FallbackGeocoder, Resolved};

/// Default number of alternative routes requested alongside the primary.
const DEFAULT_MAX_ALTERNATIVES: u32 = 2;

/// Which end of the trip a geocode failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// The trip's starting place.
    Origin,
    /// The trip's destination place.
    Destination,
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        })
    }
}

/// Errors from [`TripPlanner::plan`].
///
/// With the fallback geocoder in front, only invalid input reaches these
/// variants in practice; downstream service failures degrade instead.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A place name failed to geocode (in practice: it was empty).
    #[error("failed to geocode {leg}: {source}")]
    Geocode {
        /// Which trip leg failed.
        leg: Leg,
        /// Underlying geocode error.
        #[source]
        source: GeocodeError,
    },
    /// The straight-line fallback geometry could not be built.
    #[error("failed to build fallback route: {0}")]
    FallbackRoute(#[from] PolylineError),
    /// No route candidate survived (owned by [`RouteSet`] construction).
    #[error(transparent)]
    EmptyRoutes(#[from] RouteSetError),
}

/// A planned trip: resolved endpoints, route candidates, and the POIs
/// selected along the active route.
#[derive(Debug)]
pub struct TripPlan {
    /// Resolved origin, with provenance.
    pub origin: Resolved,
    /// Resolved destination, with provenance.
    pub destination: Resolved,
    /// Route candidates, fastest first; exactly one active.
    pub routes: RouteSet,
    /// Selected POIs per category, relative to the active route.
    pub pois: BTreeMap<PoiCategory, Vec<SelectedPoi>>,
    /// True when routing failed and the straight-line fallback is in use.
    pub route_degraded: bool,
    /// True when the POI fetch failed; an empty map then means "unknown",
    /// not "confirmed empty".
    pub pois_degraded: bool,
    raw_pois: Vec<Poi>,
    selection: SelectionConfig,
}

impl TripPlan {
    /// Switch the active route and re-run the corridor selection against it.
    ///
    /// # Errors
    /// Returns [`RouteSetError::UnknownRoute`] when no candidate matches.
    pub fn activate_route(&mut self, id: &str) -> Result<(), RouteSetError> {
        self.routes.activate(id)?;
        self.pois = select_pois(&self.raw_pois, &self.routes.active().geometry, &self.selection);
        Ok(())
    }

    /// The raw, unfiltered POIs the corridor fetch returned.
    #[must_use]
    pub fn raw_pois(&self) -> &[Poi] {
        &self.raw_pois
    }
}

/// Composes the provider stack into a plan-a-trip operation.
///
/// The pipeline is strictly sequential: each stage depends on the previous
/// stage's output. Independent plans do not share state; see
/// [`crate::PlannerSession`] for discarding stale results when requests
/// overlap.
#[derive(Debug)]
pub struct TripPlanner<P, S, R, F> {
    geocoder: FallbackGeocoder<P, S>,
    router: R,
    poi_source: F,
    selection: SelectionConfig,
    categories: Vec<PoiCategory>,
    max_alternatives: u32,
}

impl<P, S, R, F> TripPlanner<P, S, R, F>
where
    P: GeocodeBackend,
    S: GeocodeBackend,
    R: RouteProvider,
    F: PoiSource,
{
    /// Assemble a planner over a geocoding chain, a router and a POI source.
    #[must_use]
    pub fn new(geocoder: FallbackGeocoder<P, S>, router: R, poi_source: F) -> Self {
        Self {
            geocoder,
            router,
            poi_source,
            selection: SelectionConfig::default(),
            categories: PoiCategory::ALL.to_vec(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }

    /// Replace the corridor selection tunables.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Restrict the POI categories fetched and selected.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<PoiCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Set how many alternative routes to request.
    #[must_use]
    pub fn with_max_alternatives(mut self, max_alternatives: u32) -> Self {
        self.max_alternatives = max_alternatives;
        self
    }

    /// Plan a trip between two place names.
    ///
    /// # Errors
    /// Returns [`PlanError`] for empty place names; service failures degrade
    /// into the plan's `route_degraded`/`pois_degraded` flags instead.
    pub fn plan(&self, origin_name: &str, destination_name: &str) -> Result<TripPlan, PlanError> {
        let origin = self
            .geocoder
            .resolve(origin_name)
            .map_err(|source| PlanError::Geocode {
                leg: Leg::Origin,
                source,
            })?;
        let destination =
            self.geocoder
                .resolve(destination_name)
                .map_err(|source| PlanError::Geocode {
                    leg: Leg::Destination,
                    source,
                })?;
        debug!(
            "geocoded '{origin_name}' via {} and '{destination_name}' via {}",
            origin.source, destination.source
        );

        let (routes, route_degraded) = self.fetch_routes(origin, destination)?;
        let (raw_pois, pois_degraded) = self.fetch_corridor_pois(&routes.active().geometry);
        let pois = select_pois(&raw_pois, &routes.active().geometry, &self.selection);

        Ok(TripPlan {
            origin,
            destination,
            routes,
            pois,
            route_degraded,
            pois_degraded,
            raw_pois,
            selection: self.selection.clone(),
        })
    }

    fn fetch_routes(
        &self,
        origin: Resolved,
        destination: Resolved,
    ) -> Result<(RouteSet, bool), PlanError> {
        match self
            .router
            .routes(origin.position, destination.position, self.max_alternatives)
        {
            Ok(candidates) if !candidates.is_empty() => Ok((RouteSet::new(candidates)?, false)),
            Ok(_) => {
                warn!("routing service returned no candidates; using straight-line fallback");
                Ok((self.direct_route_set(origin, destination)?, true))
            }
            Err(err) => {
                warn!("routing failed ({err}); using straight-line fallback");
                Ok((self.direct_route_set(origin, destination)?, true))
            }
        }
    }

    fn direct_route_set(
        &self,
        origin: Resolved,
        destination: Resolved,
    ) -> Result<RouteSet, PlanError> {
        let direct = RouteCandidate::direct(origin.position, destination.position)?;
        Ok(RouteSet::new(vec![direct])?)
    }

    fn fetch_corridor_pois(&self, route: &Polyline) -> (Vec<Poi>, bool) {
        if self.categories.is_empty() {
            return (Vec::new(), false);
        }
        let query = PoiQuery::Within {
            bounds: route.padded_bounding_box(self.selection.buffer_meters),
            categories: self.categories.clone(),
        };
        match self.poi_source.fetch(&query) {
            Ok(raw) => (raw, false),
            Err(err) => {
                warn!("POI fetch failed ({err}); rendering without POIs");
                (Vec::new(), true)
            }
        }
    }
}
