//! JSON-serialisable view of a planned trip.

use std::collections::BTreeMap;

use serde::Serialize;

use roadside_core::{RouteCandidate, SelectedPoi};
use roadside_data::{Resolved, TripPlan};

/// The CLI's output document.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Resolved origin.
    pub origin: PlaceReport,
    /// Resolved destination.
    pub destination: PlaceReport,
    /// The active route, fastest unless re-activated.
    pub active_route: RouteReport,
    /// Remaining candidates, fastest first.
    pub alternatives: Vec<RouteReport>,
    /// Selected POIs per category name.
    pub pois: BTreeMap<String, Vec<PoiReport>>,
    /// True when the straight-line routing fallback is in use.
    pub route_degraded: bool,
    /// True when the POI fetch failed and the map is rendered without POIs.
    pub pois_degraded: bool,
}

/// A resolved place.
#[derive(Debug, Serialize)]
pub struct PlaceReport {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Which geocoding stage produced the coordinate.
    pub resolved_via: String,
}

/// One route candidate.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    /// Candidate id, e.g. `route-0` or `direct`.
    pub id: String,
    /// Travel time in seconds.
    pub duration_seconds: f64,
    /// Route geometry as `[latitude, longitude]` pairs, in travel order.
    pub geometry: Vec<[f64; 2]>,
}

/// One selected POI.
#[derive(Debug, Serialize)]
pub struct PoiReport {
    /// Stable source identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Distance to the active route in metres.
    pub distance_meters: f64,
    /// Phone number, when the source tags carry one.
    pub phone: Option<String>,
}

impl From<&Resolved> for PlaceReport {
    fn from(resolved: &Resolved) -> Self {
        Self {
            latitude: resolved.position.y,
            longitude: resolved.position.x,
            resolved_via: resolved.source.to_string(),
        }
    }
}

impl From<&RouteCandidate> for RouteReport {
    fn from(candidate: &RouteCandidate) -> Self {
        Self {
            id: candidate.id.clone(),
            duration_seconds: candidate.duration.as_secs_f64(),
            geometry: candidate
                .geometry
                .points()
                .iter()
                .map(|point| [point.y, point.x])
                .collect(),
        }
    }
}

impl From<&SelectedPoi> for PoiReport {
    fn from(selected: &SelectedPoi) -> Self {
        let phone = selected
            .poi
            .tags
            .get("phone")
            .or_else(|| selected.poi.tags.get("contact:phone"))
            .cloned();
        Self {
            id: selected.poi.id.clone(),
            name: selected.poi.name.clone(),
            latitude: selected.poi.location.y,
            longitude: selected.poi.location.x,
            distance_meters: selected.distance_meters,
            phone,
        }
    }
}

impl From<&TripPlan> for PlanReport {
    fn from(plan: &TripPlan) -> Self {
        let active = plan.routes.active();
        let alternatives = plan
            .routes
            .candidates()
            .iter()
            .filter(|candidate| candidate.id != active.id)
            .map(RouteReport::from)
            .collect();
        let pois = plan
            .pois
            .iter()
            .map(|(category, entries)| {
                (
                    category.to_string(),
                    entries.iter().map(PoiReport::from).collect(),
                )
            })
            .collect();
        Self {
            origin: PlaceReport::from(&plan.origin),
            destination: PlaceReport::from(&plan.destination),
            active_route: RouteReport::from(active),
            alternatives,
            pois,
            route_degraded: plan.route_degraded,
            pois_degraded: plan.pois_degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use roadside_core::test_support::{StubGeocoder, StubPoiSource, StubRouter, sample_poi};
    use roadside_core::{PoiCategory, Polyline};
    use roadside_data::{FallbackGeocoder, TripPlanner};
    use std::time::Duration;

    fn sample_plan() -> roadside_data::TripPlan {
        let geometry = Polyline::new(vec![
            Coord { x: 76.9558, y: 11.0 },
            Coord { x: 77.7172, y: 11.0 },
        ])
        .expect("valid polyline");
        let route =
            roadside_core::RouteCandidate::new("route-0".to_owned(), geometry, Duration::from_secs(5400));
        let planner = TripPlanner::new(
            FallbackGeocoder::new(
                StubGeocoder::with_position(Coord { x: 76.9558, y: 11.0168 }),
                StubGeocoder::with_position(Coord { x: 76.9558, y: 11.0168 }),
            ),
            StubRouter::with_candidates(vec![route]),
            StubPoiSource::with_pois(vec![sample_poi(
                "node/1",
                PoiCategory::Fuel,
                11.0005,
                77.2,
            )]),
        );
        planner.plan("Coimbatore", "Erode").expect("plan succeeds")
    }

    #[test]
    fn report_flattens_plan_fields() {
        let report = PlanReport::from(&sample_plan());

        assert_eq!(report.origin.resolved_via, "primary");
        assert_eq!(report.active_route.id, "route-0");
        assert!(report.alternatives.is_empty());
        assert_eq!(report.pois["fuel"].len(), 1);
        assert!(!report.route_degraded);
    }

    #[test]
    fn report_serialises_to_stable_json() {
        let report = PlanReport::from(&sample_plan());
        let json = serde_json::to_value(&report).expect("report serialises");

        assert_eq!(json["origin"]["latitude"], 11.0168);
        assert_eq!(json["active_route"]["duration_seconds"], 5400.0);
        // Geometry pairs are emitted lat-first for the report consumer.
        assert_eq!(json["active_route"]["geometry"][0][0], 11.0);
        assert_eq!(json["pois"]["fuel"][0]["id"], "node/1");
        assert_eq!(json["pois"]["fuel"][0]["phone"], serde_json::Value::Null);
    }
}
