//! Route candidates and the active-route set.
//!
//! A routing query yields one primary route and up to N alternatives. Exactly
//! one candidate is active at any time; the corridor filter is always relative
//! to the active candidate.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::geometry::haversine_meters;
use crate::polyline::{Polyline, PolylineError};

/// Assumed driving speed for the straight-line fallback, in metres/second
/// (50 km/h).
const FALLBACK_SPEED_MPS: f64 = 50.0 * 1000.0 / 3600.0;

/// One decoded driving route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Identifier, stable within one routing response.
    pub id: String,
    /// Route geometry in travel order.
    pub geometry: Polyline,
    /// Service-reported travel duration.
    pub duration: Duration,
}

impl RouteCandidate {
    /// Construct a candidate from decoded geometry and duration.
    #[must_use]
    pub fn new(id: String, geometry: Polyline, duration: Duration) -> Self {
        Self {
            id,
            geometry,
            duration,
        }
    }

    /// Straight two-point fallback used when the routing service is
    /// unavailable. The duration is estimated at 50 km/h over the
    /// great-circle distance.
    ///
    /// # Errors
    /// Returns [`PolylineError`] when either endpoint is outside WGS84
    /// ranges.
    pub fn direct(origin: Coord<f64>, destination: Coord<f64>) -> Result<Self, PolylineError> {
        let geometry = Polyline::new(vec![origin, destination])?;
        let meters = haversine_meters(origin, destination);
        Ok(Self {
            id: "direct".to_owned(),
            geometry,
            duration: Duration::from_secs_f64(meters / FALLBACK_SPEED_MPS),
        })
    }
}

/// Errors returned by [`RouteSet`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteSetError {
    /// No candidates were supplied.
    #[error("route set must contain at least one candidate")]
    Empty,
    /// No candidate carries the requested id.
    #[error("no route candidate with id '{id}'")]
    UnknownRoute {
        /// The id that failed to match.
        id: String,
    },
}

/// An ordered set of route candidates with exactly one active.
///
/// Candidates are sorted ascending by duration on construction, so the
/// default active candidate at index 0 is the fastest route.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use roadside_core::{RouteCandidate, RouteSet};
///
/// let slow = RouteCandidate::direct(
///     Coord { x: 77.0, y: 11.0 },
///     Coord { x: 78.0, y: 11.0 },
/// )?;
/// let mut fast = slow.clone();
/// fast.id = "bypass".into();
/// fast.duration = Duration::from_secs(60);
///
/// let routes = RouteSet::new(vec![slow, fast])?;
/// assert_eq!(routes.active().id, "bypass");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSet {
    candidates: Vec<RouteCandidate>,
    active: usize,
}

impl RouteSet {
    /// Sort candidates by duration ascending and activate the fastest.
    ///
    /// # Errors
    /// Returns [`RouteSetError::Empty`] when no candidates are supplied.
    pub fn new(mut candidates: Vec<RouteCandidate>) -> Result<Self, RouteSetError> {
        if candidates.is_empty() {
            return Err(RouteSetError::Empty);
        }
        candidates.sort_by(|a, b| a.duration.cmp(&b.duration));
        Ok(Self {
            candidates,
            active: 0,
        })
    }

    /// The currently active candidate.
    #[must_use]
    pub fn active(&self) -> &RouteCandidate {
        &self.candidates[self.active]
    }

    /// All candidates, fastest first.
    #[must_use]
    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    /// Switch the active candidate by id.
    ///
    /// Callers must re-run the corridor selection afterwards: the buffer
    /// filter is relative to the active route.
    ///
    /// # Errors
    /// Returns [`RouteSetError::UnknownRoute`] when no candidate matches.
    pub fn activate(&mut self, id: &str) -> Result<(), RouteSetError> {
        match self.candidates.iter().position(|c| c.id == id) {
            Some(index) => {
                self.active = index;
                Ok(())
            }
            None => Err(RouteSetError::UnknownRoute { id: id.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn candidate(id: &str, secs: u64) -> RouteCandidate {
        let geometry = Polyline::new(vec![
            Coord { x: 77.0, y: 11.0 },
            Coord { x: 77.5, y: 11.2 },
        ])
        .expect("valid polyline");
        RouteCandidate::new(id.to_owned(), geometry, Duration::from_secs(secs))
    }

    #[fixture]
    fn three_routes() -> Vec<RouteCandidate> {
        vec![
            candidate("a", 600),
            candidate("b", 300),
            candidate("c", 900),
        ]
    }

    #[rstest]
    fn empty_set_is_rejected() {
        assert!(matches!(RouteSet::new(Vec::new()), Err(RouteSetError::Empty)));
    }

    #[rstest]
    fn candidates_sort_by_duration_ascending(three_routes: Vec<RouteCandidate>) {
        let set = RouteSet::new(three_routes).expect("non-empty set");
        let durations: Vec<u64> = set
            .candidates()
            .iter()
            .map(|c| c.duration.as_secs())
            .collect();
        assert_eq!(durations, vec![300, 600, 900]);
    }

    #[rstest]
    fn fastest_route_is_active_by_default(three_routes: Vec<RouteCandidate>) {
        let set = RouteSet::new(three_routes).expect("non-empty set");
        assert_eq!(set.active().id, "b");
    }

    #[rstest]
    fn activation_switches_by_id(three_routes: Vec<RouteCandidate>) {
        let mut set = RouteSet::new(three_routes).expect("non-empty set");
        set.activate("c").expect("known id");
        assert_eq!(set.active().duration.as_secs(), 900);
    }

    #[rstest]
    fn activation_rejects_unknown_id(three_routes: Vec<RouteCandidate>) {
        let mut set = RouteSet::new(three_routes).expect("non-empty set");
        let err = set.activate("missing").expect_err("unknown id");
        assert_eq!(
            err,
            RouteSetError::UnknownRoute {
                id: "missing".to_owned()
            }
        );
    }

    #[rstest]
    fn direct_fallback_estimates_duration() {
        // Roughly one degree of longitude at the equator: ~111 km, so at
        // 50 km/h the estimate sits a little over two hours.
        let route = RouteCandidate::direct(
            Coord { x: 77.0, y: 0.0 },
            Coord { x: 78.0, y: 0.0 },
        )
        .expect("valid endpoints");
        assert_eq!(route.id, "direct");
        assert_eq!(route.geometry.points().len(), 2);
        let hours = route.duration.as_secs_f64() / 3600.0;
        assert!((2.0..2.5).contains(&hours), "got {hours} h");
    }
}
