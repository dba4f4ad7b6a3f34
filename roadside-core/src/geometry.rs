//! Geographic distance primitives for the corridor filter.
//!
//! Route extents here are tens of kilometres at most, so a local
//! equirectangular projection is accurate enough for point-to-segment work;
//! the final measurement uses the haversine formula on the sphere. All
//! functions are pure and deterministic.

use geo::Coord;

use crate::polyline::Polyline;

/// Mean earth radius in metres.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in metres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::haversine_meters;
///
/// let chennai = Coord { x: 80.2707, y: 13.0827 };
/// let same = haversine_meters(chennai, chennai);
/// assert!(same < 1e-6);
/// ```
#[must_use]
pub fn haversine_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat + lat_a.cos() * lat_b.cos() * sin_lon * sin_lon;
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Minimum distance in metres from `point` to the segment `a`–`b`.
///
/// The segment is projected onto a local tangent plane (equirectangular, with
/// longitude scaled by the cosine of the segment's reference latitude), the
/// projection parameter is clamped to `[0, 1]` to stay within the segment,
/// and the distance to the clamped projection point is measured with
/// [`haversine_meters`].
#[must_use]
pub fn point_to_segment_meters(point: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lon_scale = a.y.to_radians().cos();

    // Planar offsets in degree-sized units; the common scale factor cancels
    // in the projection parameter.
    let seg_x = (b.x - a.x) * lon_scale;
    let seg_y = b.y - a.y;
    let rel_x = (point.x - a.x) * lon_scale;
    let rel_y = point.y - a.y;

    let seg_len_sq = seg_x * seg_x + seg_y * seg_y;
    let t = if seg_len_sq == 0.0 {
        // Degenerate segment: both endpoints coincide.
        0.0
    } else {
        ((rel_x * seg_x + rel_y * seg_y) / seg_len_sq).clamp(0.0, 1.0)
    };

    let closest = Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    };
    haversine_meters(point, closest)
}

/// Minimum distance in metres from `point` to any segment of `polyline`.
///
/// A polyline with fewer than two points has no segments; the distance is
/// then `f64::INFINITY` so such a point can never pass a buffer filter.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::{Polyline, distance_to_polyline};
///
/// let route = Polyline::new(vec![
///     Coord { x: 77.0, y: 11.0 },
///     Coord { x: 77.2, y: 11.0 },
/// ])?;
/// let on_route = Coord { x: 77.1, y: 11.0 };
/// assert!(distance_to_polyline(on_route, &route) < 1e-6);
/// # Ok::<(), roadside_core::PolylineError>(())
/// ```
#[must_use]
pub fn distance_to_polyline(point: Coord<f64>, polyline: &Polyline) -> f64 {
    polyline
        .segments()
        .map(|(a, b)| point_to_segment_meters(point, a, b))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const EPSILON_METERS: f64 = 1e-6;

    #[fixture]
    fn east_west_route() -> Polyline {
        Polyline::new(vec![
            Coord { x: 77.0, y: 11.0 },
            Coord { x: 77.2, y: 11.0 },
            Coord { x: 77.4, y: 11.1 },
        ])
        .expect("valid polyline")
    }

    #[rstest]
    fn haversine_of_identical_points_is_zero() {
        let p = Coord { x: 80.2707, y: 13.0827 };
        assert!(haversine_meters(p, p) < EPSILON_METERS);
    }

    #[rstest]
    fn haversine_matches_known_degree_of_latitude() {
        // One degree of latitude is roughly 111.2 km on a 6371 km sphere.
        let a = Coord { x: 77.0, y: 11.0 };
        let b = Coord { x: 77.0, y: 12.0 };
        let d = haversine_meters(a, b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[rstest]
    fn segment_midpoint_is_on_segment(east_west_route: Polyline) {
        let midpoint = Coord { x: 77.1, y: 11.0 };
        assert!(distance_to_polyline(midpoint, &east_west_route) < EPSILON_METERS);
    }

    #[rstest]
    fn endpoints_are_on_the_polyline(east_west_route: Polyline) {
        for point in east_west_route.points() {
            assert!(distance_to_polyline(*point, &east_west_route) < EPSILON_METERS);
        }
    }

    #[rstest]
    fn projection_clamps_beyond_segment_ends() {
        let a = Coord { x: 77.0, y: 11.0 };
        let b = Coord { x: 77.1, y: 11.0 };
        // Point past the eastern end projects onto endpoint b.
        let beyond = Coord { x: 77.3, y: 11.0 };
        let expected = haversine_meters(beyond, b);
        let actual = point_to_segment_meters(beyond, a, b);
        assert!((actual - expected).abs() < EPSILON_METERS);
    }

    #[rstest]
    fn perpendicular_offset_measures_lateral_distance() {
        let a = Coord { x: 77.0, y: 11.0 };
        let b = Coord { x: 77.2, y: 11.0 };
        // Roughly 0.001 degrees of latitude north of the segment: ~111 m.
        let offset = Coord { x: 77.1, y: 11.001 };
        let d = point_to_segment_meters(offset, a, b);
        assert!((d - 111.2).abs() < 1.0, "got {d}");
    }

    #[rstest]
    fn degenerate_segment_measures_to_the_point() {
        let a = Coord { x: 77.0, y: 11.0 };
        let p = Coord { x: 77.0, y: 11.5 };
        let expected = haversine_meters(p, a);
        assert!((point_to_segment_meters(p, a, a) - expected).abs() < EPSILON_METERS);
    }

    #[rstest]
    fn single_point_polyline_is_infinitely_far() {
        let line = Polyline::new(vec![Coord { x: 77.0, y: 11.0 }]).expect("valid polyline");
        let p = Coord { x: 77.0, y: 11.0 };
        assert_eq!(distance_to_polyline(p, &line), f64::INFINITY);
    }

    #[rstest]
    fn picks_the_nearest_segment(east_west_route: Polyline) {
        // Close to the second segment, far from the first.
        let p = Coord { x: 77.35, y: 11.08 };
        let (a1, b1) = (east_west_route.points()[0], east_west_route.points()[1]);
        let (a2, b2) = (east_west_route.points()[1], east_west_route.points()[2]);
        let d = distance_to_polyline(p, &east_west_route);
        assert_eq!(
            d,
            point_to_segment_meters(p, a1, b1).min(point_to_segment_meters(p, a2, b2))
        );
    }
}
