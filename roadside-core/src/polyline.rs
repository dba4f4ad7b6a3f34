//! Ordered paths over the earth's surface.
//!
//! A [`Polyline`] is the decoded geometry of a driving route. Point order is
//! semantically meaningful: it defines the direction of travel, and the
//! corridor filter measures distance against consecutive point pairs.

use geo::{Coord, Rect};
use thiserror::Error;

use crate::position::{PositionError, validate_position};

/// Metres per degree of latitude, and of longitude at the equator.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// An ordered, non-empty sequence of validated coordinates.
///
/// # Examples
/// ```
/// use roadside_core::{Polyline, position};
///
/// let line = Polyline::new(vec![
///     position(11.0168, 76.9558)?,
///     position(11.3410, 77.7172)?,
/// ])?;
/// assert_eq!(line.points().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Coord<f64>>,
}

/// Errors returned by [`Polyline::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    /// No points were supplied.
    #[error("polyline must contain at least one point")]
    Empty,
    /// A point fell outside the WGS84 value ranges.
    #[error("point {index} is invalid: {source}")]
    InvalidPoint {
        /// Index of the offending point.
        index: usize,
        /// Underlying range violation.
        #[source]
        source: PositionError,
    },
}

impl Polyline {
    /// Validate and construct a polyline.
    ///
    /// # Errors
    /// Returns [`PolylineError::Empty`] for an empty point list and
    /// [`PolylineError::InvalidPoint`] for the first out-of-range point.
    pub fn new(points: Vec<Coord<f64>>) -> Result<Self, PolylineError> {
        if points.is_empty() {
            return Err(PolylineError::Empty);
        }
        for (index, point) in points.iter().enumerate() {
            validate_position(*point)
                .map_err(|source| PolylineError::InvalidPoint { index, source })?;
        }
        Ok(Self { points })
    }

    /// The ordered points of the path.
    #[must_use]
    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// First point of the path.
    #[must_use]
    pub fn start(&self) -> Coord<f64> {
        // Construction guarantees at least one point.
        self.points[0]
    }

    /// Last point of the path.
    #[must_use]
    pub fn end(&self) -> Coord<f64> {
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs, in travel order.
    ///
    /// A single-point polyline yields no segments.
    pub fn segments(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Axis-aligned bounding box over all points.
    #[must_use]
    pub fn bounding_box(&self) -> Rect<f64> {
        let mut min = self.start();
        let mut max = self.start();
        for point in &self.points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Rect::new(min, max)
    }

    /// Bounding box padded by `margin_meters` on every side.
    ///
    /// The padding converts metres to degrees at the box's mid-latitude, so a
    /// corridor buffer around the route still falls inside the box. Results
    /// are clamped to the WGS84 value ranges.
    #[must_use]
    pub fn padded_bounding_box(&self, margin_meters: f64) -> Rect<f64> {
        let bounds = self.bounding_box();
        let mid_lat = (bounds.min().y + bounds.max().y) / 2.0;
        let lat_margin = margin_meters / METERS_PER_DEGREE;
        // Longitude degrees shrink with latitude; keep the divisor away from
        // zero near the poles.
        let lon_scale = mid_lat.to_radians().cos().max(0.01);
        let lon_margin = margin_meters / (METERS_PER_DEGREE * lon_scale);
        Rect::new(
            Coord {
                x: (bounds.min().x - lon_margin).max(-180.0),
                y: (bounds.min().y - lat_margin).max(-90.0),
            },
            Coord {
                x: (bounds.max().x + lon_margin).min(180.0),
                y: (bounds.max().y + lat_margin).min(90.0),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::position;
    use rstest::{fixture, rstest};

    #[fixture]
    fn coimbatore_erode() -> Polyline {
        Polyline::new(vec![
            position(11.0168, 76.9558).expect("valid position"),
            position(11.1100, 77.3400).expect("valid position"),
            position(11.3410, 77.7172).expect("valid position"),
        ])
        .expect("valid polyline")
    }

    #[rstest]
    fn rejects_empty_point_list() {
        assert!(matches!(Polyline::new(Vec::new()), Err(PolylineError::Empty)));
    }

    #[rstest]
    fn reports_offending_point_index() {
        let result = Polyline::new(vec![
            Coord { x: 76.9, y: 11.0 },
            Coord { x: 200.0, y: 11.0 },
        ]);
        assert!(matches!(
            result,
            Err(PolylineError::InvalidPoint { index: 1, .. })
        ));
    }

    #[rstest]
    fn preserves_point_order(coimbatore_erode: Polyline) {
        assert_eq!(coimbatore_erode.start().x, 76.9558);
        assert_eq!(coimbatore_erode.end().x, 77.7172);
    }

    #[rstest]
    fn segments_pair_consecutive_points(coimbatore_erode: Polyline) {
        let segments: Vec<_> = coimbatore_erode.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].1, segments[1].0);
    }

    #[rstest]
    fn single_point_has_no_segments() {
        let line = Polyline::new(vec![Coord { x: 0.0, y: 0.0 }]).expect("valid polyline");
        assert_eq!(line.segments().count(), 0);
    }

    #[rstest]
    fn bounding_box_covers_all_points(coimbatore_erode: Polyline) {
        let bounds = coimbatore_erode.bounding_box();
        assert_eq!(bounds.min().x, 76.9558);
        assert_eq!(bounds.max().x, 77.7172);
        assert_eq!(bounds.min().y, 11.0168);
        assert_eq!(bounds.max().y, 11.3410);
    }

    #[rstest]
    fn padding_widens_the_box(coimbatore_erode: Polyline) {
        let bounds = coimbatore_erode.bounding_box();
        let padded = coimbatore_erode.padded_bounding_box(500.0);
        assert!(padded.min().x < bounds.min().x);
        assert!(padded.min().y < bounds.min().y);
        assert!(padded.max().x > bounds.max().x);
        assert!(padded.max().y > bounds.max().y);
    }

    #[rstest]
    fn padding_clamps_to_wgs84_ranges() {
        let line = Polyline::new(vec![Coord { x: 179.99, y: 89.99 }]).expect("valid polyline");
        let padded = line.padded_bounding_box(50_000.0);
        assert!(padded.max().x <= 180.0);
        assert!(padded.max().y <= 90.0);
    }
}
