//! Validated geographic positions.
//!
//! The engine stores positions as [`geo::Coord`] with `x = longitude` and
//! `y = latitude`. Upstream services report coordinates in either order, so
//! construction goes through [`position`] which takes latitude first (the
//! order people write coordinates) and rejects out-of-range values.

use geo::Coord;
use thiserror::Error;

/// Errors returned when a coordinate falls outside the WGS84 value ranges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending latitude in decimal degrees.
        value: f64,
    },
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending longitude in decimal degrees.
        value: f64,
    },
}

/// Validate and construct a coordinate from latitude and longitude degrees.
///
/// # Errors
/// Returns [`PositionError`] when either component is non-finite or outside
/// its WGS84 range.
///
/// # Examples
/// ```
/// use roadside_core::position;
///
/// let erode = position(11.3410, 77.7172)?;
/// assert_eq!(erode.y, 11.3410);
/// assert_eq!(erode.x, 77.7172);
/// # Ok::<(), roadside_core::PositionError>(())
/// ```
pub fn position(latitude: f64, longitude: f64) -> Result<Coord<f64>, PositionError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(PositionError::LatitudeOutOfRange { value: latitude });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(PositionError::LongitudeOutOfRange { value: longitude });
    }
    Ok(Coord {
        x: longitude,
        y: latitude,
    })
}

/// Check that an existing coordinate satisfies the WGS84 value ranges.
///
/// # Errors
/// Returns [`PositionError`] for the first out-of-range component.
pub fn validate_position(coord: Coord<f64>) -> Result<(), PositionError> {
    position(coord.y, coord.x).map(|_| ())
}
