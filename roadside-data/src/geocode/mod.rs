//! Place-name geocoding with a degrading fallback chain.
//!
//! [`FallbackGeocoder`] tries a fast structured-search service first
//! ([`NominatimGeocoder`]), falls back to an alternate resolver
//! ([`PhotonGeocoder`]), and finally consults a static [`Gazetteer`] of known
//! cities so that a non-empty query always yields *some* coordinate, with
//! accuracy degrading down the chain.

mod fallback;
mod gazetteer;
mod nominatim;
mod photon;

pub use fallback::{FallbackGeocoder, Resolved, ResolutionSource};
pub use gazetteer::Gazetteer;
pub use nominatim::{NominatimGeocoder, NominatimGeocoderConfig};
pub use photon::{PhotonGeocoder, PhotonGeocoderConfig};

use std::time::Duration;

use roadside_core::GeocodeError;

/// Map a transport failure onto the geocode error taxonomy.
pub(crate) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout: Duration,
) -> GeocodeError {
    if error.is_timeout() {
        return GeocodeError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }
    if let Some(status) = error.status() {
        return GeocodeError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    GeocodeError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}
