//! The geocoding fallback chain.

use geo::Coord;
use log::{debug, warn};

use roadside_core::{GeocodeBackend, GeocodeError};

use super::gazetteer::Gazetteer;

/// How far down the chain a resolution fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The primary structured-search service answered.
    Primary,
    /// The alternate resolver answered.
    Fallback,
    /// The static city table matched.
    Gazetteer,
    /// Nothing matched; the regional centroid was used.
    RegionDefault,
}

impl ResolutionSource {
    /// Return the source as a lowercase `&str`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::Gazetteer => "gazetteer",
            Self::RegionDefault => "region_default",
        }
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved place with provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// The resolved coordinate.
    pub position: Coord<f64>,
    /// Which stage of the chain produced it.
    pub source: ResolutionSource,
}

/// Chains a primary and secondary geocoder with the static gazetteer.
///
/// For any non-empty query [`FallbackGeocoder::resolve`] always yields a
/// coordinate: service failures and no-match answers both step down the
/// chain, and the gazetteer's regional default is the floor.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::{GeocodeError, test_support::StubGeocoder};
/// use roadside_data::{FallbackGeocoder, ResolutionSource};
///
/// let failing = || StubGeocoder::with_error(GeocodeError::Network {
///     url: "http://geo.example.com".into(),
///     message: "connection refused".into(),
/// });
/// let chain = FallbackGeocoder::new(failing(), failing());
///
/// let resolved = chain.resolve("Chennai")?;
/// assert_eq!(resolved.source, ResolutionSource::Gazetteer);
/// assert_eq!(resolved.position.y, 13.0827);
/// # Ok::<(), GeocodeError>(())
/// ```
#[derive(Debug)]
pub struct FallbackGeocoder<P, S> {
    primary: P,
    secondary: S,
    gazetteer: Gazetteer,
}

impl<P: GeocodeBackend, S: GeocodeBackend> FallbackGeocoder<P, S> {
    /// Compose the chain from its two online stages.
    #[must_use]
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            gazetteer: Gazetteer::new(),
        }
    }

    /// Resolve a place name, degrading through the chain.
    ///
    /// # Errors
    /// Returns [`GeocodeError::EmptyQuery`] for a blank query; any other
    /// input resolves to *some* coordinate.
    pub fn resolve(&self, place: &str) -> Result<Resolved, GeocodeError> {
        if place.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        match self.primary.resolve(place) {
            Ok(position) => {
                return Ok(Resolved {
                    position,
                    source: ResolutionSource::Primary,
                });
            }
            Err(err) => warn!("primary geocoder failed for '{place}': {err}"),
        }

        match self.secondary.resolve(place) {
            Ok(position) => {
                return Ok(Resolved {
                    position,
                    source: ResolutionSource::Fallback,
                });
            }
            Err(err) => warn!("fallback geocoder failed for '{place}': {err}"),
        }

        let (position, matched) = self.gazetteer.resolve_or_default(place);
        let source = if matched {
            ResolutionSource::Gazetteer
        } else {
            ResolutionSource::RegionDefault
        };
        debug!("resolved '{place}' offline via {source}");
        Ok(Resolved { position, source })
    }
}

impl<P: GeocodeBackend, S: GeocodeBackend> GeocodeBackend for FallbackGeocoder<P, S> {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, GeocodeError> {
        Self::resolve(self, place).map(|resolved| resolved.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadside_core::test_support::StubGeocoder;
    use rstest::{fixture, rstest};

    fn network_error() -> GeocodeError {
        GeocodeError::Network {
            url: "http://geo.example.com/search".to_owned(),
            message: "connection refused".to_owned(),
        }
    }

    #[fixture]
    fn chennai() -> Coord<f64> {
        Coord {
            x: 80.2707,
            y: 13.0827,
        }
    }

    #[rstest]
    fn primary_success_short_circuits(chennai: Coord<f64>) {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_position(chennai),
            StubGeocoder::with_error(network_error()),
        );
        let resolved = chain.resolve("Chennai").expect("non-empty query");
        assert_eq!(resolved.source, ResolutionSource::Primary);
        assert_eq!(resolved.position, chennai);
    }

    #[rstest]
    fn secondary_covers_primary_failure(chennai: Coord<f64>) {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_error(network_error()),
            StubGeocoder::with_position(chennai),
        );
        let resolved = chain.resolve("Chennai").expect("non-empty query");
        assert_eq!(resolved.source, ResolutionSource::Fallback);
    }

    #[rstest]
    fn no_match_also_steps_down_the_chain(chennai: Coord<f64>) {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_table(std::collections::HashMap::new()),
            StubGeocoder::with_position(chennai),
        );
        let resolved = chain.resolve("Chennai").expect("non-empty query");
        assert_eq!(resolved.source, ResolutionSource::Fallback);
    }

    #[rstest]
    fn gazetteer_answers_when_both_services_fail() {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_error(network_error()),
            StubGeocoder::with_error(network_error()),
        );
        let resolved = chain.resolve("Chennai").expect("non-empty query");
        assert_eq!(resolved.source, ResolutionSource::Gazetteer);
        assert_eq!(resolved.position.y, 13.0827);
        assert_eq!(resolved.position.x, 80.2707);
    }

    #[rstest]
    fn unknown_place_resolves_to_region_default() {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_error(network_error()),
            StubGeocoder::with_error(network_error()),
        );
        let resolved = chain.resolve("Reykjavik").expect("non-empty query");
        assert_eq!(resolved.source, ResolutionSource::RegionDefault);
    }

    #[rstest]
    fn empty_query_is_the_only_error() {
        let chain = FallbackGeocoder::new(
            StubGeocoder::with_error(network_error()),
            StubGeocoder::with_error(network_error()),
        );
        assert_eq!(chain.resolve(""), Err(GeocodeError::EmptyQuery));
    }
}
