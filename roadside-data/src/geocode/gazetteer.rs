//! Static last-resort lookup table of well-known city coordinates.
//!
//! When both online geocoders are unreachable the chain still has to produce
//! a usable coordinate. This table covers the cities the application is
//! normally used around; anything else resolves to a regional centroid.

use geo::Coord;

/// Approximate coordinates for well-known cities, matched by
/// case-insensitive substring.
const CITIES: &[(&str, f64, f64)] = &[
    ("chennai", 13.0827, 80.2707),
    ("coimbatore", 11.0168, 76.9558),
    ("madurai", 9.9252, 78.1198),
    ("tiruchirappalli", 10.7905, 78.7047),
    ("salem", 11.6643, 78.1460),
    ("erode", 11.3410, 77.7172),
    ("tiruppur", 11.1085, 77.3411),
    ("vellore", 12.9165, 79.1325),
    ("thanjavur", 10.7870, 79.1378),
    ("tirunelveli", 8.7139, 77.7567),
    ("thoothukudi", 8.7642, 78.1348),
    ("dindigul", 10.3624, 77.9695),
    ("karur", 10.9601, 78.0766),
    ("hosur", 12.7409, 77.8253),
    ("nagercoil", 8.1833, 77.4119),
    ("kanyakumari", 8.0883, 77.5385),
    ("cuddalore", 11.7480, 79.7714),
    ("kumbakonam", 10.9617, 79.3881),
    ("pollachi", 10.6609, 77.0048),
    ("namakkal", 11.2189, 78.1674),
    ("krishnagiri", 12.5186, 78.2137),
    ("udhagamandalam", 11.4102, 76.6950),
    ("ooty", 11.4102, 76.6950),
    ("puducherry", 11.9416, 79.8083),
    ("bengaluru", 12.9716, 77.5946),
    ("bangalore", 12.9716, 77.5946),
    ("mysuru", 12.2958, 76.6394),
    ("kochi", 9.9312, 76.2673),
    ("thiruvananthapuram", 8.5241, 76.9366),
    ("kozhikode", 11.2588, 75.7804),
    ("hyderabad", 17.3850, 78.4867),
];

/// Regional centroid returned when no table entry matches.
const REGION_DEFAULT: Coord<f64> = Coord {
    x: 78.6569,
    y: 11.1271,
};

/// Offline city table with a regional default.
///
/// # Examples
/// ```
/// use roadside_core::GeocodeBackend;
/// use roadside_data::Gazetteer;
///
/// let gazetteer = Gazetteer::new();
/// let chennai = gazetteer.lookup("Chennai Central").expect("table entry");
/// assert_eq!(chennai.y, 13.0827);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Gazetteer;

impl Gazetteer {
    /// Create the gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Look up a place by case-insensitive substring match against the city
    /// table. Returns `None` when nothing matches.
    #[must_use]
    pub fn lookup(&self, place: &str) -> Option<Coord<f64>> {
        let query = place.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        CITIES
            .iter()
            .find(|(name, _, _)| query.contains(name) || name.contains(query.as_str()))
            .map(|&(_, lat, lon)| Coord { x: lon, y: lat })
    }

    /// Resolve a place, falling back to the regional centroid on a miss.
    #[must_use]
    pub fn resolve_or_default(&self, place: &str) -> (Coord<f64>, bool) {
        match self.lookup(place) {
            Some(coord) => (coord, true),
            None => (REGION_DEFAULT, false),
        }
    }
}

impl roadside_core::GeocodeBackend for Gazetteer {
    fn resolve(&self, place: &str) -> Result<Coord<f64>, roadside_core::GeocodeError> {
        if place.trim().is_empty() {
            return Err(roadside_core::GeocodeError::EmptyQuery);
        }
        let (coord, _) = self.resolve_or_default(place);
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Chennai", 13.0827, 80.2707)]
    #[case("ERODE", 11.3410, 77.7172)]
    #[case("bus stand, Coimbatore", 11.0168, 76.9558)]
    fn substring_matches_are_case_insensitive(
        #[case] query: &str,
        #[case] lat: f64,
        #[case] lon: f64,
    ) {
        let coord = Gazetteer::new().lookup(query).expect("table entry");
        assert_eq!(coord.y, lat);
        assert_eq!(coord.x, lon);
    }

    #[rstest]
    fn miss_falls_back_to_regional_centroid() {
        let (coord, matched) = Gazetteer::new().resolve_or_default("Reykjavik");
        assert!(!matched);
        assert_eq!(coord, REGION_DEFAULT);
    }

    #[rstest]
    fn blank_queries_never_match() {
        assert!(Gazetteer::new().lookup("   ").is_none());
    }
}
