//! Points of interest along a route corridor.
//!
//! Categories carry their OpenStreetMap tag filter so the fetch layer can
//! build queries without a parallel lookup table, and a placeholder display
//! name for elements whose source tags omit one.

use std::collections::HashMap;

use geo::Coord;

use crate::position::{PositionError, validate_position};

/// OpenStreetMap tag predicate identifying one category.
///
/// `value = None` matches any value for the key (an existence filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagFilter {
    /// Tag key, e.g. `amenity`.
    pub key: &'static str,
    /// Required tag value, or `None` for key existence.
    pub value: Option<&'static str>,
}

/// The POI categories the corridor filter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoiCategory {
    /// Police stations.
    Police,
    /// Hospitals and clinics.
    Hospital,
    /// Fuel stations.
    Fuel,
    /// Restaurants.
    Restaurant,
    /// Hotels.
    Hotel,
    /// Public toilets.
    Restroom,
    /// Electric-vehicle charging stations.
    EvStation,
    /// Heritage sites.
    Heritage,
}

impl PoiCategory {
    /// Every category, in ranking order.
    pub const ALL: [Self; 8] = [
        Self::Police,
        Self::Hospital,
        Self::Fuel,
        Self::Restaurant,
        Self::Hotel,
        Self::Restroom,
        Self::EvStation,
        Self::Heritage,
    ];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use roadside_core::PoiCategory;
    ///
    /// assert_eq!(PoiCategory::EvStation.as_str(), "ev_station");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Police => "police",
            Self::Hospital => "hospital",
            Self::Fuel => "fuel",
            Self::Restaurant => "restaurant",
            Self::Hotel => "hotel",
            Self::Restroom => "restroom",
            Self::EvStation => "ev_station",
            Self::Heritage => "heritage",
        }
    }

    /// The OSM tag predicate selecting this category.
    #[must_use]
    pub fn tag_filter(&self) -> TagFilter {
        match self {
            Self::Police => TagFilter {
                key: "amenity",
                value: Some("police"),
            },
            Self::Hospital => TagFilter {
                key: "amenity",
                value: Some("hospital"),
            },
            Self::Fuel => TagFilter {
                key: "amenity",
                value: Some("fuel"),
            },
            Self::Restaurant => TagFilter {
                key: "amenity",
                value: Some("restaurant"),
            },
            Self::Hotel => TagFilter {
                key: "tourism",
                value: Some("hotel"),
            },
            Self::Restroom => TagFilter {
                key: "amenity",
                value: Some("toilets"),
            },
            Self::EvStation => TagFilter {
                key: "amenity",
                value: Some("charging_station"),
            },
            Self::Heritage => TagFilter {
                key: "heritage",
                value: None,
            },
        }
    }

    /// Display name used when the source element carries no `name` tag.
    #[must_use]
    pub fn placeholder_name(&self) -> String {
        let label = match self {
            Self::Police => "police station",
            Self::Hospital => "hospital",
            Self::Fuel => "fuel station",
            Self::Restaurant => "restaurant",
            Self::Hotel => "hotel",
            Self::Restroom => "restroom",
            Self::EvStation => "charging station",
            Self::Heritage => "heritage site",
        };
        format!("Unnamed {label}")
    }

    /// Infer a category from a raw OSM tag mapping, if any filter matches.
    #[must_use]
    pub fn from_tags(tags: &HashMap<String, String>) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| {
            let filter = category.tag_filter();
            match filter.value {
                Some(value) => tags.get(filter.key).is_some_and(|v| v == value),
                None => tags.contains_key(filter.key),
            }
        })
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "police" => Ok(Self::Police),
            "hospital" => Ok(Self::Hospital),
            "fuel" => Ok(Self::Fuel),
            "restaurant" => Ok(Self::Restaurant),
            "hotel" => Ok(Self::Hotel),
            "restroom" => Ok(Self::Restroom),
            "ev_station" => Ok(Self::EvStation),
            "heritage" => Ok(Self::Heritage),
            _ => Err(format!("unknown POI category '{s}'")),
        }
    }
}

/// A categorised place with a stable source identifier.
///
/// `tags` mirrors the raw source attributes (phone numbers and the like).
/// Distance to the active route is computed by the selector and never stored
/// here: it is relative to whichever route is active.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use geo::Coord;
/// use roadside_core::{Poi, PoiCategory};
///
/// let poi = Poi::new(
///     "node/42".into(),
///     PoiCategory::Police,
///     "District HQ".into(),
///     Coord { x: 77.0, y: 11.0 },
///     HashMap::new(),
/// )?;
/// assert_eq!(poi.category, PoiCategory::Police);
/// # Ok::<(), roadside_core::PositionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Stable identifier from the source, e.g. `node/123456`.
    pub id: String,
    /// Category the source tags matched.
    pub category: PoiCategory,
    /// Display name, possibly a category placeholder.
    pub name: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Raw source tags.
    pub tags: HashMap<String, String>,
}

impl Poi {
    /// Validate the location and construct a [`Poi`].
    ///
    /// # Errors
    /// Returns [`PositionError`] when the location is outside WGS84 ranges.
    pub fn new(
        id: String,
        category: PoiCategory,
        name: String,
        location: Coord<f64>,
        tags: HashMap<String, String>,
    ) -> Result<Self, PositionError> {
        validate_position(location)?;
        Ok(Self {
            id,
            category,
            name,
            location,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(PoiCategory::Fuel.to_string(), PoiCategory::Fuel.as_str());
    }

    #[test]
    fn parsing_round_trips_every_category() {
        for category in PoiCategory::ALL {
            assert_eq!(PoiCategory::from_str(category.as_str()), Ok(category));
        }
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = PoiCategory::from_str("cinema").unwrap_err();
        assert!(err.contains("unknown POI category"));
    }

    #[test]
    fn infers_category_from_value_tag() {
        let tags = HashMap::from([("amenity".to_owned(), "police".to_owned())]);
        assert_eq!(PoiCategory::from_tags(&tags), Some(PoiCategory::Police));
    }

    #[test]
    fn infers_heritage_from_key_presence() {
        let tags = HashMap::from([("heritage".to_owned(), "2".to_owned())]);
        assert_eq!(PoiCategory::from_tags(&tags), Some(PoiCategory::Heritage));
    }

    #[test]
    fn unmatched_tags_infer_nothing() {
        let tags = HashMap::from([("amenity".to_owned(), "cinema".to_owned())]);
        assert_eq!(PoiCategory::from_tags(&tags), None);
    }

    #[test]
    fn poi_rejects_invalid_location() {
        let result = Poi::new(
            "node/1".into(),
            PoiCategory::Fuel,
            "Pump".into(),
            Coord { x: 77.0, y: 95.0 },
            HashMap::new(),
        );
        assert!(result.is_err());
    }
}
