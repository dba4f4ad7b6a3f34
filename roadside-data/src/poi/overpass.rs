//! Overpass QL query construction and response decoding.

use std::collections::HashMap;

use geo::Coord;
use serde::Deserialize;

use roadside_core::{Poi, PoiCategory, PoiFetchError, PoiQuery, TagFilter};

/// Build the Overpass QL payload for a query.
///
/// Each requested category contributes a `node` and a `way` clause so both
/// point features and mapped building outlines are found; `out center`
/// makes Overpass attach a centre coordinate to the latter.
pub(crate) fn build_query(query: &PoiQuery, timeout_secs: u64) -> Result<String, PoiFetchError> {
    if query.categories().is_empty() {
        return Err(PoiFetchError::NoCategories);
    }

    let mut clauses = String::new();
    for category in query.categories() {
        let filter = render_filter(category.tag_filter());
        match query {
            PoiQuery::Around {
                center,
                radius_meters,
                ..
            } => {
                let area = format!("(around:{},{},{})", radius_meters, center.y, center.x);
                clauses.push_str(&format!("node{filter}{area};way{filter}{area};"));
            }
            PoiQuery::Within { bounds, .. } => {
                // Overpass bounding boxes are (south, west, north, east).
                let area = format!(
                    "({},{},{},{})",
                    bounds.min().y,
                    bounds.min().x,
                    bounds.max().y,
                    bounds.max().x
                );
                clauses.push_str(&format!("node{filter}{area};way{filter}{area};"));
            }
        }
    }

    Ok(format!(
        "[out:json][timeout:{timeout_secs}];({clauses});out center;"
    ))
}

fn render_filter(filter: TagFilter) -> String {
    match filter.value {
        Some(value) => format!("[\"{}\"=\"{}\"]", filter.key, value),
        None => format!("[\"{}\"]", filter.key),
    }
}

/// Overpass JSON response.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub(crate) elements: Vec<Element>,
}

/// One raw OSM element.
///
/// Nodes carry `lat`/`lon` directly; ways and relations carry a `center`
/// when the query ends with `out center`. [`Element::position`] is the
/// single normalisation point for both shapes.
#[derive(Debug, Deserialize)]
pub(crate) struct Element {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) id: u64,
    pub(crate) lat: Option<f64>,
    pub(crate) lon: Option<f64>,
    pub(crate) center: Option<Center>,
    #[serde(default)]
    pub(crate) tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Center {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

impl Element {
    /// Resolve the element's coordinate from whichever shape it has.
    pub(crate) fn position(&self) -> Option<Coord<f64>> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Coord { x: lon, y: lat }),
            (_, _, Some(center)) => Some(Coord {
                x: center.lon,
                y: center.lat,
            }),
            _ => None,
        }
    }

    /// Normalise the element into a [`Poi`].
    ///
    /// Elements with no resolvable coordinate, no matching category, or an
    /// out-of-range position are discarded (`None`).
    pub(crate) fn into_poi(self) -> Option<Poi> {
        let location = self.position()?;
        let category = PoiCategory::from_tags(&self.tags)?;
        let name = self
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| category.placeholder_name());
        Poi::new(
            format!("{}/{}", self.kind, self.id),
            category,
            name,
            location,
            self.tags,
        )
        .ok()
    }
}
