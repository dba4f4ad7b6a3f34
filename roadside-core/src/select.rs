//! Corridor filtering and per-category selection of POIs.
//!
//! The selector keeps only POIs within a buffer distance of the active route,
//! ranks survivors by a quality heuristic and distance, and truncates to a
//! per-category cap. Output ordering is fully deterministic: ties on quality
//! break by distance ascending, then by id, and the result map iterates in
//! category order.

use std::collections::BTreeMap;
use std::collections::HashSet;

use log::debug;

use crate::geometry::distance_to_polyline;
use crate::poi::{Poi, PoiCategory};
use crate::polyline::Polyline;

/// Tunables for the corridor filter.
///
/// Smaller buffers mean stricter "on the route only" filtering; larger ones
/// relax to a wider corridor.
///
/// # Examples
/// ```
/// use roadside_core::SelectionConfig;
///
/// let config = SelectionConfig::default().with_buffer_meters(500.0);
/// assert_eq!(config.buffer_meters, 500.0);
/// assert_eq!(config.per_category_cap, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Maximum distance from the active route, in metres.
    pub buffer_meters: f64,
    /// Maximum POIs retained per category.
    pub per_category_cap: usize,
    /// Search radius for the initial around-a-point display, in metres.
    pub default_radius_meters: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            buffer_meters: 200.0,
            per_category_cap: 3,
            default_radius_meters: 5000.0,
        }
    }
}

impl SelectionConfig {
    /// Set the corridor buffer distance.
    #[must_use]
    pub fn with_buffer_meters(mut self, buffer_meters: f64) -> Self {
        self.buffer_meters = buffer_meters;
        self
    }

    /// Set the per-category cap.
    #[must_use]
    pub fn with_per_category_cap(mut self, per_category_cap: usize) -> Self {
        self.per_category_cap = per_category_cap;
        self
    }

    /// Set the default around-a-point search radius.
    #[must_use]
    pub fn with_default_radius_meters(mut self, default_radius_meters: f64) -> Self {
        self.default_radius_meters = default_radius_meters;
        self
    }
}

/// A POI that passed the corridor filter, with its distance to the active
/// route at selection time.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPoi {
    /// The selected POI.
    pub poi: Poi,
    /// Distance to the active route in metres. Always within the buffer.
    pub distance_meters: f64,
}

/// Heuristic significance score for ranking within a category.
///
/// Named "main" or "headquarters" facilities outrank unnamed ones, and a
/// reachable phone number is a weak signal that the entry is maintained.
/// Categories where no POI scores above zero degrade to pure distance order.
#[must_use]
pub fn quality_score(poi: &Poi) -> u32 {
    let mut score = 0;
    let name = poi.name.to_lowercase();
    if name.contains("main") || name.contains("headquarters") {
        score += 2;
    }
    if poi.tags.contains_key("phone") || poi.tags.contains_key("contact:phone") {
        score += 1;
    }
    score
}

/// Filter, rank and cap raw POIs against the active route.
///
/// Per category the pipeline is:
/// 1. drop duplicates by id (redundant fetch endpoints can overlap);
/// 2. drop POIs farther than `config.buffer_meters` from `route`;
/// 3. sort by [`quality_score`] descending, then distance ascending, then id;
/// 4. keep the first `config.per_category_cap` entries.
///
/// Every returned entry satisfies `distance_meters <= config.buffer_meters`
/// and no category exceeds the cap. Categories with no survivors are absent
/// from the map.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use geo::Coord;
/// use roadside_core::{Poi, PoiCategory, Polyline, SelectionConfig, select_pois};
///
/// let route = Polyline::new(vec![
///     Coord { x: 77.0, y: 11.0 },
///     Coord { x: 77.2, y: 11.0 },
/// ])?;
/// let on_route = Poi::new(
///     "node/1".into(),
///     PoiCategory::Fuel,
///     "Pump".into(),
///     Coord { x: 77.1, y: 11.0 },
///     HashMap::new(),
/// )?;
/// let selected = select_pois(&[on_route], &route, &SelectionConfig::default());
/// assert_eq!(selected[&PoiCategory::Fuel].len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn select_pois(
    raw: &[Poi],
    route: &Polyline,
    config: &SelectionConfig,
) -> BTreeMap<PoiCategory, Vec<SelectedPoi>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut by_category: BTreeMap<PoiCategory, Vec<SelectedPoi>> = BTreeMap::new();

    for poi in raw {
        if !seen.insert(poi.id.as_str()) {
            continue;
        }
        let distance_meters = distance_to_polyline(poi.location, route);
        if distance_meters > config.buffer_meters {
            continue;
        }
        by_category
            .entry(poi.category)
            .or_default()
            .push(SelectedPoi {
                poi: poi.clone(),
                distance_meters,
            });
    }

    for entries in by_category.values_mut() {
        entries.sort_by(|a, b| {
            quality_score(&b.poi)
                .cmp(&quality_score(&a.poi))
                .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
                .then_with(|| a.poi.id.cmp(&b.poi.id))
        });
        entries.truncate(config.per_category_cap);
    }
    // A zero cap empties a category's entries; drop those so the map only
    // ever holds categories with survivors.
    by_category.retain(|_, entries| !entries.is_empty());

    let kept: usize = by_category.values().map(Vec::len).sum();
    debug!(
        "kept {kept} of {} raw POIs across {} categories within {}m",
        raw.len(),
        by_category.len(),
        config.buffer_meters
    );

    by_category
}
