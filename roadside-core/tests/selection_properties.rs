//! Property tests for the corridor selector's invariants.

use geo::Coord;
use proptest::prelude::*;
use roadside_core::{Poi, PoiCategory, Polyline, SelectionConfig, select_pois};
use std::collections::HashMap;

/// Routes and POIs are generated inside one ~70 km box around 11°N 77°E so
/// distances stay in the regime the equirectangular projection is built for.
fn region_point() -> impl Strategy<Value = Coord<f64>> {
    (10.8f64..11.4, 76.8f64..77.6).prop_map(|(lat, lon)| Coord { x: lon, y: lat })
}

fn route_strategy() -> impl Strategy<Value = Polyline> {
    prop::collection::vec(region_point(), 2..6)
        .prop_map(|points| Polyline::new(points).expect("region points are valid"))
}

fn poi_strategy() -> impl Strategy<Value = Vec<Poi>> {
    prop::collection::vec((region_point(), 0usize..PoiCategory::ALL.len()), 0..40).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(index, (location, category_index))| {
                    let category = PoiCategory::ALL[category_index];
                    Poi::new(
                        format!("node/{index}"),
                        category,
                        category.placeholder_name(),
                        location,
                        HashMap::new(),
                    )
                    .expect("region points are valid")
                })
                .collect()
        },
    )
}

proptest! {
    /// Widening the buffer never loses a POI that a narrower buffer kept.
    #[test]
    fn filter_is_monotonic_in_buffer_size(
        route in route_strategy(),
        pois in poi_strategy(),
        narrow in 0.0f64..5_000.0,
        widen_by in 0.0f64..5_000.0,
    ) {
        // Lift the cap so the comparison sees the raw filter.
        let narrow_config = SelectionConfig::default()
            .with_buffer_meters(narrow)
            .with_per_category_cap(usize::MAX);
        let wide_config = narrow_config
            .clone()
            .with_buffer_meters(narrow + widen_by);

        let narrow_result = select_pois(&pois, &route, &narrow_config);
        let wide_result = select_pois(&pois, &route, &wide_config);

        for (category, entries) in &narrow_result {
            let wide_count = wide_result.get(category).map_or(0, Vec::len);
            prop_assert!(wide_count >= entries.len());
        }
    }

    /// No category ever exceeds the configured cap.
    #[test]
    fn cap_invariant_holds(
        route in route_strategy(),
        pois in poi_strategy(),
        cap in 0usize..6,
    ) {
        let config = SelectionConfig::default()
            .with_buffer_meters(10_000.0)
            .with_per_category_cap(cap);
        let selected = select_pois(&pois, &route, &config);
        for entries in selected.values() {
            prop_assert!(entries.len() <= cap);
        }
    }

    /// Every selected POI satisfies the buffer-distance invariant.
    #[test]
    fn selected_pois_are_within_the_buffer(
        route in route_strategy(),
        pois in poi_strategy(),
        buffer in 0.0f64..10_000.0,
    ) {
        let config = SelectionConfig::default().with_buffer_meters(buffer);
        let selected = select_pois(&pois, &route, &config);
        for entries in selected.values() {
            for entry in entries {
                prop_assert!(entry.distance_meters <= buffer);
            }
        }
    }

    /// Identical inputs produce identical, identically-ordered output.
    #[test]
    fn selection_is_deterministic(
        route in route_strategy(),
        pois in poi_strategy(),
        buffer in 0.0f64..10_000.0,
    ) {
        let config = SelectionConfig::default().with_buffer_meters(buffer);
        let first = select_pois(&pois, &route, &config);
        let second = select_pois(&pois, &route, &config);
        prop_assert_eq!(first, second);
    }

    /// Distances within each category are non-decreasing once quality ties.
    #[test]
    fn untagged_pois_rank_by_distance(
        route in route_strategy(),
        pois in poi_strategy(),
    ) {
        // Generated POIs carry no quality signals, so ranking degrades to
        // pure distance order.
        let config = SelectionConfig::default().with_buffer_meters(10_000.0);
        let selected = select_pois(&pois, &route, &config);
        for entries in selected.values() {
            for pair in entries.windows(2) {
                prop_assert!(pair[0].distance_meters <= pair[1].distance_meters);
            }
        }
    }
}
