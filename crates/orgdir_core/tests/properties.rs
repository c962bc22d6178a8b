use orgdir_core::{
    activity_tree, bounding_box, descendant_ids, filter_candidates, haversine_km, ActivityNode,
    Coordinate, NearbyQuery, EARTH_RADIUS_KM,
};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::BTreeSet;

/// Builds a valid forest: node `i` either starts a new root or hangs under
/// an earlier node that still has room below it.
fn forest_from(choices: &[(bool, Index)]) -> Vec<ActivityNode> {
    let mut nodes: Vec<ActivityNode> = Vec::with_capacity(choices.len());
    for (position, (new_root, pick)) in choices.iter().enumerate() {
        let id = position as i64 + 1;
        let name = format!("activity-{id}");
        let parents: Vec<&ActivityNode> = nodes.iter().filter(|node| node.level < 3).collect();
        let node = if *new_root || parents.is_empty() {
            ActivityNode::root(id, name)
        } else {
            ActivityNode::child_of(parents[pick.index(parents.len())], id, name)
        };
        nodes.push(node);
    }
    nodes
}

fn forest_strategy() -> impl Strategy<Value = Vec<ActivityNode>> {
    proptest::collection::vec((any::<bool>(), any::<Index>()), 0..40)
        .prop_map(|choices| forest_from(&choices))
        .prop_shuffle()
}

fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// Point reached from `origin` after `distance_km` along `bearing_deg`,
/// with longitude left unwrapped.
fn destination(origin: Coordinate, distance_km: f64, bearing_deg: f64) -> Coordinate {
    let angular = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());
    Coordinate::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Brings an unwrapped longitude back into `[-180, 180]`.
fn wrapped(point: Coordinate) -> Coordinate {
    let longitude = (point.longitude + 180.0).rem_euclid(360.0) - 180.0;
    Coordinate::new(point.latitude, longitude)
}

fn edges(nodes: &[ActivityNode]) -> BTreeSet<(i64, Option<i64>, u8)> {
    nodes
        .iter()
        .map(|node| (node.id, node.parent_id, node.level))
        .collect()
}

proptest! {
    #[test]
    fn tree_flattens_back_to_input(nodes in forest_strategy()) {
        let flattened: Vec<ActivityNode> = activity_tree(&nodes)
            .iter()
            .flat_map(|root| root.flatten())
            .collect();
        prop_assert_eq!(flattened.len(), nodes.len());
        prop_assert_eq!(edges(&flattened), edges(&nodes));
    }

    #[test]
    fn closure_contains_root_iff_present(nodes in forest_strategy(), root_id in 0i64..60) {
        let closure = descendant_ids(&nodes, root_id);
        let present = nodes.iter().any(|node| node.id == root_id);
        prop_assert_eq!(closure.is_empty(), !present);
        if present {
            prop_assert_eq!(closure[0], root_id);
        }
    }

    #[test]
    fn child_closure_is_subset_of_parent_closure(nodes in forest_strategy()) {
        for node in &nodes {
            let Some(parent_id) = node.parent_id else { continue };
            let parent: BTreeSet<_> = descendant_ids(&nodes, parent_id).into_iter().collect();
            let child: BTreeSet<_> = descendant_ids(&nodes, node.id).into_iter().collect();
            prop_assert!(child.is_subset(&parent));
            prop_assert!(!child.contains(&parent_id));
        }
    }

    #[test]
    fn closure_has_no_duplicates(nodes in forest_strategy(), root_id in 1i64..40) {
        let closure = descendant_ids(&nodes, root_id);
        let unique: BTreeSet<_> = closure.iter().copied().collect();
        prop_assert_eq!(unique.len(), closure.len());
    }

    #[test]
    fn haversine_is_symmetric_and_zero_on_identity(
        a in coordinate_strategy(),
        b in coordinate_strategy(),
    ) {
        let there = haversine_km(a, b);
        let back = haversine_km(b, a);
        prop_assert!(there >= 0.0);
        prop_assert!((there - back).abs() < 1e-9);
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    // The raw box does not wrap, and it under-covers the circle in longitude
    // at high latitude with large radii. Containment only holds for circles
    // clear of the poles and the antimeridian at moderate latitude.
    #[test]
    fn bounding_box_contains_circle(
        lat in -60.0f64..60.0,
        lon in -170.0f64..170.0,
        radius_km in 0.1f64..100.0,
        bearing in 0.0f64..360.0,
        fraction in 0.0f64..0.999,
    ) {
        let center = Coordinate::new(lat, lon);
        let point = destination(center, radius_km * fraction, bearing);
        prop_assert!(haversine_km(center, point) <= radius_km);
        prop_assert!(bounding_box(center, radius_km).contains(point));
    }

    #[test]
    fn radius_filter_keeps_every_point_inside_circle(
        lat in -89.0f64..89.0,
        lon in -180.0f64..=180.0,
        radius_km in 0.1f64..2000.0,
        bearing in 0.0f64..360.0,
        fraction in 0.0f64..0.999,
    ) {
        let center = Coordinate::new(lat, lon);
        let point = wrapped(destination(center, radius_km * fraction, bearing));
        let area = NearbyQuery::within_radius(center, radius_km, 10)
            .resolve()
            .expect("radius query should resolve");
        prop_assert!(area.bounds().contains(point));
        prop_assert_eq!(filter_candidates(vec![point], &area, 10), vec![point]);
    }

    #[test]
    fn filter_never_exceeds_limit(
        center in coordinate_strategy(),
        radius_km in 1.0f64..5000.0,
        limit in 1u32..20,
        candidates in proptest::collection::vec(coordinate_strategy(), 0..60),
    ) {
        let area = NearbyQuery::within_radius(center, radius_km, limit)
            .resolve()
            .expect("radius query should resolve");
        let found = filter_candidates(candidates.iter().copied(), &area, limit as usize);
        prop_assert!(found.len() <= limit as usize);
        for point in &found {
            prop_assert!(haversine_km(center, *point) <= radius_km);
        }
    }
}
