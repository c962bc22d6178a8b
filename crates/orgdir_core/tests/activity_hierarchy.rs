use orgdir_core::hierarchy::{find_by_name, validate_levels};
use orgdir_core::{activity_tree, descendant_ids, ActivityNode, ActivityValidationError};

fn food_and_meat() -> Vec<ActivityNode> {
    vec![
        ActivityNode {
            id: 1,
            name: "Food".to_string(),
            parent_id: None,
            level: 1,
        },
        ActivityNode {
            id: 2,
            name: "Meat".to_string(),
            parent_id: Some(1),
            level: 2,
        },
    ]
}

fn catalog() -> Vec<ActivityNode> {
    let food = ActivityNode::root(1, "Food");
    let meat = ActivityNode::child_of(&food, 2, "Meat");
    let dairy = ActivityNode::child_of(&food, 3, "Dairy");
    let cars = ActivityNode::root(4, "Cars");
    let trucks = ActivityNode::child_of(&cars, 5, "Trucks");
    let passenger = ActivityNode::child_of(&cars, 6, "Passenger");
    let parts = ActivityNode::child_of(&passenger, 7, "Parts");
    let accessories = ActivityNode::child_of(&passenger, 8, "Accessories");
    vec![food, meat, dairy, cars, trucks, passenger, parts, accessories]
}

#[test]
fn two_level_catalog_renders_nested_tree() {
    let nodes = food_and_meat();
    let forest = activity_tree(&nodes);

    assert_eq!(forest.len(), 1);
    let food = &forest[0];
    assert_eq!(food.id, 1);
    assert_eq!(food.name, "Food");
    assert_eq!(food.parent_id, None);
    assert_eq!(food.level, 1);
    assert_eq!(food.children.len(), 1);

    let meat = &food.children[0];
    assert_eq!(meat.id, 2);
    assert_eq!(meat.parent_id, Some(1));
    assert_eq!(meat.level, 2);
    assert!(meat.is_leaf());
}

#[test]
fn two_level_catalog_closures() {
    let nodes = food_and_meat();
    assert_eq!(descendant_ids(&nodes, 1), vec![1, 2]);
    assert_eq!(descendant_ids(&nodes, 2), vec![2]);
}

#[test]
fn absent_root_yields_empty_closure() {
    assert!(descendant_ids(&food_and_meat(), 999).is_empty());
    assert!(descendant_ids(&[], 1).is_empty());
}

#[test]
fn empty_input_renders_empty_forest() {
    assert!(activity_tree(&[]).is_empty());
}

#[test]
fn children_keep_input_order_depth_first() {
    let forest = activity_tree(&catalog());

    let roots: Vec<_> = forest.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(roots, vec!["Food", "Cars"]);

    let cars = &forest[1];
    let cars_children: Vec<_> = cars.children.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(cars_children, vec!["Trucks", "Passenger"]);

    let passenger = &cars.children[1];
    let leaves: Vec<_> = passenger
        .children
        .iter()
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(leaves, vec!["Parts", "Accessories"]);
    assert!(passenger.children.iter().all(|node| node.level == 3));
}

#[test]
fn unordered_input_still_builds_full_tree() {
    let mut nodes = catalog();
    nodes.reverse();
    let forest = activity_tree(&nodes);

    let roots: Vec<_> = forest.iter().map(|node| node.id).collect();
    assert_eq!(roots, vec![4, 1]);
    let flattened: usize = forest.iter().map(|root| root.flatten().len()).sum();
    assert_eq!(flattened, nodes.len());
}

#[test]
fn closure_is_breadth_first_across_levels() {
    assert_eq!(descendant_ids(&catalog(), 4), vec![4, 5, 6, 7, 8]);
    assert_eq!(descendant_ids(&catalog(), 6), vec![6, 7, 8]);
    assert_eq!(descendant_ids(&catalog(), 8), vec![8]);
}

#[test]
fn orphaned_nodes_are_left_out_of_the_forest() {
    let mut nodes = catalog();
    nodes.push(ActivityNode {
        id: 42,
        name: "Stray".to_string(),
        parent_id: Some(100),
        level: 2,
    });

    let forest = activity_tree(&nodes);
    assert!(forest
        .iter()
        .flat_map(|root| root.flatten())
        .all(|node| node.id != 42));
    assert_eq!(descendant_ids(&nodes, 42), vec![42]);
}

#[test]
fn tree_serializes_without_empty_children() {
    let forest = activity_tree(&food_and_meat());
    let json = serde_json::to_value(&forest).expect("forest should serialize");

    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["parent_id"], serde_json::Value::Null);
    assert_eq!(json[0]["children"][0]["name"], "Meat");
    assert!(json[0]["children"][0].get("children").is_none());
}

#[test]
fn name_lookup_is_case_insensitive() {
    let nodes = catalog();
    assert_eq!(find_by_name(&nodes, "PASSENGER").map(|node| node.id), Some(6));
    assert_eq!(find_by_name(&nodes, " dairy\t").map(|node| node.id), Some(3));
    assert!(find_by_name(&nodes, "Boats").is_none());
}

#[test]
fn level_validation_accepts_catalog_and_reports_violations() {
    validate_levels(&catalog()).expect("catalog levels should be consistent");

    let mut too_deep = catalog();
    too_deep.push(ActivityNode {
        id: 9,
        name: "Bolts".to_string(),
        parent_id: Some(7),
        level: 4,
    });
    assert!(matches!(
        validate_levels(&too_deep),
        Err(ActivityValidationError::LevelOutOfRange { id: 9, level: 4 })
    ));

    let mut gap = catalog();
    gap.push(ActivityNode {
        id: 9,
        name: "Tyres".to_string(),
        parent_id: Some(4),
        level: 3,
    });
    assert_eq!(
        validate_levels(&gap),
        Err(ActivityValidationError::LevelGap {
            id: 9,
            level: 3,
            parent_level: 1
        })
    );

    let mut missing = catalog();
    missing.push(ActivityNode {
        id: 9,
        name: "Tyres".to_string(),
        parent_id: Some(77),
        level: 2,
    });
    assert_eq!(
        validate_levels(&missing),
        Err(ActivityValidationError::MissingParent {
            id: 9,
            parent_id: 77
        })
    );
}
