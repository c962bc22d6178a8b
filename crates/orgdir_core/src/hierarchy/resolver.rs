//! Activity forest resolution over a flat node list.
//!
//! # Responsibility
//! - Build a request-scoped parent -> children adjacency from parent pointers.
//! - Render the nested forest and compute descendant closures.
//!
//! # Invariants
//! - Input nodes are never mutated; adjacency borrows them for one call.
//! - Children keep the relative order of the input list.
//! - Inputs are assumed to form a forest. Cycles are not detected and make
//!   traversal behavior undefined.

use crate::model::activity::{ActivityId, ActivityNode, ActivityTreeNode, ActivityValidationError};
use std::collections::{HashMap, VecDeque};

/// Parent id -> ordered children, keyed by `None` for top-level nodes.
#[derive(Debug, Default)]
pub struct ActivityAdjacency<'a> {
    children: HashMap<Option<ActivityId>, Vec<&'a ActivityNode>>,
}

impl<'a> ActivityAdjacency<'a> {
    /// Immediate children of `parent`, or an empty slice.
    pub fn children_of(&self, parent: Option<ActivityId>) -> &[&'a ActivityNode] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Top-level nodes in input order.
    pub fn roots(&self) -> &[&'a ActivityNode] {
        self.children_of(None)
    }

    /// Number of distinct parent keys (including the root sentinel).
    pub fn group_count(&self) -> usize {
        self.children.len()
    }
}

/// Groups nodes by `parent_id`, preserving input order inside each group.
pub fn build_adjacency(nodes: &[ActivityNode]) -> ActivityAdjacency<'_> {
    let mut children: HashMap<Option<ActivityId>, Vec<&ActivityNode>> = HashMap::new();
    for node in nodes {
        children.entry(node.parent_id).or_default().push(node);
    }
    ActivityAdjacency { children }
}

/// Renders the forest rooted at every node without a parent.
///
/// Depth-first, children in input order. Returns an empty forest for empty
/// input. Nodes whose parent is absent from `nodes` are unreachable and do
/// not appear in the output.
pub fn activity_tree(nodes: &[ActivityNode]) -> Vec<ActivityTreeNode> {
    let adjacency = build_adjacency(nodes);
    adjacency
        .roots()
        .iter()
        .map(|root| render_subtree(root, &adjacency))
        .collect()
}

fn render_subtree(node: &ActivityNode, adjacency: &ActivityAdjacency<'_>) -> ActivityTreeNode {
    let mut rendered = ActivityTreeNode::leaf(node);
    rendered.children = adjacency
        .children_of(Some(node.id))
        .iter()
        .map(|child| render_subtree(child, adjacency))
        .collect();
    rendered
}

/// Returns `root` plus every id reachable through child links.
///
/// Ids come back in breadth-first discovery order. An empty result means
/// `root` is not in `nodes`; a present leaf yields exactly `[root]`.
pub fn descendant_ids(nodes: &[ActivityNode], root: ActivityId) -> Vec<ActivityId> {
    if !nodes.iter().any(|node| node.id == root) {
        return Vec::new();
    }

    let adjacency = build_adjacency(nodes);
    let mut descendants = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        descendants.push(current);
        queue.extend(adjacency.children_of(Some(current)).iter().map(|child| child.id));
    }
    descendants
}

/// Case-insensitive exact name lookup; surrounding whitespace in `name` is
/// ignored.
pub fn find_by_name<'a>(nodes: &'a [ActivityNode], name: &str) -> Option<&'a ActivityNode> {
    let wanted = name.trim().to_lowercase();
    nodes
        .iter()
        .find(|node| node.name.to_lowercase() == wanted)
}

/// Checks every node against the level invariant, including parent links.
///
/// Returns the first violation in input order.
pub fn validate_levels(nodes: &[ActivityNode]) -> Result<(), ActivityValidationError> {
    let levels: HashMap<ActivityId, u8> = nodes.iter().map(|node| (node.id, node.level)).collect();
    for node in nodes {
        node.validate()?;
        let Some(parent_id) = node.parent_id else {
            continue;
        };
        let parent_level = *levels
            .get(&parent_id)
            .ok_or(ActivityValidationError::MissingParent {
                id: node.id,
                parent_id,
            })?;
        if node.level != parent_level.saturating_add(1) {
            return Err(ActivityValidationError::LevelGap {
                id: node.id,
                level: node.level,
                parent_level,
            });
        }
    }
    Ok(())
}
