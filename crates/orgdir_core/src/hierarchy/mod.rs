//! Activity hierarchy queries.
//!
//! # Responsibility
//! - Answer tree and descendant-closure queries over flat activity nodes.
//! - Stay storage-agnostic: callers pass the complete node list.

pub mod resolver;

pub use resolver::{
    activity_tree, build_adjacency, descendant_ids, find_by_name, validate_levels,
    ActivityAdjacency,
};
