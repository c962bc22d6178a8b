//! Activity taxonomy model.
//!
//! # Responsibility
//! - Define the flat, parent-pointer node shape loaded from storage.
//! - Define the nested read model rendered for display.
//!
//! # Invariants
//! - `level == 1` iff `parent_id` is `None`.
//! - Non-root nodes satisfy `level == parent.level + 1` and `level <= 3`.
//! - Nodes never carry child links; children are derived per request.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage identifier of one activity node.
pub type ActivityId = i64;

/// Deepest level allowed in the activity taxonomy.
pub const MAX_ACTIVITY_LEVEL: u8 = 3;

/// One entry in the activity taxonomy, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityNode {
    pub id: ActivityId,
    /// Unique name; lookups compare case-insensitively.
    pub name: String,
    /// `None` marks a top-level node.
    pub parent_id: Option<ActivityId>,
    /// 1-based depth in the taxonomy.
    pub level: u8,
}

impl ActivityNode {
    /// Creates a top-level node (`level = 1`).
    pub fn root(id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            level: 1,
        }
    }

    /// Creates a node one level below `parent`.
    pub fn child_of(parent: &ActivityNode, id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: Some(parent.id),
            level: parent.level.saturating_add(1),
        }
    }

    /// Returns whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Validates the node-local part of the level invariant.
    ///
    /// The `level == parent.level + 1` rule needs the whole node set and is
    /// checked by [`crate::hierarchy::validate_levels`].
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.level == 0 || self.level > MAX_ACTIVITY_LEVEL {
            return Err(ActivityValidationError::LevelOutOfRange {
                id: self.id,
                level: self.level,
            });
        }
        match (self.parent_id, self.level) {
            (None, 1) => Ok(()),
            (None, level) => Err(ActivityValidationError::RootLevelMismatch { id: self.id, level }),
            (Some(parent_id), 1) => Err(ActivityValidationError::ChildAtRootLevel {
                id: self.id,
                parent_id,
            }),
            (Some(parent_id), _) if parent_id == self.id => {
                Err(ActivityValidationError::SelfParent(self.id))
            }
            (Some(_), _) => Ok(()),
        }
    }
}

/// Invariant violations for activity nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    /// Level is outside `1..=MAX_ACTIVITY_LEVEL`.
    LevelOutOfRange { id: ActivityId, level: u8 },
    /// Node without a parent is not at level 1.
    RootLevelMismatch { id: ActivityId, level: u8 },
    /// Node with a parent claims level 1.
    ChildAtRootLevel { id: ActivityId, parent_id: ActivityId },
    /// Node points at itself.
    SelfParent(ActivityId),
    /// Parent id does not exist in the node set.
    MissingParent { id: ActivityId, parent_id: ActivityId },
    /// Level is not exactly one below the parent level.
    LevelGap {
        id: ActivityId,
        level: u8,
        parent_level: u8,
    },
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevelOutOfRange { id, level } => write!(
                f,
                "activity {id} has level {level}, expected 1..={MAX_ACTIVITY_LEVEL}"
            ),
            Self::RootLevelMismatch { id, level } => {
                write!(f, "top-level activity {id} must have level 1, got {level}")
            }
            Self::ChildAtRootLevel { id, parent_id } => write!(
                f,
                "activity {id} has parent {parent_id} but claims level 1"
            ),
            Self::SelfParent(id) => write!(f, "activity {id} cannot be its own parent"),
            Self::MissingParent { id, parent_id } => {
                write!(f, "activity {id} references missing parent {parent_id}")
            }
            Self::LevelGap {
                id,
                level,
                parent_level,
            } => write!(
                f,
                "activity {id} has level {level} under a parent at level {parent_level}"
            ),
        }
    }
}

impl Error for ActivityValidationError {}

/// Nested activity read model rendered from the flat node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTreeNode {
    pub id: ActivityId,
    pub name: String,
    pub parent_id: Option<ActivityId>,
    pub level: u8,
    /// Omitted from serialized output for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ActivityTreeNode>,
}

impl ActivityTreeNode {
    /// Creates a leaf tree node from its flat counterpart.
    pub fn leaf(node: &ActivityNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            parent_id: node.parent_id,
            level: node.level,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Flattens this subtree depth-first (pre-order) into flat nodes.
    pub fn flatten(&self) -> Vec<ActivityNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            out.push(ActivityNode {
                id: current.id,
                name: current.name.clone(),
                parent_id: current.parent_id,
                level: current.level,
            });
            stack.extend(current.children.iter().rev());
        }
        out
    }
}
