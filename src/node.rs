//! Node shape shared by every tree operation.
//!
//! Nodes live in a [`Forest`](crate::tree::Forest) arena and refer to each
//! other through [`NodeId`] indices, so parent back-references never carry
//! ownership: the arena owns every node, the ids are pure lookup aids.

use std::fmt;

/// Handle to a node inside the [`Forest`](crate::tree::Forest) that produced it.
///
/// Ids are plain arena indices. Using an id with a different forest is a
/// programming error and is reported as
/// [`TreeError::UnknownNode`](crate::error::TreeError::UnknownNode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena, in input order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tree node wrapping a caller-supplied record.
///
/// `value` and `children` are filled by assembly; the remaining fields are
/// derived relationship metadata and stay unset until the corresponding
/// operation runs (`add_associations` for `parent`/`parents`/`is_last`/`level`,
/// `calculate_children_count` for `children_count`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<T> {
    /// The record stored in this node. Never touched by this crate.
    pub value: T,
    /// Direct children, in the order the flat input listed them.
    pub children: Vec<NodeId>,
    /// Immediate ancestor. Set by `add_associations` for non-root nodes.
    pub parent: Option<NodeId>,
    /// Ancestors from the root down to `parent`, exclusive of the node itself.
    pub parents: Vec<NodeId>,
    /// Whether the node sits last among its siblings. For the node
    /// `add_associations` was called on there is no sibling context, so the
    /// provisional "no children" default is kept.
    pub is_last: Option<bool>,
    /// 1-based depth, root = 1.
    pub level: Option<usize>,
    /// Count of all descendants, not just direct children.
    pub children_count: Option<usize>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
            parent: None,
            parents: Vec::new(),
            is_last: None,
            level: None,
            children_count: None,
        }
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
