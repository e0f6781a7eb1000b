//! Arena-backed forest assembled from flat parent-pointer records.
//!
//! This module turns a flat collection of records, each carrying an identity
//! key and an optional parent-reference key, into a hierarchy. Nodes are
//! stored contiguously in the arena and linked by [`NodeId`] indices, so the
//! structure has a single owner and no reference cycles.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Result, TreeError};
use crate::node::{Node, NodeId};

/// An ordered collection of trees sharing one node arena.
///
/// Produced by [`Forest::assemble`]. All traversal and annotation operations
/// live on this type and take the root of the subtree they should work on;
/// mutating operations update the arena in place.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forest<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) roots: Vec<NodeId>,
}

impl<T> Forest<T> {
    /// Assembles a forest from a flat record collection.
    ///
    /// `key` extracts each record's identity key; `parent_key` extracts the
    /// parent reference, with `None` meaning the record is a root. Assembly is
    /// two linear passes: the first fills the identity map (a duplicated key
    /// keeps the last record seen), the second appends every record to its
    /// resolved parent's children, preserving input order. A record whose
    /// parent reference resolves to nothing becomes a root rather than an
    /// error.
    ///
    /// The records are moved into the arena; the returned map indexes every
    /// record by identity key, roots included.
    ///
    /// # Arguments
    /// * `records` - The flat records to assemble
    /// * `key` - Extracts the identity key of a record
    /// * `parent_key` - Extracts the parent reference, `None` for roots
    ///
    /// # Returns
    /// The assembled forest and the identity-key lookup map
    pub fn assemble<K, F, P>(
        records: impl IntoIterator<Item = T>,
        key: F,
        parent_key: P,
    ) -> (Self, HashMap<K, NodeId>)
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
        P: Fn(&T) -> Option<K>,
    {
        let mut nodes: Vec<Node<T>> = records.into_iter().map(Node::new).collect();

        let mut map = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            map.insert(key(&node.value), NodeId(index));
        }

        let mut roots = Vec::new();
        for index in 0..nodes.len() {
            let parent = parent_key(&nodes[index].value).and_then(|k| map.get(&k).copied());
            match parent {
                Some(parent_id) => nodes[parent_id.0].children.push(NodeId(index)),
                None => roots.push(NodeId(index)),
            }
        }

        debug!(nodes = nodes.len(), roots = roots.len(), "assembled forest");
        (Self { nodes, roots }, map)
    }

    /// Root nodes, in input order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Looks up a node by id for mutation.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }
}
