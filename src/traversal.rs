//! Traversal and annotation operations over an assembled [`Forest`].
//!
//! Every operation here works on the subtree under a caller-supplied root.
//! All of them assume the child relation is acyclic; `assemble` only produces
//! cycles from degenerate input (a record that is its own ancestor through
//! duplicated keys), and on such input the recursive operations will not
//! terminate. Callers own that precondition.

use crate::error::Result;
use crate::node::{Node, NodeId};
use crate::tree::Forest;

impl<T> Forest<T> {
    /// Pre-order linearization of the subtree under `root`: the node itself,
    /// then each child's linearization in child order.
    ///
    /// # Arguments
    /// * `root` - The subtree to flatten
    ///
    /// # Returns
    /// * `Result<Vec<NodeId>>` - The visited nodes in pre-order
    pub fn flatten(&self, root: NodeId) -> Result<Vec<NodeId>> {
        self.flatten_where(root, |_| true)
    }

    /// Pre-order linearization with pruning.
    ///
    /// When `descend` returns false for a node, the node itself stays in the
    /// output but its descendants are skipped. Read-only; uses an explicit
    /// stack, so depth is bounded by the heap rather than the call stack.
    pub fn flatten_where<F>(&self, root: NodeId, mut descend: F) -> Result<Vec<NodeId>>
    where
        F: FnMut(&Node<T>) -> bool,
    {
        self.check(root)?;
        let mut result = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            result.push(id);

            let node = &self.nodes[id.0];
            if !node.children.is_empty() && descend(node) {
                // Reverse push so children pop in input order.
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }

        Ok(result)
    }

    /// Annotates the subtree under `root` with relationship metadata.
    ///
    /// See [`add_associations_with`](Forest::add_associations_with).
    pub fn add_associations(&mut self, root: NodeId) -> Result<()> {
        self.add_associations_with(root, |_, _| {})
    }

    /// Annotates the subtree under `root`, invoking `on_visit` per node.
    ///
    /// Walks the subtree top-down carrying the ancestor chain. For each node:
    /// sets `parent` (non-root nodes only), `parents` (root-to-parent order),
    /// `level` (chain length + 1), and a provisional `is_last` of "has no
    /// children"; then invokes the visitor and recurses. After each child
    /// returns, the parent overwrites that child's `is_last` from its sibling
    /// position. The node this was called on has no parent pass above it, so
    /// its own `is_last` keeps the provisional default.
    ///
    /// The visitor runs synchronously, once per node, in pre-order.
    pub fn add_associations_with<F>(&mut self, root: NodeId, mut on_visit: F) -> Result<()>
    where
        F: FnMut(NodeId, &Node<T>),
    {
        self.check(root)?;
        self.associate(root, None, &[], &mut on_visit);
        Ok(())
    }

    fn associate<F>(&mut self, id: NodeId, parent: Option<NodeId>, parents: &[NodeId], on_visit: &mut F)
    where
        F: FnMut(NodeId, &Node<T>),
    {
        let node = &mut self.nodes[id.0];
        if parent.is_some() {
            node.parent = parent;
        }
        node.parents = parents.to_vec();
        node.is_last = Some(node.children.is_empty());
        node.level = Some(parents.len() + 1);

        on_visit(id, &self.nodes[id.0]);

        let children = self.nodes[id.0].children.clone();
        if children.is_empty() {
            return;
        }

        let mut chain = parents.to_vec();
        chain.push(id);
        let last_index = children.len() - 1;
        for (index, child) in children.into_iter().enumerate() {
            self.associate(child, Some(id), &chain, on_visit);
            self.nodes[child.0].is_last = Some(index == last_index);
        }
    }

    /// Invokes `on_match` on every node in the subtree whose extracted key
    /// equals `value`.
    ///
    /// The walk is pre-order and always covers the whole subtree; a match is
    /// not a stop condition, and descent continues into the children as they
    /// exist after the callback ran. Zero matches completes silently.
    ///
    /// # Arguments
    /// * `root` - The subtree to search
    /// * `key` - Extracts the compared key from a record
    /// * `value` - The key value to match
    /// * `on_match` - Mutation callback, run once per matching node
    pub fn update_node_by_key<K, F, M>(
        &mut self,
        root: NodeId,
        key: F,
        value: K,
        mut on_match: M,
    ) -> Result<()>
    where
        K: PartialEq,
        F: Fn(&T) -> K,
        M: FnMut(&mut Node<T>),
    {
        self.check(root)?;
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if key(&self.nodes[id.0].value) == value {
                on_match(&mut self.nodes[id.0]);
            }

            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push(child);
            }
        }

        Ok(())
    }

    /// Computes descendant counts for every node in the subtree under `root`.
    ///
    /// Bottom-up: a leaf counts 0; an internal node counts the sum of its
    /// children's subtree counts plus the number of direct children. Every
    /// visited child gets its count written during the recursion; the root's
    /// own total is assigned here at the entry point and also returned.
    pub fn calculate_children_count(&mut self, root: NodeId) -> Result<usize> {
        self.check(root)?;
        let total = self.count_descendants(root);
        self.nodes[root.0].children_count = Some(total);
        Ok(total)
    }

    fn count_descendants(&mut self, id: NodeId) -> usize {
        let children = self.nodes[id.0].children.clone();
        if children.is_empty() {
            return 0;
        }

        let mut total = children.len();
        for child in children {
            let count = self.count_descendants(child);
            self.nodes[child.0].children_count = Some(count);
            total += count;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        parent_id: Option<u32>,
    }

    fn item(id: u32, parent_id: Option<u32>) -> Item {
        Item { id, parent_id }
    }

    /// 1 -> (2 -> (3 -> 5, 4), 6), plus the lone root 7.
    fn fixture() -> (Forest<Item>, HashMap<u32, NodeId>) {
        let records = vec![
            item(1, None),
            item(2, Some(1)),
            item(3, Some(2)),
            item(4, Some(2)),
            item(5, Some(3)),
            item(6, Some(1)),
            item(7, None),
        ];
        Forest::assemble(records, |i| i.id, |i| i.parent_id)
    }

    fn ids(forest: &Forest<Item>, nodes: &[NodeId]) -> Vec<u32> {
        nodes.iter().map(|&n| forest.get(n).unwrap().value.id).collect()
    }

    #[test]
    fn flatten_is_pre_order() {
        let (forest, map) = fixture();
        let flat = forest.flatten(map[&1]).unwrap();
        assert_eq!(ids(&forest, &flat), vec![1, 2, 3, 5, 4, 6]);
    }

    #[test]
    fn flatten_where_prunes_descendants_but_keeps_the_node() {
        let (forest, map) = fixture();
        // Stop descending below node 3: 5 disappears, 3 stays.
        let flat = forest.flatten_where(map[&1], |node| node.value.id != 3).unwrap();
        assert_eq!(ids(&forest, &flat), vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn add_associations_sets_parent_chain_and_level() {
        let (mut forest, map) = fixture();
        forest.add_associations(map[&1]).unwrap();

        let two = forest.get(map[&2]).unwrap();
        assert_eq!(two.parent, Some(map[&1]));
        assert_eq!(two.parents, vec![map[&1]]);
        assert_eq!(two.level, Some(2));

        let five = forest.get(map[&5]).unwrap();
        assert_eq!(five.parent, Some(map[&3]));
        assert_eq!(five.parents, vec![map[&1], map[&2], map[&3]]);
        assert_eq!(five.level, Some(4));

        let one = forest.get(map[&1]).unwrap();
        assert_eq!(one.parent, None);
        assert!(one.parents.is_empty());
        assert_eq!(one.level, Some(1));
    }

    #[test]
    fn add_associations_marks_last_siblings() {
        let (mut forest, map) = fixture();
        forest.add_associations(map[&1]).unwrap();

        assert_eq!(forest.get(map[&2]).unwrap().is_last, Some(false));
        assert_eq!(forest.get(map[&6]).unwrap().is_last, Some(true));
        assert_eq!(forest.get(map[&3]).unwrap().is_last, Some(false));
        assert_eq!(forest.get(map[&4]).unwrap().is_last, Some(true));
        assert_eq!(forest.get(map[&5]).unwrap().is_last, Some(true));
        // The called-on root keeps the provisional "no children" default.
        assert_eq!(forest.get(map[&1]).unwrap().is_last, Some(false));
    }

    #[test]
    fn add_associations_visits_every_node_in_pre_order() {
        let (mut forest, map) = fixture();
        let mut seen = Vec::new();
        forest
            .add_associations_with(map[&1], |_, node| seen.push(node.value.id))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 5, 4, 6]);
    }

    #[test]
    fn update_node_by_key_mutates_the_matching_node() {
        let (mut forest, map) = fixture();
        assert_eq!(forest.get(map[&5]).unwrap().value.parent_id, Some(3));

        forest
            .update_node_by_key(map[&1], |i| i.id, 5, |node| node.value.parent_id = Some(4))
            .unwrap();

        assert_eq!(forest.get(map[&5]).unwrap().value.parent_id, Some(4));
    }

    #[test]
    fn update_node_by_key_fires_on_every_match() {
        let records = vec![
            item(1, None),
            item(2, Some(1)),
            item(2, Some(1)),
            item(3, Some(2)),
        ];
        let (mut forest, map) = Forest::assemble(records, |i| i.id, |i| i.parent_id);

        let mut hits = 0;
        forest.update_node_by_key(map[&1], |i| i.id, 2, |_| hits += 1).unwrap();
        assert_eq!(hits, 2);

        let mut misses = 0;
        forest.update_node_by_key(map[&1], |i| i.id, 99, |_| misses += 1).unwrap();
        assert_eq!(misses, 0);
    }

    #[test]
    fn calculate_children_count_counts_all_descendants() {
        let (mut forest, map) = fixture();
        let total = forest.calculate_children_count(map[&1]).unwrap();

        assert_eq!(total, 5);
        assert_eq!(forest.get(map[&1]).unwrap().children_count, Some(5));
        assert_eq!(forest.get(map[&2]).unwrap().children_count, Some(3));
        assert_eq!(forest.get(map[&3]).unwrap().children_count, Some(1));
        assert_eq!(forest.get(map[&5]).unwrap().children_count, Some(0));
        assert_eq!(forest.get(map[&6]).unwrap().children_count, Some(0));
    }

    #[test]
    fn calculate_children_count_on_a_leaf_is_zero() {
        let (mut forest, map) = fixture();
        assert_eq!(forest.calculate_children_count(map[&7]).unwrap(), 0);
        assert_eq!(forest.get(map[&7]).unwrap().children_count, Some(0));
    }
}
